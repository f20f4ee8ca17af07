//! Players and per-player data storage.
//!
//! ## PlayerId
//!
//! The engine models exactly two players. Iteration over players always
//! happens in id order (`FIRST`, then `SECOND`); broadcast ordering relies
//! on this.
//!
//! ## PlayerMap
//!
//! Fixed two-slot storage indexed by `PlayerId`.
//!
//! ## Player
//!
//! The zones the dispatcher walks (hand, board, hero, weapon) and the three
//! quest lists.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::entity::EntityId;
use crate::events::{Quest, QuestKind};

/// Number of players in a game.
pub const PLAYER_COUNT: usize = 2;

/// Player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The first player.
    pub const FIRST: Self = Self(0);

    /// The second player.
    pub const SECOND: Self = Self(1);

    /// Create a new player ID.
    ///
    /// Panics on ids outside the two-player range.
    #[must_use]
    pub fn new(id: u8) -> Self {
        assert!((id as usize) < PLAYER_COUNT, "Player id {id} out of range");
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Both players, in dispatch order.
    pub fn both() -> impl Iterator<Item = PlayerId> {
        [Self::FIRST, Self::SECOND].into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use hearth_events::core::{PlayerId, PlayerMap};
///
/// let mut mana: PlayerMap<i32> = PlayerMap::new(|_| 1);
/// mana[PlayerId::SECOND] += 1;
///
/// assert_eq!(mana[PlayerId::FIRST], 1);
/// assert_eq!(mana[PlayerId::SECOND], 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; PLAYER_COUNT],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::FIRST), factory(PlayerId::SECOND)],
        }
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// A player's zones and quest lists.
///
/// Zones hold entity ids; the card instances themselves live in the game's
/// card arena.
#[derive(Debug)]
pub struct Player {
    pub id: PlayerId,

    /// Cards in hand, in draw order.
    pub hand: Vec<EntityId>,

    /// Cards on the board, left to right.
    pub board: Vec<EntityId>,

    pub hero: Option<EntityId>,

    pub weapon: Option<EntityId>,

    pub quests: Vec<Quest>,

    pub sidequests: Vec<Quest>,

    pub secrets: Vec<Quest>,
}

impl Player {
    /// Create a player with empty zones.
    #[must_use]
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            hand: Vec::new(),
            board: Vec::new(),
            hero: None,
            weapon: None,
            quests: Vec::new(),
            sidequests: Vec::new(),
            secrets: Vec::new(),
        }
    }

    /// The quest list for a quest kind.
    #[must_use]
    pub fn quest_list(&self, kind: QuestKind) -> &[Quest] {
        match kind {
            QuestKind::Quest => &self.quests,
            QuestKind::Sidequest => &self.sidequests,
            QuestKind::Secret => &self.secrets,
        }
    }

    /// Mutable access to the quest list for a quest kind.
    pub fn quest_list_mut(&mut self, kind: QuestKind) -> &mut Vec<Quest> {
        match kind {
            QuestKind::Quest => &mut self.quests,
            QuestKind::Sidequest => &mut self.sidequests,
            QuestKind::Secret => &mut self.secrets,
        }
    }

    /// Find a quest of any kind by name.
    ///
    /// Secrets are searched first, then sidequests, then quests.
    pub fn find_quest_mut(&mut self, name: &str) -> Option<&mut Quest> {
        self.secrets
            .iter_mut()
            .chain(self.sidequests.iter_mut())
            .chain(self.quests.iter_mut())
            .find(|q| q.name == name)
    }

    /// Remove a card from hand. Returns true if it was there.
    pub fn remove_from_hand(&mut self, card: EntityId) -> bool {
        if let Some(pos) = self.hand.iter().position(|&c| c == card) {
            self.hand.remove(pos);
            true
        } else {
            false
        }
    }

    /// Remove a card from the board. Returns true if it was there.
    pub fn remove_from_board(&mut self, card: EntityId) -> bool {
        if let Some(pos) = self.board.iter().position(|&c| c == card) {
            self.board.remove(pos);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        assert_eq!(PlayerId::FIRST.index(), 0);
        assert_eq!(PlayerId::SECOND.index(), 1);
        assert_eq!(format!("{}", PlayerId::FIRST), "Player 1");
    }

    #[test]
    fn test_opponent() {
        assert_eq!(PlayerId::FIRST.opponent(), PlayerId::SECOND);
        assert_eq!(PlayerId::SECOND.opponent(), PlayerId::FIRST);
    }

    #[test]
    fn test_both_in_id_order() {
        let players: Vec<_> = PlayerId::both().collect();
        assert_eq!(players, vec![PlayerId::FIRST, PlayerId::SECOND]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_player_id_out_of_range() {
        let _ = PlayerId::new(2);
    }

    #[test]
    fn test_player_map() {
        let mut map: PlayerMap<i32> = PlayerMap::new(|p| p.index() as i32 * 10);
        assert_eq!(map[PlayerId::FIRST], 0);
        assert_eq!(map[PlayerId::SECOND], 10);

        map[PlayerId::FIRST] = 5;
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(PlayerId::FIRST, &5), (PlayerId::SECOND, &10)]);
    }

    #[test]
    fn test_player_map_serialization() {
        let map: PlayerMap<Vec<u32>> = PlayerMap::new(|p| vec![p.index() as u32]);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<Vec<u32>> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }

    #[test]
    fn test_zone_removal() {
        let mut player = Player::new(PlayerId::FIRST);
        player.hand.extend([EntityId(1), EntityId(2)]);
        player.board.push(EntityId(3));

        assert!(player.remove_from_hand(EntityId(1)));
        assert!(!player.remove_from_hand(EntityId(1)));
        assert_eq!(player.hand, vec![EntityId(2)]);

        assert!(player.remove_from_board(EntityId(3)));
        assert!(player.board.is_empty());
    }
}
