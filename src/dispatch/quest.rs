//! The quest engine: admission, progress, and completion of quests,
//! sidequests and secrets.

use tracing::{debug, info, trace};

use crate::cards::Ability;
use crate::core::{Game, Notification, PlayerId};
use crate::error::Result;
use crate::events::{Event, ListenerMessage, Quest, QuestContext, QuestId, QuestKind, QuestTemplate};

impl Game {
    /// Start a quest, sidequest or secret for the owner of its card.
    ///
    /// Rejected if the owner's list is full, or (for secrets and sidequests)
    /// already holds one with the same name. A rejected quest's card goes
    /// back to its owner's hand and `Ok(false)` is returned.
    pub fn add_quest(&mut self, template: QuestTemplate) -> Result<bool> {
        let card = self.card(template.card)?;
        let (owner, name) = (card.owner, card.name.clone());

        let (limit, unique_names) = match template.kind {
            QuestKind::Quest => (self.config.max_quests, false),
            QuestKind::Sidequest => (self.config.max_sidequests, true),
            QuestKind::Secret => (self.config.max_secrets, true),
        };

        let list = self.players[owner].quest_list(template.kind);
        if list.len() >= limit || (unique_names && list.iter().any(|q| q.name == name)) {
            debug!(%name, kind = %template.kind, %owner, "quest rejected");
            self.add_to_hand(template.card)?;
            return Ok(false);
        }

        let id = self.events.next_quest_id();
        let kind = template.kind;
        debug!(quest = %id, %name, %kind, %owner, "quest started");

        let quest = template.into_quest(id, name, owner);
        self.players[owner].quest_list_mut(kind).push(quest);
        Ok(true)
    }

    /// Manually advance a player's quest, looked up by name.
    ///
    /// Returns the new progress, or `None` if the player has no such quest.
    /// Progress stops at the maximum; the quest completes on its next
    /// matching broadcast.
    pub fn progress_quest(&mut self, player: PlayerId, name: &str, amount: u32) -> Option<u32> {
        let quest = self.players[player].find_quest_mut(name)?;
        quest.progress.advance(amount);
        Some(quest.progress.current())
    }

    /// Run one quest list against an event.
    pub(crate) fn update_quests(&mut self, kind: QuestKind, event: &Event, owner: PlayerId) -> Result<bool> {
        let trigger = event.kind();
        let ids: Vec<QuestId> = self.players[owner]
            .quest_list(kind)
            .iter()
            .filter(|q| q.trigger == trigger)
            .map(|q| q.id)
            .collect();

        for id in ids {
            // Removed by an earlier callback.
            let Some(quest) = self.quest_mut(owner, kind, id) else {
                continue;
            };

            if quest.progress.is_saturated() {
                if let Some(quest) = self.take_quest(owner, kind, id) {
                    self.finish_quest(quest)?;
                }
                continue;
            }

            let done = quest.progress.next_completes();
            let callback = quest.callback();
            let ctx = QuestContext {
                quest: id,
                card: quest.card,
                owner,
                event,
                done,
            };

            trace!(quest = %id, %kind, done, "updating quest");
            match callback(self, &ctx)? {
                ListenerMessage::Skip => continue,
                ListenerMessage::Reset => {
                    if let Some(quest) = self.quest_mut(owner, kind, id) {
                        quest.progress.reset();
                    }
                    continue;
                }
                ListenerMessage::Destroy => {
                    self.take_quest(owner, kind, id);
                    continue;
                }
                ListenerMessage::Success => {
                    let Some(quest) = self.quest_mut(owner, kind, id) else {
                        continue;
                    };
                    quest.progress.advance(1);
                }
            }

            if done {
                if let Some(quest) = self.take_quest(owner, kind, id) {
                    self.finish_quest(quest)?;
                }
            }
        }

        Ok(true)
    }

    fn finish_quest(&mut self, quest: Quest) -> Result<()> {
        let owner = quest.owner;
        info!(quest = %quest.id, name = %quest.name, kind = %quest.kind, %owner, "quest completed");

        if quest.kind == QuestKind::Secret {
            info!(name = %quest.name, triggered_by = %owner.opponent(), "secret triggered");
            self.notify(Notification::SecretTriggered {
                owner,
                triggered_by: owner.opponent(),
                name: quest.name.clone(),
            });
        }

        if let Some(next) = quest.next {
            info!(%next, %owner, "continuing questline");
            let card = self.create_card(next, owner)?;
            self.trigger(card, Ability::Cast, None, Some(owner))?;
        }

        Ok(())
    }

    fn quest_mut(&mut self, owner: PlayerId, kind: QuestKind, id: QuestId) -> Option<&mut Quest> {
        self.players[owner]
            .quest_list_mut(kind)
            .iter_mut()
            .find(|q| q.id == id)
    }

    fn take_quest(&mut self, owner: PlayerId, kind: QuestKind, id: QuestId) -> Option<Quest> {
        let list = self.players[owner].quest_list_mut(kind);
        let pos = list.iter().position(|q| q.id == id)?;
        Some(list.remove(pos))
    }
}
