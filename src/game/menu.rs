//! # Interaction Menu
//!
//! The Chat/Fight choice shown when the player interacts with an actor.

use crate::game::{ActorId, ActorInstance};

/// Menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuOption {
    Chat,
    Fight,
}

/// What confirming the menu leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Chat(ActorId),
    Fight(ActorId),
}

/// An open interaction menu bound to one actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionMenu {
    target: ActorId,
    selection: MenuOption,
    chat_enabled: bool,
    fight_enabled: bool,
}

impl InteractionMenu {
    /// Opens the menu for an actor.
    ///
    /// Beaten story NPCs only offer Chat, minions only offer Fight. A beaten minion
    /// offers nothing and no menu opens.
    pub fn open(target: &ActorInstance, defeated: bool) -> Option<Self> {
        let (chat_enabled, fight_enabled, selection) = match (defeated, target.is_minion()) {
            (true, true) => return None,
            (true, false) => (true, false, MenuOption::Chat),
            (false, true) => (false, true, MenuOption::Fight),
            (false, false) => (true, true, MenuOption::Chat),
        };

        Some(Self {
            target: target.id,
            selection,
            chat_enabled,
            fight_enabled,
        })
    }

    pub fn target(&self) -> ActorId {
        self.target
    }

    pub fn selection(&self) -> MenuOption {
        self.selection
    }

    pub fn is_enabled(&self, option: MenuOption) -> bool {
        match option {
            MenuOption::Chat => self.chat_enabled,
            MenuOption::Fight => self.fight_enabled,
        }
    }

    /// Moves the cursor to the other entry when both are available.
    pub fn toggle(&mut self) {
        if self.chat_enabled && self.fight_enabled {
            self.selection = match self.selection {
                MenuOption::Chat => MenuOption::Fight,
                MenuOption::Fight => MenuOption::Chat,
            };
        }
    }

    /// Confirms the current entry.
    pub fn confirm(&self) -> MenuChoice {
        match self.selection {
            MenuOption::Chat => MenuChoice::Chat(self.target),
            MenuOption::Fight => MenuChoice::Fight(self.target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{new_actor_id, ActorKind, CombatStats, Position, Rect, SpecRef};

    fn actor(kind: ActorKind) -> ActorInstance {
        ActorInstance {
            id: new_actor_id(),
            spec: SpecRef {
                scene: 0,
                kind,
                index: 0,
            },
            name: "Someone".to_string(),
            position: Position::origin(),
            footprint: Rect::centered(Position::origin(), 40.0, 56.0),
            sprite: "s.png".to_string(),
            avatar: "a.png".to_string(),
            stats: CombatStats::npc_default(),
            disabled: false,
        }
    }

    #[test]
    fn test_npc_menu_defaults_to_chat_and_toggles() {
        let npc = actor(ActorKind::Npc);
        let mut menu = InteractionMenu::open(&npc, false).unwrap();
        assert_eq!(menu.selection(), MenuOption::Chat);
        assert_eq!(menu.confirm(), MenuChoice::Chat(npc.id));

        menu.toggle();
        assert_eq!(menu.confirm(), MenuChoice::Fight(npc.id));
        menu.toggle();
        assert_eq!(menu.selection(), MenuOption::Chat);
    }

    #[test]
    fn test_minion_menu_is_fight_only() {
        let minion = actor(ActorKind::Minion);
        let mut menu = InteractionMenu::open(&minion, false).unwrap();
        assert!(!menu.is_enabled(MenuOption::Chat));
        menu.toggle();
        assert_eq!(menu.confirm(), MenuChoice::Fight(minion.id));
    }

    #[test]
    fn test_defeated_npc_is_chat_only() {
        let npc = actor(ActorKind::Npc);
        let mut menu = InteractionMenu::open(&npc, true).unwrap();
        assert!(!menu.is_enabled(MenuOption::Fight));
        menu.toggle();
        assert_eq!(menu.confirm(), MenuChoice::Chat(npc.id));
    }

    #[test]
    fn test_defeated_minion_opens_nothing() {
        assert!(InteractionMenu::open(&actor(ActorKind::Minion), true).is_none());
    }
}
