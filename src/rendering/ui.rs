//! # User Interface Elements
//!
//! Panels, bars and text layout for the menu, dialogue box, battle panel and
//! status profile.

use crate::game::{InteractionMenu, MenuOption};
use macroquad::prelude::*;

/// One row of the interaction menu as drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRow {
    pub label: &'static str,
    pub selected: bool,
}

/// The rows to draw for a menu. Disabled entries are hidden.
pub fn menu_rows(menu: &InteractionMenu) -> Vec<MenuRow> {
    [(MenuOption::Chat, "Chat"), (MenuOption::Fight, "Fight")]
        .into_iter()
        .filter(|(option, _)| menu.is_enabled(*option))
        .map(|(option, label)| MenuRow {
            label,
            selected: menu.selection() == option,
        })
        .collect()
}

/// Splits text into lines of at most `max_chars` characters at word boundaries.
///
/// A single word longer than the limit gets its own line.
///
/// # Examples
///
/// ```
/// use taleplay::wrap_text;
///
/// assert_eq!(wrap_text("the quick brown fox", 10), vec!["the quick", "brown fox"]);
/// ```
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Fraction of a bar to fill, safe for a zero maximum.
pub fn bar_fraction(value: u32, max: u32) -> f32 {
    if max == 0 {
        0.0
    } else {
        (value as f32 / max as f32).clamp(0.0, 1.0)
    }
}

/// Draws a translucent panel with a border.
pub fn draw_panel(x: f32, y: f32, w: f32, h: f32) {
    draw_rectangle(x, y, w, h, Color::new(0.0, 0.0, 0.0, 0.8));
    draw_rectangle_lines(x, y, w, h, 2.0, WHITE);
}

/// Draws a horizontal fill bar.
pub fn draw_bar(x: f32, y: f32, w: f32, h: f32, fraction: f32, fill: Color) {
    draw_rectangle(x, y, w, h, DARKGRAY);
    draw_rectangle(x, y, w * fraction.clamp(0.0, 1.0), h, fill);
    draw_rectangle_lines(x, y, w, h, 1.0, WHITE);
}

/// Draws text lines top to bottom starting at `y`. Returns the y below the last line.
pub fn draw_lines(lines: &[String], x: f32, y: f32, size: f32, color: Color) -> f32 {
    let mut line_y = y;
    for line in lines {
        draw_text(line, x, line_y, size, color);
        line_y += size * 1.2;
    }
    line_y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{new_actor_id, ActorInstance, ActorKind, CombatStats, Position, SpecRef};

    fn npc() -> ActorInstance {
        ActorInstance {
            id: new_actor_id(),
            spec: SpecRef {
                scene: 0,
                kind: ActorKind::Npc,
                index: 0,
            },
            name: "Sage".to_string(),
            position: Position::origin(),
            footprint: crate::game::Rect::centered(Position::origin(), 40.0, 56.0),
            sprite: "sage.png".to_string(),
            avatar: "sage.png".to_string(),
            stats: CombatStats::npc_default(),
            disabled: false,
        }
    }

    #[test]
    fn test_menu_rows_hide_disabled_entries() {
        let actor = npc();
        let rows = menu_rows(&InteractionMenu::open(&actor, false).unwrap());
        assert_eq!(rows.len(), 2);
        assert!(rows[0].selected);

        let rows = menu_rows(&InteractionMenu::open(&actor, true).unwrap());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "Chat");
    }

    #[test]
    fn test_wrap_text() {
        assert!(wrap_text("", 10).is_empty());
        assert_eq!(wrap_text("abcdefghijkl xy", 5), vec!["abcdefghijkl", "xy"]);
        assert_eq!(wrap_text("a b c", 80), vec!["a b c"]);
    }

    #[test]
    fn test_bar_fraction() {
        assert_eq!(bar_fraction(50, 100), 0.5);
        assert_eq!(bar_fraction(5, 0), 0.0);
        assert_eq!(bar_fraction(150, 100), 1.0);
    }
}
