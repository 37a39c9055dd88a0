//! # Dialogue
//!
//! Line-by-line conversation with an NPC.

use crate::generation::DialogueLine;

/// The line currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedLine {
    pub speaker: String,
    pub text: String,
    /// Avatar shown next to the text
    pub avatar: String,
}

/// Result of advancing a dialogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueStep {
    /// A new line is on screen
    Shown(DisplayedLine),
    /// All lines were shown; the session is over
    Finished,
}

/// An open conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueSession {
    lines: Vec<DialogueLine>,
    cursor: usize,
    speaker_avatar: String,
    player_name: String,
    player_avatar: String,
    current: Option<DisplayedLine>,
}

impl DialogueSession {
    /// Opens a conversation and shows its first line.
    ///
    /// Returns `None` when there is nothing to say.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleplay::{DialogueLine, DialogueSession};
    ///
    /// assert!(DialogueSession::start(Vec::new(), "npc.png", "Hero", "hero.png").is_none());
    ///
    /// let lines = vec![DialogueLine::new("Hero", "Hi"), DialogueLine::new("Sage", "Hello")];
    /// let session = DialogueSession::start(lines, "npc.png", "Hero", "hero.png").unwrap();
    /// assert_eq!(session.current().unwrap().avatar, "hero.png");
    /// ```
    pub fn start(
        lines: Vec<DialogueLine>,
        speaker_avatar: impl Into<String>,
        player_name: impl Into<String>,
        player_avatar: impl Into<String>,
    ) -> Option<Self> {
        if lines.is_empty() {
            return None;
        }

        let mut session = Self {
            lines,
            cursor: 0,
            speaker_avatar: speaker_avatar.into(),
            player_name: player_name.into(),
            player_avatar: player_avatar.into(),
            current: None,
        };
        session.advance();
        Some(session)
    }

    /// Shows the next line, or finishes once every line has been shown.
    pub fn advance(&mut self) -> DialogueStep {
        let Some(line) = self.lines.get(self.cursor) else {
            self.current = None;
            return DialogueStep::Finished;
        };

        let avatar = if !self.player_name.is_empty() && line.speaker == self.player_name {
            self.player_avatar.clone()
        } else {
            self.speaker_avatar.clone()
        };
        let shown = DisplayedLine {
            speaker: line.speaker.clone(),
            text: line.text.clone(),
            avatar,
        };
        self.cursor += 1;
        self.current = Some(shown.clone());
        DialogueStep::Shown(shown)
    }

    pub fn current(&self) -> Option<&DisplayedLine> {
        self.current.as_ref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines() -> Vec<DialogueLine> {
        vec![
            DialogueLine::new("Hermione", "Where were you?"),
            DialogueLine::new("Harry", "Library."),
            DialogueLine::new("Hermione", "Sure."),
        ]
    }

    fn open() -> DialogueSession {
        DialogueSession::start(lines(), "hermione.png", "Harry", "harry.png").unwrap()
    }

    #[test]
    fn test_start_shows_first_line() {
        let session = open();
        assert_eq!(session.cursor(), 1);
        let line = session.current().unwrap();
        assert_eq!(line.speaker, "Hermione");
        assert_eq!(line.avatar, "hermione.png");
    }

    #[test]
    fn test_player_lines_use_player_avatar() {
        let mut session = open();
        match session.advance() {
            DialogueStep::Shown(line) => {
                assert_eq!(line.text, "Library.");
                assert_eq!(line.avatar, "harry.png");
            }
            DialogueStep::Finished => panic!("dialogue ended early"),
        }
    }

    #[test]
    fn test_closes_after_len_advances() {
        let mut session = open();
        let n = session.len();
        for _ in 0..n - 1 {
            assert!(matches!(session.advance(), DialogueStep::Shown(_)));
        }
        assert_eq!(session.advance(), DialogueStep::Finished);
        assert!(session.current().is_none());
    }

    #[test]
    fn test_single_line_closes_on_first_advance() {
        let mut session = DialogueSession::start(
            vec![DialogueLine::new("Owl", "Hoot")],
            "owl.png",
            "Harry",
            "harry.png",
        )
        .unwrap();
        assert_eq!(session.advance(), DialogueStep::Finished);
    }

    #[test]
    fn test_empty_player_name_never_matches() {
        let session = DialogueSession::start(
            vec![DialogueLine::new("", "...")],
            "npc.png",
            "",
            "hero.png",
        )
        .unwrap();
        assert_eq!(session.current().unwrap().avatar, "npc.png");
    }
}
