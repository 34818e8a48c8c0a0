// Render state snapshot handed to the UI each frame

use super::mode::AppMode;
use crate::line::{Direction, EditorSession, TokenKind};

/// One token prepared for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCell {
    pub text: String,
    pub kind: TokenKind,
    pub selected: bool,
    pub sentinel: bool,
}

/// Snapshot of everything the UI needs to draw a frame. The UI never
/// reads editor state directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderState {
    pub mode: AppMode,
    pub status: String,
    pub interim: Option<String>,
    pub notice: Option<String>,
    pub command_input: String,
    pub tokens: Vec<TokenCell>,
    /// Index of the selected cell in `tokens`.
    pub selected: Option<usize>,
    pub flash: Option<Direction>,
}

/// Project the token sequence into display cells, tagging the selected
/// cell and the sentinel.
pub fn token_cells(session: &EditorSession) -> (Vec<TokenCell>, Option<usize>) {
    let selected_id = session.selected();
    let sentinel = session.sequence().sentinel();
    let mut selected = None;
    let cells = session
        .sequence()
        .iter()
        .enumerate()
        .map(|(i, (id, token))| {
            let is_selected = Some(id) == selected_id;
            if is_selected {
                selected = Some(i);
            }
            TokenCell {
                text: token.text().to_string(),
                kind: token.kind(),
                selected: is_selected,
                sentinel: id == sentinel,
            }
        })
        .collect();
    (cells, selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_mirror_the_sequence() {
        let mut session = EditorSession::new();
        session.insert_transcript("hi there").unwrap();
        let (cells, _) = token_cells(&session);
        let texts: Vec<&str> = cells.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec![" ", "hi", " ", "there", " ", " "]);
    }

    #[test]
    fn test_exactly_one_cell_selected() {
        let mut session = EditorSession::new();
        session.insert_transcript("a b c").unwrap();
        session.move_left();
        let (cells, selected) = token_cells(&session);
        let marked = cells.iter().filter(|c| c.selected).count();
        assert_eq!(marked, 1);
        assert!(cells[selected.unwrap()].selected);
    }

    #[test]
    fn test_sentinel_is_the_last_cell() {
        let mut session = EditorSession::new();
        session.insert_transcript("word").unwrap();
        let (cells, _) = token_cells(&session);
        assert!(cells.last().unwrap().sentinel);
        assert_eq!(cells.iter().filter(|c| c.sentinel).count(), 1);
    }

    #[test]
    fn test_no_cell_selected_after_clear() {
        let mut session = EditorSession::new();
        session.insert_transcript("solo").unwrap();
        while session.selected() != Some(session.sequence().first()) {
            session.move_left();
        }
        session.delete_selected().unwrap();
        let (cells, selected) = token_cells(&session);
        assert_eq!(selected, None);
        assert!(cells.iter().all(|c| !c.selected));
    }
}
