// Editor session - insertion engine and navigation over sequence + cursor

use tracing::{debug, trace};

use super::cursor::Cursor;
use super::effect::{Direction, Effect, Placement};
use super::sequence::{SequenceError, TokenId, TokenSequence};
use super::token::{split_runs, Token};

/// Aggregate owning the token sequence, the selection cursor, and the
/// queue of pending presentation effects. All mutation runs to completion
/// before the next command or transcript is applied, so every operation
/// here is atomic with respect to the others.
pub struct EditorSession {
    sequence: TokenSequence,
    cursor: Cursor,
    effects: Vec<Effect>,
}

impl EditorSession {
    /// Start a session with the sentinel in place and selected, ready to
    /// receive dictation at the end of the line.
    pub fn new() -> Self {
        let sequence = TokenSequence::new();
        let mut cursor = Cursor::new();
        let mut effects = Vec::new();
        cursor.select(&sequence, sequence.sentinel(), &mut effects);
        Self {
            sequence,
            cursor,
            effects,
        }
    }

    pub fn sequence(&self) -> &TokenSequence {
        &self.sequence
    }

    pub fn selected(&self) -> Option<TokenId> {
        self.cursor.current()
    }

    /// Hand the queued effects to the presentation layer, emptying the queue.
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Select an arbitrary token, e.g. from pointer input. Non-members are
    /// ignored by the cursor.
    pub fn select(&mut self, id: TokenId) {
        self.cursor.select(&self.sequence, id, &mut self.effects);
    }

    /// Splice a finalized transcript into the line at the current
    /// selection.
    ///
    /// Without a selection there is nowhere to anchor the insert and the
    /// transcript is deliberately dropped. When the sentinel is selected, a
    /// blank token is first inserted in front of it and becomes the anchor,
    /// so the sentinel always stays the trailing element. A lone-space
    /// anchor gets single-space tokens spliced on both sides before the
    /// parts go in, keeping fresh text from colliding with its neighbors.
    /// The first part replaces the anchor's token in place; each further
    /// part is spliced after the previous one. Afterwards the token
    /// following the last part is selected, or the last part itself if
    /// nothing follows it.
    pub fn insert_transcript(&mut self, text: &str) -> Result<(), SequenceError> {
        let Some(selected) = self.cursor.current() else {
            trace!("transcript dropped, nothing selected");
            return Ok(());
        };

        let anchor = if selected == self.sequence.sentinel() {
            let blank = self.sequence.insert_before(selected, Token::space())?;
            self.effects.push(Effect::TokenCreated {
                id: blank,
                placement: Placement::Before(selected),
            });
            blank
        } else {
            selected
        };

        let parts = split_runs(text);
        if parts.is_empty() {
            return Ok(());
        }
        debug!(parts = parts.len(), "applying transcript");

        if self.sequence.get(anchor).is_some_and(Token::is_lone_space) {
            let before = self.sequence.insert_before(anchor, Token::space())?;
            self.effects.push(Effect::TokenCreated {
                id: before,
                placement: Placement::Before(anchor),
            });
            let after = self.sequence.insert_after(anchor, Token::space())?;
            self.effects.push(Effect::TokenCreated {
                id: after,
                placement: Placement::After(anchor),
            });
        }

        let mut last = anchor;
        for (i, part) in parts.into_iter().enumerate() {
            if i == 0 {
                self.sequence.replace(anchor, part)?;
            } else {
                let id = self.sequence.insert_after(last, part)?;
                self.effects.push(Effect::TokenCreated {
                    id,
                    placement: Placement::After(last),
                });
                last = id;
            }
        }

        match self.sequence.next(last) {
            Some(following) => self.cursor.select(&self.sequence, following, &mut self.effects),
            None => self.cursor.select(&self.sequence, last, &mut self.effects),
        }
        Ok(())
    }

    /// Select the previous token, or signal the left boundary if there is
    /// none.
    pub fn move_left(&mut self) {
        let Some(selected) = self.cursor.current() else {
            self.rehome();
            return;
        };
        match self.sequence.previous(selected) {
            Some(previous) => self.cursor.select(&self.sequence, previous, &mut self.effects),
            None => self.effects.push(Effect::BoundaryReached(Direction::Left)),
        }
    }

    /// Select the next token, or signal the right boundary if there is
    /// none.
    pub fn move_right(&mut self) {
        let Some(selected) = self.cursor.current() else {
            self.rehome();
            return;
        };
        match self.sequence.next(selected) {
            Some(next) => self.cursor.select(&self.sequence, next, &mut self.effects),
            None => self.effects.push(Effect::BoundaryReached(Direction::Right)),
        }
    }

    /// Remove the selected token and re-home the selection to its
    /// predecessor. The sentinel refuses deletion with a boundary signal;
    /// deleting a token with no predecessor leaves the selection cleared.
    pub fn delete_selected(&mut self) -> Result<(), SequenceError> {
        let Some(selected) = self.cursor.current() else {
            trace!("delete ignored, nothing selected");
            return Ok(());
        };
        if selected == self.sequence.sentinel() {
            self.effects.push(Effect::BoundaryReached(Direction::Right));
            return Ok(());
        }
        self.cursor.clear(&mut self.effects);
        let predecessor = self.sequence.remove(selected)?;
        self.effects.push(Effect::TokenRemoved(selected));
        if let Some(previous) = predecessor {
            self.cursor.select(&self.sequence, previous, &mut self.effects);
        }
        Ok(())
    }

    // A cleared selection would otherwise dead-end the session: both
    // insertion and navigation anchor on it. Move commands re-home to the
    // first token instead.
    fn rehome(&mut self) {
        let first = self.sequence.first();
        self.cursor.select(&self.sequence, first, &mut self.effects);
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}
