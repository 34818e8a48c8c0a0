// Selection cursor - at most one token selected at a time

use super::effect::Effect;
use super::sequence::{TokenId, TokenSequence};

/// Tracks the single currently-selected token. Every select is an atomic
/// swap: the previous token is deselected before the new one is marked.
#[derive(Debug, Default)]
pub struct Cursor {
    selected: Option<TokenId>,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<TokenId> {
        self.selected
    }

    /// Select `id`, deselecting the previous target first and requesting a
    /// scroll-into-view. Selecting a token that is not a member of the
    /// sequence is a defensive no-op.
    pub fn select(&mut self, seq: &TokenSequence, id: TokenId, effects: &mut Vec<Effect>) {
        if !seq.contains(id) {
            return;
        }
        if let Some(previous) = self.selected.take() {
            effects.push(Effect::TokenDeselected(previous));
        }
        self.selected = Some(id);
        effects.push(Effect::TokenSelected(id));
        effects.push(Effect::ScrollIntoView(id));
    }

    /// Deselect without selecting a replacement. Used only when a deletion
    /// leaves no valid token to re-home to.
    pub fn clear(&mut self, effects: &mut Vec<Effect>) {
        if let Some(previous) = self.selected.take() {
            effects.push(Effect::TokenDeselected(previous));
        }
    }
}
