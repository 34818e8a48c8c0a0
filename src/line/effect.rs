// Side-effect notifications handed to the presentation layer

use super::sequence::TokenId;

/// Direction a navigation or deletion command was moving when it hit a
/// sequence boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Where a freshly created token landed relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    After(TokenId),
    Before(TokenId),
}

/// Requests the core emits for the presentation layer to act on. The core
/// never reads presentation state back; these are fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    TokenSelected(TokenId),
    TokenDeselected(TokenId),
    TokenCreated { id: TokenId, placement: Placement },
    TokenRemoved(TokenId),
    /// Transient feedback; must never block further input.
    BoundaryReached(Direction),
    ScrollIntoView(TokenId),
}
