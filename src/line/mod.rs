//! The tokenized line editor core.
//!
//! A line of dictated text is held as discrete word and whitespace tokens
//! in a sequence with a permanent trailing sentinel. A single cursor
//! selects the token that navigation, insertion, and deletion target.
//! Transcripts arriving from the speech collaborator are split into
//! maximal runs and spliced at the selection; the presentation layer is
//! driven purely by the emitted [`Effect`] notifications.

pub mod cursor;
pub mod effect;
pub mod sequence;
pub mod session;
pub mod token;

pub use cursor::Cursor;
pub use effect::{Direction, Effect, Placement};
pub use sequence::{SequenceError, TokenId, TokenSequence};
pub use session::EditorSession;
pub use token::{split_runs, Token, TokenKind};
