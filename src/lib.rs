//! voxline - a dictation line editor for the terminal.
//!
//! A recognition engine appends finalized utterances to a single line of
//! word and whitespace tokens while the keyboard navigates, selects, and
//! prunes them. The editor core lives in [`line`]; [`speech`] is the
//! recognizer seam, [`app`] the aggregate state machine, and [`ui`] the
//! ratatui presentation.

pub mod app;
pub mod line;
pub mod logging;
pub mod speech;
pub mod ui;
