//! Search bar input.
//!
//! Holds the text typed after `/`. Matching itself happens in the session;
//! this module only edits the query string.

mod state;

pub use state::SearchInput;
