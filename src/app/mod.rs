//! Application layer
//!
//! Provides:
//! - [`AppState`], created once and passed by reference
//! - Feed analysis for a username
//! - The interactive menu

mod feed;
mod session;
mod state;

pub use feed::{analyze_feed, normalize_username};
pub use session::run_interactive;
pub use state::AppState;
