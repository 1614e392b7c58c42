/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The question/answer history (history.rs)
/// - Suggested questions (suggestions.rs)
/// - The orchestrating session and its submit state machine (session.rs)

pub mod data;
pub mod history;
pub mod session;
pub mod suggestions;
