//! Bridge between the UI thread and the backend worker that performs fetches.

pub mod commands;
pub mod runtime;
