// Student profiling: maps a free-text "about me" to catalogue interest tags.

pub mod handlers;
pub mod prompts;
pub mod tagging;
