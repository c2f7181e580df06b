// Learning paths: generated course roadmaps and performance-based module suggestions.

pub mod handlers;
pub mod prompts;
pub mod roadmap;
