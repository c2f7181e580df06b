// Course discovery: interest-based ranking of a caller's catalogue and
// similar-course lookup on external platforms.

pub mod handlers;
pub mod models;
pub mod prompts;
pub mod resolver;
pub mod similar;
