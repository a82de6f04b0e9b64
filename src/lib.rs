pub mod config;
pub mod fallback;
pub mod http;
pub mod model;
pub mod orchestrator;
pub mod prompt;
pub mod session;
pub mod types;
