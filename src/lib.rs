pub mod actors;
pub mod cli;
pub mod error;
pub mod github;
pub mod lookup;
pub mod models;
pub mod render;
pub mod report;
pub mod tui;
pub mod types;
