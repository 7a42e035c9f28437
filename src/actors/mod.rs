pub mod debounce;
pub mod search_controller;

pub use search_controller::{SearchController, SearchControllerConfig, SearchControllerMessage, SearchStats};
