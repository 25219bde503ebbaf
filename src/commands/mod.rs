pub mod extract;
pub mod fetch;
pub mod get;
pub mod progress;
