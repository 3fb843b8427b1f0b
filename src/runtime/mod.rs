//! Runtime module - drives the update loop outside of tests
//!
//! - `app` - message loop, command processing and terminal output
//! - `timer` - debounce timer threads

pub mod app;
pub mod timer;

pub use app::App;
