//! Server-rendered HTML shared by every page.

pub mod components;
pub mod layout;

pub use layout::{bare_page, page};
