//! Helper functions shared by the page renderers and components

mod date;
mod html;

pub use date::*;
pub use html::*;
