//! Helper functions shared by the page templates

mod html;
mod url;

pub use html::*;
pub use url::*;
