//! Parser module — comment directives and `.proto` sources.

pub mod comment;
pub mod directive;
pub mod proto;
pub mod support;

pub use comment::{parse_field_comment, parse_widget_comment};
