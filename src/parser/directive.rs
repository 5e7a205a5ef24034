//! `@directive: value` tokenizer for documentation comments.
//!
//! Directives must sit at the start of a line:
//!
//! ```text
//! /*
//!   A row with a selectable value.
//!
//!   @support: android(8080-), ios(8081-8082), web
//!   @design: https://design.example.com/selector-row
//! */
//! ```
//!
//! Lines without a `:` or whose left part does not start with `@` are prose
//! and ignored.

use crate::error::CommentError;
use std::collections::HashMap;

pub const SUPPORT: &str = "@support";
pub const DESIGN: &str = "@design";
pub const WIDGETIFY: &str = "@widgetify";

/// Every directive the comment language knows about.
pub const VOCABULARY: &[&str] = &[SUPPORT, DESIGN, WIDGETIFY];

/// Split a comment into a map of directive token to trimmed value.
pub fn tokenize(comment: &str) -> Result<HashMap<String, String>, CommentError> {
    let mut directives = HashMap::new();

    for line in comment.trim().lines() {
        let Some((token, value)) = line.trim().split_once(':') else {
            continue;
        };
        let token = token.trim();
        if !token.starts_with('@') {
            continue;
        }
        if !VOCABULARY.contains(&token) {
            return Err(CommentError::UnknownDirective(token.to_string()));
        }
        if directives.contains_key(token) {
            return Err(CommentError::DuplicateDirective(token.to_string()));
        }
        directives.insert(token.to_string(), value.trim().to_string());
    }

    Ok(directives)
}
