//! Typed comment structures built from directives.

use super::directive::{self, DESIGN, SUPPORT, WIDGETIFY};
use super::support;
use crate::error::CommentError;
use crate::model::{PlatformSupport, WidgetMeta};
use std::collections::HashMap;
use url::Url;

/// Parse the comment of a widget kind (an enum value of the kinds enum).
///
/// Requires `@support`, `@design` and `@widgetify`.
pub fn parse_widget_comment(comment: &str) -> Result<WidgetMeta, CommentError> {
    let directives = directive::tokenize(comment)?;

    let support_value = required(&directives, SUPPORT)?;
    let design_value = required(&directives, DESIGN)?;
    let widgetify_value = required(&directives, WIDGETIFY)?;

    let support = support::parse(support_value)?;
    let design_url = parse_url(DESIGN, design_value)?;
    let widgetify_url = parse_url(WIDGETIFY, widgetify_value)?;

    Ok(WidgetMeta {
        support,
        design_url,
        widgetify_url,
    })
}

/// Parse the comment of a widget data message field.
///
/// Only `@support` is required; the caller fills in name and type.
pub fn parse_field_comment(comment: &str) -> Result<PlatformSupport, CommentError> {
    let directives = directive::tokenize(comment)?;
    support::parse(required(&directives, SUPPORT)?)
}

fn required<'a>(
    directives: &'a HashMap<String, String>,
    name: &'static str,
) -> Result<&'a str, CommentError> {
    match directives.get(name) {
        Some(value) if !value.is_empty() => Ok(value.as_str()),
        _ => Err(CommentError::MissingDirective(name)),
    }
}

/// Validate a link and keep it as written.
fn parse_url(directive: &'static str, value: &str) -> Result<String, CommentError> {
    match Url::parse(value) {
        Ok(_) => Ok(value.to_string()),
        Err(_) => Err(CommentError::InvalidUrl {
            directive,
            value: value.to_string(),
        }),
    }
}
