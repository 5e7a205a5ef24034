//! Error types for comment parsing, schema reading and aggregation.

use thiserror::Error;

/// A problem with the directives of a single documentation comment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommentError {
    #[error("directive {0} appears more than once, it may be given at most once")]
    DuplicateDirective(String),

    #[error("unknown directive {0}, expected one of @support, @design, @widgetify")]
    UnknownDirective(String),

    #[error("{0} should be provided in comment")]
    MissingDirective(&'static str),

    #[error("{directive} url format is not correct: {value:?}")]
    InvalidUrl {
        directive: &'static str,
        value: String,
    },

    #[error("@support has unknown platform {0:?}, expected 'android', 'ios' or 'web'")]
    UnknownPlatform(String),

    #[error("@support {0} provided more than once, should be at most one")]
    DuplicateSupportPlatform(String),

    #[error("@support {platform} didn't follow the specified format: {reason}")]
    MalformedRange {
        platform: String,
        reason: String,
    },
}

impl CommentError {
    pub(crate) fn malformed(platform: &str, reason: impl Into<String>) -> Self {
        Self::MalformedRange {
            platform: platform.to_string(),
            reason: reason.into(),
        }
    }
}

/// A failure while building the documentation set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocError {
    #[error("{name}: {source}")]
    Declaration {
        name: String,
        #[source]
        source: CommentError,
    },

    #[error("no fields documented for widget: {0}")]
    NoFieldsDocumented(String),

    #[error("{first} and {second} both map to widget key {key:?}")]
    NameCollision {
        key: String,
        first: String,
        second: String,
    },
}

/// A failure while reading a `.proto` source file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("enum {0} not found in kind file")]
    KindEnumNotFound(String),
}
