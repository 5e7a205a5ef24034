//! widget-doc — validate widget annotations in `.proto` files and render a
//! client support report.
//!
//! Widget kinds are the values of an enum in one schema file; each kind has a
//! `<Kind>Data` message in a second file. Their leading comments carry
//! directives:
//!
//! ```text
//! // @support: android(8080-), ios(8081-8082), web
//! // @design: https://design.example.com/selector-row
//! // @widgetify: https://widgetify.example.com/selector-row
//! SELECTOR_ROW = 12;
//! ```
//!
//! ## Module Structure
//!
//! - `parser`: directive tokenizer, `@support` parser, comment structures,
//!   `.proto` reader
//! - `schema`: read-only view of kinds and data messages
//! - `names`: join keys for kinds and data messages
//! - `aggregate`: joins both schemas and checks completeness
//! - `render`: markdown and JSON reports

pub mod aggregate;
pub mod error;
pub mod model;
pub mod names;
pub mod parser;
pub mod render;
pub mod schema;

use aggregate::Exclusion;
use anyhow::{Context, Result};
use model::DocumentationSet;
use schema::Schema;

/// Source text of both schema files plus the location of the kinds enum.
pub struct Sources<'a> {
    pub kind_file: &'a str,
    pub kind_source: &'a str,
    pub data_file: &'a str,
    pub data_source: &'a str,
    pub kind_enum: &'a str,
}

/// Parse both files and build the documentation set.
pub fn generate(sources: &Sources<'_>, exclusion: &Exclusion) -> Result<DocumentationSet> {
    let kind_file = parser::proto::parse(sources.kind_source)
        .with_context(|| format!("failed to parse {}", sources.kind_file))?;
    let data_file = parser::proto::parse(sources.data_source)
        .with_context(|| format!("failed to parse {}", sources.data_file))?;

    let schema = Schema::from_proto(&kind_file, &data_file, sources.kind_enum)
        .with_context(|| format!("failed to read widget kinds from {}", sources.kind_file))?;
    tracing::info!(
        kinds = schema.kinds.len(),
        messages = schema.messages.len(),
        "read widget schema"
    );

    Ok(aggregate::aggregate(&schema, exclusion)?)
}
