//! Join widget kinds with their data messages.
//!
//! The kind enum and the data messages are declared independently and only
//! linked by naming convention (`SELECTOR_ROW` ↔ `SelectorRowData`). Both
//! passes upsert into the same keyed set, so either may run first.

use crate::error::DocError;
use crate::model::{DocumentationSet, WidgetDoc, WidgetField};
use crate::names::{normalize_data_message, normalize_kind};
use crate::parser::{parse_field_comment, parse_widget_comment};
use crate::schema::{DataMessageDecl, KindDecl, Schema};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Value of `exclude` that turns the completeness check off.
pub const EXCLUDE_ALL: &str = "__ALL__";

/// Widgets exempt from the "must have documented fields" check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exclusion {
    All,
    /// Declared kind identifiers, e.g. `SELECTOR_ROW`.
    Names(HashSet<String>),
}

impl Default for Exclusion {
    fn default() -> Self {
        Self::Names(HashSet::new())
    }
}

impl Exclusion {
    /// Parse a dash-separated list: `SELECTOR_ROW-MY_WIDGET`.
    /// `__ALL__` anywhere in the list excludes everything.
    pub fn parse(list: &str) -> Self {
        let names: HashSet<String> = list
            .split('-')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if names.contains(EXCLUDE_ALL) {
            Self::All
        } else {
            Self::Names(names)
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Names(names) => names.contains(name),
        }
    }
}

/// Two-phase builder for a [`DocumentationSet`].
#[derive(Debug, Default)]
pub struct Aggregator {
    set: DocumentationSet,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kind pass: parse each kind comment and set display name and metadata.
    pub fn add_kinds(&mut self, kinds: &[KindDecl]) -> Result<(), DocError> {
        for kind in kinds {
            let key = normalize_kind(&kind.name);
            let meta = parse_widget_comment(&kind.comment).map_err(|source| {
                DocError::Declaration {
                    name: kind.name.clone(),
                    source,
                }
            })?;

            let doc = self.set.widgets.entry(key.clone()).or_default();
            if let Some(first) = &doc.display_name {
                return Err(DocError::NameCollision {
                    key,
                    first: first.clone(),
                    second: kind.name.clone(),
                });
            }
            debug!(kind = %kind.name, key = %key, "documented widget kind");
            doc.display_name = Some(kind.name.clone());
            doc.meta = Some(meta);
        }
        Ok(())
    }

    /// Message pass: parse every field comment and set the field list.
    pub fn add_data_messages(&mut self, messages: &[DataMessageDecl]) -> Result<(), DocError> {
        for message in messages {
            let key = normalize_data_message(&message.name);

            let fields = message
                .fields
                .iter()
                .map(|field| {
                    let support = parse_field_comment(&field.comment).map_err(|source| {
                        DocError::Declaration {
                            name: format!("{}.{}", message.name, field.name),
                            source,
                        }
                    })?;
                    Ok(WidgetField {
                        name: field.name.clone(),
                        type_name: field.type_name.clone(),
                        support,
                    })
                })
                .collect::<Result<Vec<_>, DocError>>()?;

            let doc = self.set.widgets.entry(key.clone()).or_default();
            if let Some(first) = &doc.data_message {
                return Err(DocError::NameCollision {
                    key,
                    first: first.clone(),
                    second: message.name.clone(),
                });
            }
            debug!(data_message = %message.name, key = %key, fields = fields.len(), "documented widget data");
            doc.data_message = Some(message.name.clone());
            doc.fields = Some(fields);
        }
        Ok(())
    }

    /// Enforce completeness and hand out the finished set.
    pub fn finish(self, exclusion: &Exclusion) -> Result<DocumentationSet, DocError> {
        for (key, doc) in &self.set.widgets {
            if doc.display_name.is_none() {
                warn!(
                    key = %key,
                    data_message = doc.data_message.as_deref().unwrap_or_default(),
                    "data message has no matching widget kind, leaving it out of the report"
                );
            }
        }

        if matches!(exclusion, Exclusion::All) {
            return Ok(self.set);
        }

        for (key, doc) in &self.set.widgets {
            if doc.fields.is_some() {
                continue;
            }
            let excluded = doc
                .display_name
                .as_deref()
                .is_some_and(|name| exclusion.contains(name));
            if !excluded {
                return Err(DocError::NoFieldsDocumented(key.clone()));
            }
        }

        Ok(self.set)
    }
}

/// Build the documentation set for a schema: kind pass, message pass,
/// completeness check.
pub fn aggregate(schema: &Schema, exclusion: &Exclusion) -> Result<DocumentationSet, DocError> {
    let mut aggregator = Aggregator::new();
    aggregator.add_kinds(&schema.kinds)?;
    aggregator.add_data_messages(&schema.messages)?;
    aggregator.finish(exclusion)
}

/// Widgets in the set that never received a kind declaration.
pub fn orphans(set: &DocumentationSet) -> Vec<&WidgetDoc> {
    set.widgets
        .values()
        .filter(|doc| doc.display_name.is_none())
        .collect()
}
