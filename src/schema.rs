//! Read-only view of the two widget schemas.
//!
//! The aggregator only sees declaration names, declared types and leading
//! comments. [`Schema::from_proto`] builds the view from parsed `.proto`
//! files: the kinds are the values of a nested enum in the kind file
//! (`Widget.Type` by default), the data messages are the top-level messages
//! of the data file.

use crate::error::SchemaError;
use crate::parser::proto::ProtoFile;
use std::collections::HashSet;

/// Default location of the widget kinds enum inside the kind file.
pub const DEFAULT_KIND_ENUM: &str = "Widget.Type";

/// One widget kind: an enum value and its leading comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindDecl {
    pub name: String,
    pub comment: String,
}

/// One field of a widget data message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    /// Kind name of the field type, e.g. `string`, `enum`, `message`.
    pub type_name: String,
    pub comment: String,
}

/// One widget data message with its fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataMessageDecl {
    pub name: String,
    pub fields: Vec<FieldDecl>,
}

/// Everything the aggregator needs from both schema files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    pub kinds: Vec<KindDecl>,
    pub messages: Vec<DataMessageDecl>,
}

impl Schema {
    /// Build the view from the kind file and the data file.
    pub fn from_proto(
        kind_file: &ProtoFile,
        data_file: &ProtoFile,
        kind_enum: &str,
    ) -> Result<Self, SchemaError> {
        let kind_enum_def = kind_file
            .enum_at(kind_enum)
            .ok_or_else(|| SchemaError::KindEnumNotFound(kind_enum.to_string()))?;

        let kinds = kind_enum_def
            .values
            .iter()
            .map(|v| KindDecl {
                name: v.name.clone(),
                comment: v.comment.clone(),
            })
            .collect();

        let enums: HashSet<&str> = kind_file
            .enum_names()
            .into_iter()
            .chain(data_file.enum_names())
            .collect();

        let messages = data_file
            .messages
            .iter()
            .map(|m| DataMessageDecl {
                name: m.name.clone(),
                fields: m
                    .fields
                    .iter()
                    .map(|f| FieldDecl {
                        name: f.name.clone(),
                        type_name: f.kind_name(|n| enums.contains(n)),
                        comment: f.comment.clone(),
                    })
                    .collect(),
            })
            .collect();

        Ok(Schema { kinds, messages })
    }
}
