//! Data model for widget documentation — format-agnostic.

use std::collections::BTreeMap;

/// Inclusive version range for one client platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionRange {
    pub min: u32,
    /// `None` means supported from `min` up to the current release.
    pub max: Option<u32>,
}

/// Parsed `@support` directive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformSupport {
    /// `None` when android was not listed.
    pub android: Option<VersionRange>,
    /// `None` when ios was not listed.
    pub ios: Option<VersionRange>,
    pub web: bool,
}

/// Metadata of one widget kind (one value of the kinds enum).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetMeta {
    pub support: PlatformSupport,
    /// @design, as written in the comment
    pub design_url: String,
    /// @widgetify, as written in the comment
    pub widgetify_url: String,
}

/// One documented field of a widget data message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetField {
    pub name: String,
    pub type_name: String,
    pub support: PlatformSupport,
}

/// Merged documentation of a single widget.
///
/// The kind pass fills `display_name` and `meta`, the data-message pass fills
/// `fields`. Either may run first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetDoc {
    /// Declared kind identifier, e.g. `SELECTOR_ROW`.
    pub display_name: Option<String>,
    pub meta: Option<WidgetMeta>,
    pub fields: Option<Vec<WidgetField>>,
    /// Declared name of the data message that supplied `fields`.
    pub data_message: Option<String>,
}

/// All widget docs of one generation run, keyed by normalized name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentationSet {
    pub widgets: BTreeMap<String, WidgetDoc>,
}

impl DocumentationSet {
    pub fn get(&self, key: &str) -> Option<&WidgetDoc> {
        self.widgets.get(key)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Widgets that have kind metadata, sorted by display name.
    ///
    /// Orphan data messages (fields without a kind) are left out.
    pub fn renderable(&self) -> Vec<(&str, &WidgetDoc, &WidgetMeta)> {
        let mut out: Vec<(&str, &WidgetDoc, &WidgetMeta)> = self
            .widgets
            .iter()
            .filter_map(|(key, doc)| doc.meta.as_ref().map(|meta| (key.as_str(), doc, meta)))
            .collect();
        out.sort_by(|a, b| {
            a.1.display_name
                .as_deref()
                .unwrap_or(a.0)
                .cmp(b.1.display_name.as_deref().unwrap_or(b.0))
        });
        out
    }
}
