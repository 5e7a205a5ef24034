//! JSON renderer — structured output for tooling integration.

use crate::model::*;
use crate::render::Renderer;
use serde_json::{json, Value};

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, set: &DocumentationSet) -> String {
        let widgets: Vec<Value> = set
            .renderable()
            .into_iter()
            .map(|(key, doc, meta)| {
                let fields: Vec<Value> = doc
                    .fields
                    .iter()
                    .flatten()
                    .map(|f| {
                        json!({
                            "name": f.name,
                            "type": f.type_name,
                            "support": support_json(&f.support),
                        })
                    })
                    .collect();
                json!({
                    "name": doc.display_name.as_deref().unwrap_or(key),
                    "key": key,
                    "support": support_json(&meta.support),
                    "design_url": meta.design_url,
                    "widgetify_url": meta.widgetify_url,
                    "fields": fields,
                })
            })
            .collect();

        format!("{:#}\n", Value::Array(widgets))
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

fn support_json(support: &PlatformSupport) -> Value {
    json!({
        "android": range_json(support.android),
        "ios": range_json(support.ios),
        "web": support.web,
    })
}

fn range_json(range: Option<VersionRange>) -> Value {
    match range {
        Some(r) => json!({ "min": r.min, "max": r.max }),
        None => Value::Null,
    }
}
