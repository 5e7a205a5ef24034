//! GitHub-flavored markdown report.
//!
//! One section per widget: client support table, design and widgetify
//! links, then a table of fields with their own client support.

use crate::model::*;
use crate::render::Renderer;

pub struct MarkdownRenderer;

const SUPPORTED: &str = ":white_check_mark:";
const UNSUPPORTED: &str = ":x:";
/// Upper bound shown for open-ended ranges.
const CURRENT: &str = "Now";

impl Renderer for MarkdownRenderer {
    fn render(&self, set: &DocumentationSet) -> String {
        let mut output = String::new();
        for line in render_lines(set) {
            output.push_str(&line);
            output.push('\n');
        }
        output
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

/// Render the report as lines, widgets sorted by display name.
pub fn render_lines(set: &DocumentationSet) -> Vec<String> {
    let mut lines = Vec::new();
    for (key, doc, meta) in set.renderable() {
        render_widget(&mut lines, doc.display_name.as_deref().unwrap_or(key), doc, meta);
    }
    lines
}

fn render_widget(lines: &mut Vec<String>, name: &str, doc: &WidgetDoc, meta: &WidgetMeta) {
    lines.push(format!("# {}", name));

    lines.push("## Client Support".to_string());
    lines.push("| IOS | Android | Web |".to_string());
    lines.push("|-----|---------|-----|".to_string());
    let (ios, android, web) = support_cells(&meta.support);
    lines.push(format!("|{}|{}|{}|", ios, android, web));

    render_link(lines, "Design URL", &meta.design_url);
    render_link(lines, "Widgetify URL", &meta.widgetify_url);

    lines.push("## Fields".to_string());
    lines.push("| Name | Type | IOS | Android | Web |".to_string());
    lines.push("|------|------|-----|---------|-----|".to_string());
    for field in doc.fields.iter().flatten() {
        let (ios, android, web) = support_cells(&field.support);
        lines.push(format!(
            "|{}|{}|{}|{}|{}|",
            field.name, field.type_name, ios, android, web
        ));
    }
    lines.push("<br>".to_string());
    lines.push(String::new());
}

fn render_link(lines: &mut Vec<String>, title: &str, url: &str) {
    lines.push(format!("## {}", title));
    lines.push(format!("<li><a>{}</a></li>", url));
    lines.push("<br>".to_string());
    lines.push(String::new());
}

/// Table cells for one support value, in column order IOS, Android, Web.
fn support_cells(support: &PlatformSupport) -> (String, String, &'static str) {
    let web = if support.web { SUPPORTED } else { UNSUPPORTED };
    (render_range(support.ios), render_range(support.android), web)
}

/// `min &rarr; max`, with `Now` for open ranges and `:x:` when undeclared.
fn render_range(range: Option<VersionRange>) -> String {
    match range {
        None => UNSUPPORTED.to_string(),
        Some(VersionRange { min, max: None }) => format!("{} &rarr; {}", min, CURRENT),
        Some(VersionRange { min, max: Some(max) }) => format!("{} &rarr; {}", min, max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn meta(support: PlatformSupport) -> WidgetMeta {
        WidgetMeta {
            support,
            design_url: "https://d.example.com/row".into(),
            widgetify_url: "https://w.example.com/row".into(),
        }
    }

    #[test]
    fn range_cells() {
        assert_eq!(render_range(None), ":x:");
        assert_eq!(
            render_range(Some(VersionRange { min: 3, max: None })),
            "3 &rarr; Now"
        );
        assert_eq!(
            render_range(Some(VersionRange { min: 2, max: Some(5) })),
            "2 &rarr; 5"
        );
    }

    #[test]
    fn ios_only_support() {
        let support = PlatformSupport {
            android: None,
            ios: Some(VersionRange { min: 3, max: None }),
            web: false,
        };
        let (ios, android, web) = support_cells(&support);
        assert_eq!(ios, "3 &rarr; Now");
        assert_eq!(android, ":x:");
        assert_eq!(web, ":x:");
    }

    #[test]
    fn widget_section() {
        let mut set = DocumentationSet::default();
        set.widgets.insert(
            "selectorrow".into(),
            WidgetDoc {
                display_name: Some("SELECTOR_ROW".into()),
                meta: Some(meta(PlatformSupport {
                    android: Some(VersionRange { min: 1, max: None }),
                    ios: Some(VersionRange { min: 2, max: Some(5) }),
                    web: true,
                })),
                fields: Some(vec![WidgetField {
                    name: "title".into(),
                    type_name: "string".into(),
                    support: PlatformSupport {
                        web: true,
                        ..Default::default()
                    },
                }]),
                data_message: Some("SelectorRowData".into()),
            },
        );

        let expected = [
            "# SELECTOR_ROW",
            "## Client Support",
            "| IOS | Android | Web |",
            "|-----|---------|-----|",
            "|2 &rarr; 5|1 &rarr; Now|:white_check_mark:|",
            "## Design URL",
            "<li><a>https://d.example.com/row</a></li>",
            "<br>",
            "",
            "## Widgetify URL",
            "<li><a>https://w.example.com/row</a></li>",
            "<br>",
            "",
            "## Fields",
            "| Name | Type | IOS | Android | Web |",
            "|------|------|-----|---------|-----|",
            "|title|string|:x:|:x:|:white_check_mark:|",
            "<br>",
            "",
        ];
        assert_eq!(render_lines(&set), expected);
    }

    #[test]
    fn sorted_by_display_name_and_orphans_skipped() {
        let mut set = DocumentationSet::default();
        for (key, name) in [("zeta", "ZETA"), ("alpha", "ALPHA")] {
            set.widgets.insert(
                key.into(),
                WidgetDoc {
                    display_name: Some(name.into()),
                    meta: Some(meta(PlatformSupport::default())),
                    fields: None,
                    data_message: None,
                },
            );
        }
        set.widgets.insert(
            "orphan".into(),
            WidgetDoc {
                fields: Some(vec![]),
                data_message: Some("OrphanData".into()),
                ..Default::default()
            },
        );

        let headings: Vec<String> = render_lines(&set)
            .into_iter()
            .filter(|l| l.starts_with("# "))
            .collect();
        assert_eq!(headings, ["# ALPHA", "# ZETA"]);
    }

    #[test]
    fn render_ends_every_line_with_newline() {
        let mut set = DocumentationSet::default();
        set.widgets.insert(
            "divider".into(),
            WidgetDoc {
                display_name: Some("DIVIDER".into()),
                meta: Some(meta(PlatformSupport::default())),
                fields: Some(vec![]),
                data_message: Some("DividerData".into()),
            },
        );
        let out = MarkdownRenderer.render(&set);
        assert!(out.starts_with("# DIVIDER\n## Client Support\n"));
        assert!(out.ends_with("|------|------|-----|---------|-----|\n<br>\n\n"));
    }
}
