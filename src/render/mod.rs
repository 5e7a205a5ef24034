//! Renderer module — trait-based format dispatch.

pub mod json;
pub mod markdown;

use crate::model::DocumentationSet;
use anyhow::{anyhow, Result};

/// Base name of the generated report file.
pub const REPORT_NAME: &str = "widget-documentation";

/// Trait for rendering a DocumentationSet into a specific output format.
pub trait Renderer {
    fn render(&self, set: &DocumentationSet) -> String;
    fn file_extension(&self) -> &str;

    /// Fixed output file name for this format.
    fn file_name(&self) -> String {
        format!("{}.{}", REPORT_NAME, self.file_extension())
    }
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use markdown or json", format)),
    }
}
