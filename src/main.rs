//! widget-doc — generate the widget client support report.
//!
//! `widget-doc --kinds widgets.proto --data widgets_data.proto -o docs`
//! validates every widget annotation and writes `docs/widget-documentation.md`.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use widget_doc::aggregate::{orphans, Exclusion};
use widget_doc::render;
use widget_doc::schema::DEFAULT_KIND_ENUM;
use widget_doc::Sources;

#[derive(Parser)]
#[command(
    name = "widget-doc",
    version,
    about = "Validate widget annotations in .proto files and render a client support report"
)]
struct Cli {
    /// Schema file declaring the widget kinds enum
    #[arg(long)]
    kinds: PathBuf,

    /// Schema file declaring one `<Kind>Data` message per widget
    #[arg(long)]
    data: PathBuf,

    /// Output directory for the report
    #[arg(short = 'o', long, default_value = ".")]
    output: PathBuf,

    /// Widgets excluded from the fields check, dash-separated as declared in
    /// the kinds enum, e.g. SELECTOR_ROW-MY_WIDGET. __ALL__ excludes every widget.
    #[arg(long, env = "WIDGET_DOC_EXCLUDE", default_value = "")]
    exclude: String,

    /// Dotted path of the kinds enum inside the kinds file
    #[arg(long, default_value = DEFAULT_KIND_ENUM)]
    kind_enum: String,

    /// Output format: markdown (default), json
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// Validate only, do not write the report
    #[arg(long)]
    check: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let renderer = render::create_renderer(&cli.format)?;

    let kind_source = fs::read_to_string(&cli.kinds)
        .with_context(|| format!("failed to read {}", cli.kinds.display()))?;
    let data_source = fs::read_to_string(&cli.data)
        .with_context(|| format!("failed to read {}", cli.data.display()))?;

    let kind_file = cli.kinds.display().to_string();
    let data_file = cli.data.display().to_string();
    let sources = Sources {
        kind_file: &kind_file,
        kind_source: &kind_source,
        data_file: &data_file,
        data_source: &data_source,
        kind_enum: &cli.kind_enum,
    };

    let exclusion = Exclusion::parse(&cli.exclude);
    let set = widget_doc::generate(&sources, &exclusion)?;

    if set.is_empty() {
        warn!(kinds = %kind_file, "no widgets declared");
    }

    let skipped = orphans(&set).len();
    info!(
        widgets = set.len() - skipped,
        orphans = skipped,
        "widget documentation is valid"
    );

    if cli.check {
        return Ok(());
    }

    fs::create_dir_all(&cli.output)
        .with_context(|| format!("failed to create output directory: {}", cli.output.display()))?;
    let out_path = cli.output.join(renderer.file_name());
    fs::write(&out_path, renderer.render(&set))
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    info!(path = %out_path.display(), "wrote report");

    Ok(())
}
