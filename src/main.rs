//! # KleyKod CLI
//!
//! Command-line access to the label layout engine.
//!
//! ## Usage
//!
//! ```bash
//! # Render a label request to PNG
//! kleykod preview request.json --png label.png
//!
//! # Which fields a template supports, with limits and the field cap
//! kleykod fields --template professional --size 58x40
//!
//! # Check a set of checked fields against support and the cap
//! kleykod fields --template basic --size 58x30 --select name,article,brand
//!
//! # Advisory length check for one value
//! kleykod check --template basic --size 58x40 name "Футболка хлопковая"
//!
//! # Zone geometry as JSON, for comparison with the backend tables
//! kleykod layout --template extended --size 58x40
//!
//! # Product search over a catalog
//! kleykod search catalog.json "кросовки" --semantic
//!
//! # Check that the embedding model is reachable
//! kleykod model --config search.json
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use kleykod_label::{
    LabelError,
    config::SearchConfig,
    fields::{self, FieldId, FieldSelection},
    item::{CustomLine, DisplayFlags, ItemData},
    layout::{LabelLayout, LabelSize, get_layout_config},
    render::{RasterSurface, render_label},
    search::{ProductCard, SearchOutcome, SemanticSearcher, check_model, fuzzy_search},
    units::label_px,
};

/// KleyKod - label layout and preview utility
#[derive(Parser, Debug)]
#[command(name = "kleykod")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a label request (JSON) to a PNG preview
    Preview {
        /// Request file: template, size, item, flags, serial_number, custom_lines
        request: PathBuf,

        /// Output PNG path
        #[arg(long, value_name = "FILE", default_value = "label.png")]
        png: PathBuf,

        /// Print the render summary as JSON
        #[arg(long)]
        summary: bool,
    },

    /// List fields a template supports at a size
    Fields {
        #[arg(long, default_value = "basic")]
        template: LabelLayout,

        #[arg(long, default_value = "58x40")]
        size: LabelSize,

        /// Comma-separated fields to activate, checked against the cap
        #[arg(long, value_name = "FIELDS")]
        select: Option<String>,
    },

    /// Check a field value against its length limit
    Check {
        #[arg(long, default_value = "basic")]
        template: LabelLayout,

        #[arg(long, default_value = "58x40")]
        size: LabelSize,

        /// Field id (name, article, size_color, brand, ...)
        field: String,

        /// Value to check
        value: String,
    },

    /// Print the zone geometry of a template and size as JSON
    Layout {
        #[arg(long, default_value = "basic")]
        template: LabelLayout,

        #[arg(long, default_value = "58x40")]
        size: LabelSize,
    },

    /// Search a product catalog (JSON array of product cards)
    Search {
        catalog: PathBuf,

        query: String,

        /// Maximum number of results
        #[arg(long, default_value = "10")]
        max: usize,

        /// Use the embedding model, falling back to fuzzy matching
        #[arg(long)]
        semantic: bool,

        /// Search configuration file (JSON)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Connect to the embedding model and report whether it is usable
    Model {
        /// Search configuration file (JSON)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

/// A label to render, as submitted to the backend.
#[derive(Debug, Deserialize)]
struct LabelRequest {
    template: LabelLayout,
    size: LabelSize,
    #[serde(default)]
    item: ItemData,
    #[serde(default)]
    flags: DisplayFlags,
    #[serde(default)]
    serial_number: Option<u32>,
    #[serde(default)]
    custom_lines: Vec<CustomLine>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kleykod_label=info,kleykod=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), LabelError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Preview {
            request,
            png,
            summary,
        } => preview(&request, &png, summary),
        Commands::Fields {
            template,
            size,
            select,
        } => match select {
            Some(names) => {
                let selection = FieldSelection::from_names(template, size, &names)?;
                let active: Vec<&str> = selection.active().map(|f| f.as_str()).collect();
                println!(
                    "{} {}: {} of {} slots used ({})",
                    template,
                    size,
                    selection.counted(),
                    selection.cap(),
                    active.join(", ")
                );
                Ok(())
            }
            None => {
                list_fields(template, size);
                Ok(())
            }
        },
        Commands::Check {
            template,
            size,
            field,
            value,
        } => {
            let field = FieldId::parse(&field).ok_or(LabelError::UnknownField(field))?;
            let check = fields::check_field_length(field, Some(value.as_str()), template, size);
            match &check.warning {
                Some(warning) if check.is_over_limit => println!("over limit: {}", warning),
                _ => println!("ok ({} chars)", value.chars().count()),
            }
            Ok(())
        }
        Commands::Layout { template, size } => {
            match get_layout_config(template, size) {
                Some(config) => println!("{}", serde_json::to_string_pretty(&config.zone_map())?),
                None => {
                    tracing::warn!(%template, %size, "no geometry for this combination");
                    println!("null");
                }
            }
            Ok(())
        }
        Commands::Search {
            catalog,
            query,
            max,
            semantic,
            config,
        } => {
            search(&catalog, &query, max, semantic, load_config(config)?)
        }
        Commands::Model { config } => {
            let config = load_config(config)?;
            let endpoint = config.model.endpoint.clone();
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(check_model(config.model))?;
            println!("Embedding model ready at {}", endpoint);
            Ok(())
        }
    }
}

fn load_config(path: Option<PathBuf>) -> Result<SearchConfig, LabelError> {
    match path {
        Some(path) => SearchConfig::from_json_file(path),
        None => Ok(SearchConfig::default()),
    }
}

fn preview(request: &Path, png: &Path, print_summary: bool) -> Result<(), LabelError> {
    let request: LabelRequest = serde_json::from_str(&std::fs::read_to_string(request)?)?;

    let (width, height) = label_px(request.size);
    let mut surface = RasterSurface::new(width, height);
    let summary = render_label(
        &mut surface,
        request.template,
        request.size,
        &request.item,
        &request.flags,
        request.serial_number,
        &request.custom_lines,
    );

    std::fs::write(png, surface.to_png()?)?;
    println!(
        "Saved {} {} preview ({}x{}) to {}",
        request.template,
        request.size,
        surface.width(),
        surface.height(),
        png.display()
    );

    if print_summary {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}

fn list_fields(template: LabelLayout, size: LabelSize) {
    let config = fields::get_field_config(template, size);

    println!("{} {}", template, size);
    println!(
        "  field cap: {}, chars per line: {}",
        fields::get_field_limit(template, size),
        fields::chars_per_line(template, size)
    );

    println!("\nSupported:");
    for field in fields::get_supported_fields(template, size) {
        let limit = config.get(field);
        let cap_note = if fields::counts_toward_cap(field, template) {
            ""
        } else {
            " (not capped)"
        };
        println!(
            "  {:<16} {:>3} chars, {} line(s){}",
            field.as_str(),
            limit.max_chars,
            limit.max_lines,
            cap_note
        );
    }

    let unsupported = fields::get_unsupported_fields(template, size);
    if !unsupported.is_empty() {
        println!("\nUnsupported:");
        for (field, limit) in unsupported {
            println!("  {:<16} {}", field.as_str(), limit.hint.unwrap_or(""));
        }
    }
}

fn search(
    catalog: &Path,
    query: &str,
    max: usize,
    semantic: bool,
    config: SearchConfig,
) -> Result<(), LabelError> {
    let items: Vec<ProductCard> = serde_json::from_str(&std::fs::read_to_string(catalog)?)?;

    let hits: Vec<&ProductCard> = if semantic {
        let runtime = tokio::runtime::Runtime::new()?;
        let searcher = SemanticSearcher::http(config);
        match runtime.block_on(searcher.search(&items, query, max)) {
            SearchOutcome::Hits { tier, items } => {
                tracing::info!(?tier, hits = items.len(), "search finished");
                items
            }
            // single caller, nothing can supersede it
            SearchOutcome::Superseded => Vec::new(),
        }
    } else {
        fuzzy_search(&items, query, max)
    };

    for (rank, card) in hits.iter().enumerate() {
        let article = if card.article.is_empty() {
            String::new()
        } else {
            format!(" [{}]", card.article)
        };
        println!("{:>3}. {}{}", rank + 1, card.name, article);
    }
    if hits.is_empty() {
        println!("No matches for '{}'", query);
    }
    Ok(())
}
