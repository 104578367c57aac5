//! Headless driver for the Terracotta map viewer.
//!
//! Runs the viewer controller against a live tile server with an in-memory
//! map and UI, and prints what a browser client would display.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use map_viewer::config::ENV_HOST;
use map_viewer::{HeadlessMap, MapView, RecordingUi, Region, Viewer, ViewerConfig};
use terracotta_api::urls::{rgb_url, singleband_url};
use terracotta_api::{HttpFetcher, TilePath};
use terracotta_common::{BoundingBox, DatasetKey, KeyConstraint, StretchRange};

type CliViewer = Viewer<HttpFetcher, HeadlessMap, RecordingUi>;

#[derive(Parser, Debug)]
#[command(name = "viewer-cli")]
#[command(about = "Headless driver for the Terracotta map viewer")]
struct Args {
    /// Configuration file path (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tile server base URL (overrides config and TERRACOTTA_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Datasets per listing page
    #[arg(long)]
    per_page: Option<u32>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the key dimensions of the catalog
    Keys,

    /// List one page of datasets
    Datasets {
        /// Zero-based page index
        #[arg(short, long, default_value = "0")]
        page: u32,

        /// Key constraint as key=value, repeatable
        #[arg(short, long = "key", value_parser = parse_constraint)]
        keys: Vec<KeyConstraint>,
    },

    /// Print the metadata of one dataset
    Metadata {
        /// Dataset key components, e.g. RossIceShelf blue
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Print tile URLs without contacting the server
    Url {
        #[command(subcommand)]
        layer: UrlCommand,
    },

    /// Select a dataset and report what the viewer would show
    Select {
        /// Dataset key components, or the shared keys with --rgb
        keys: Vec<String>,

        /// Visible extent as west,south,east,north
        #[arg(long)]
        viewport: Option<String>,

        /// Colormap id
        #[arg(long)]
        colormap: Option<String>,

        /// Stretch range as low,high
        #[arg(long)]
        stretch: Option<String>,

        /// Last key component of the red, green and blue bands
        #[arg(long, num_args = 3, value_names = ["R", "G", "B"])]
        rgb: Option<Vec<String>>,
    },

    /// Load a region tree, prefetch its metadata and optionally select a region
    Regions {
        /// JSON file with [{name, id, subregions?}]
        file: PathBuf,

        /// Band names, repeatable
        #[arg(short, long = "band", required = true)]
        bands: Vec<String>,

        /// Region list entry to select, e.g. RossIceShelf/1
        #[arg(long)]
        select: Option<String>,

        /// Band to switch to after selecting
        #[arg(long)]
        switch_band: Option<String>,

        /// Visible extent as west,south,east,north
        #[arg(long)]
        viewport: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum UrlCommand {
    /// Single-band tile URL
    Singleband {
        keys: Vec<String>,

        #[arg(long)]
        colormap: Option<String>,

        #[arg(long)]
        stretch: Option<String>,

        /// Preview thumbnail instead of the XYZ template
        #[arg(long)]
        preview: bool,
    },

    /// RGB composite tile URL
    Rgb {
        /// Shared leading key components
        shared: Vec<String>,

        #[arg(long, num_args = 3, value_names = ["R", "G", "B"], required = true)]
        bands: Vec<String>,

        #[arg(long)]
        stretch: Option<String>,

        #[arg(long)]
        preview: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    init_tracing(&args.log_level, args.json)?;

    let config = load_config(&args)?;
    info!(host = %config.host(), "Using tile server");

    match args.command {
        Commands::Keys => {
            let mut viewer = viewer(config, None)?;
            let keys = viewer.load_keys().await?;
            for key in keys {
                println!("{}\t{}", key.key, key.description.as_deref().unwrap_or(""));
            }
        }
        Commands::Datasets { page, keys } => {
            let mut viewer = viewer(config, None)?;
            viewer.load_keys().await?;
            viewer.search(keys).await?;
            if page > 0 {
                viewer.increment_page(i64::from(page)).await?;
            }
            for key in &viewer.ui().datasets {
                println!("{}", key);
            }
            let controls = viewer.ui().page_controls;
            if let Some(controls) = controls {
                info!(
                    page = controls.counter,
                    prev = controls.prev_enabled,
                    next = controls.next_enabled,
                    "Page controls"
                );
            }
        }
        Commands::Metadata { keys } => {
            let mut viewer = viewer(config, None)?;
            let key = DatasetKey::new(keys);
            viewer.ensure_metadata(&key).await?;
            let metadata = viewer
                .state()
                .metadata
                .lookup(&key)
                .ok_or_else(|| anyhow!("metadata for {} was not cached", key))?;
            println!("{}", serde_json::to_string_pretty(metadata)?);
        }
        Commands::Url { layer } => println!("{}", tile_url(&config, layer)?),
        Commands::Select {
            keys,
            viewport,
            colormap,
            stretch,
            rgb,
        } => {
            let mut viewer = viewer(config, viewport.as_deref())?;
            if let Some(colormap) = colormap {
                viewer.set_colormap(&colormap)?;
            }
            if let Some(stretch) = stretch {
                viewer.set_stretch(StretchRange::parse(&stretch)?);
            }

            match rgb {
                Some(bands) => {
                    let [r, g, b] = rgb_triple(bands)?;
                    viewer.select_rgb(keys, [r, g, b]);
                }
                None => {
                    let key = DatasetKey::new(keys);
                    if let Err(err) = viewer.ensure_metadata(&key).await {
                        warn!(error = %err, "Selecting without metadata");
                    }
                    viewer.select_singleband(key, true);
                }
            }
            print_report(&viewer)?;
        }
        Commands::Regions {
            file,
            bands,
            select,
            switch_band,
            viewport,
        } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read regions: {}", file.display()))?;
            let regions: Vec<Region> = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse regions: {}", file.display()))?;

            let mut viewer = viewer(config, viewport.as_deref())?;
            let stored = viewer.load_regions(&regions, bands).await;
            info!(stored, "Prefetched region metadata");

            if let Some(entry) = select {
                viewer.select_region(&entry)?;
            }
            if let Some(band) = switch_band {
                viewer.select_band(&band).await?;
            }

            for entry in &viewer.ui().regions {
                println!("{}{}\t{}", "  ".repeat(entry.depth), entry.name, entry.id);
            }
            print_report(&viewer)?;
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

/// Defaults, then the config file, then the environment, then flags.
fn load_config(args: &Args) -> Result<ViewerConfig> {
    let mut config = match &args.config {
        Some(path) => ViewerConfig::from_file(path)?,
        None => ViewerConfig::default(),
    };
    config.apply_env()?;

    if let Some(host) = &args.host {
        config.remote_host = host.clone();
    }
    if let Some(per_page) = args.per_page {
        config.datasets_per_page = per_page;
    }

    if config.remote_host.is_empty() {
        bail!("No tile server configured; pass --host or set {}", ENV_HOST);
    }
    config.validate()?;
    Ok(config)
}

fn viewer(config: ViewerConfig, viewport: Option<&str>) -> Result<CliViewer> {
    let map = match viewport {
        Some(v) => HeadlessMap::new(
            BoundingBox::from_wsen_string(v).with_context(|| format!("Invalid viewport '{}'", v))?,
        ),
        None => HeadlessMap::default(),
    };
    Ok(Viewer::new(config, HttpFetcher::new()?, map, RecordingUi::new()))
}

fn tile_url(config: &ViewerConfig, command: UrlCommand) -> Result<String> {
    let host = config.host();
    let path = |preview: bool| {
        if preview {
            TilePath::Preview(config.thumbnail_size)
        } else {
            TilePath::Xyz
        }
    };
    let stretch = |s: Option<String>| -> Result<StretchRange> {
        Ok(match s {
            Some(s) => StretchRange::parse(&s)?,
            None => config.default_stretch,
        })
    };

    match command {
        UrlCommand::Singleband {
            keys,
            colormap,
            stretch: s,
            preview,
        } => {
            let mut options = terracotta_api::LayerOptions::new();
            if let Some(colormap) = colormap {
                options.insert("colormap", colormap);
            }
            options.insert("stretch_range", stretch(s)?.to_query_value());
            Ok(singleband_url(&host, &keys, Some(&options), path(preview)))
        }
        UrlCommand::Rgb {
            shared,
            bands,
            stretch: s,
            preview,
        } => {
            let options = terracotta_api::LayerOptions::new()
                .with("stretch_range", stretch(s)?.to_query_value());
            Ok(rgb_url(&host, &shared, &bands, Some(&options), path(preview)))
        }
    }
}

fn rgb_triple(bands: Vec<String>) -> Result<[String; 3]> {
    <[String; 3]>::try_from(bands).map_err(|b| anyhow!("expected 3 RGB bands, got {}", b.len()))
}

fn parse_constraint(s: &str) -> Result<KeyConstraint, String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    Ok(KeyConstraint::new(key, value))
}

fn print_report(viewer: &CliViewer) -> Result<()> {
    let ui = viewer.ui();
    let map = viewer.map();
    let requests = viewer.fetcher().metrics();

    let report: Value = json!({
        "tiles": map.tile_urls(),
        "active_layer": viewer.state().active.url(),
        "viewport": map.bounds(),
        "moved": map.fly_count() > 0,
        "selected": ui.selected,
        "layer_info": ui.layer_info.as_ref().map(|i| json!({"url": i.url, "summary": i.summary})),
        "export_link": ui.export_link,
        "errors": ui.errors.iter()
            .map(|(index, e)| json!({"index": index, "text": e.text, "url": e.url}))
            .collect::<Vec<_>>(),
        "alerts": ui.alerts,
        "requests": {"total": requests.requests, "failed": requests.failures},
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
