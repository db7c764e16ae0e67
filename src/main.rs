use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use geomarker::config::AppConfig;
use geomarker::data::{JsonFileStore, SimulatedLocationProvider, StaticGallery, StaticPermissions};
use geomarker::location::LocationTracker;
use geomarker::logging::init_tracing;
use geomarker::ui::root::RootComponent;
use geomarker::ui::{Dependencies, Settings};

mod driver;

use driver::{Command, Session};

const NAVIGATION_FILE: &str = "navigation.json";
const IMAGES_DIR: &str = "images";

#[derive(Parser)]
#[command(name = "geomarker")]
#[command(about = "Headless marker map driven by line commands on stdin", long_about = None)]
struct Cli {
    /// Config file path (default: platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for markers, last position and navigation state
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "geomarker=trace"
    #[arg(long)]
    log: Option<String>,

    /// Ignore the saved navigation stack
    #[arg(long)]
    fresh: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    if let Some(dir) = cli.data_dir {
        config.data.data_dir = Some(dir);
    }
    if let Some(filter) = cli.log {
        config.logging.filter = filter;
    }
    init_tracing(&config.logging.filter);

    let data_dir = config.data.resolved_data_dir();
    let store = Arc::new(
        JsonFileStore::open(&data_dir)
            .await
            .with_context(|| format!("opening data directory {}", data_dir.display()))?,
    );
    let location = Arc::new(SimulatedLocationProvider::new());
    let gallery = Arc::new(StaticGallery::new(list_images(&data_dir.join(IMAGES_DIR)).await));

    let deps = Arc::new(Dependencies {
        markers: store.clone(),
        last_position: store,
        tracker: Arc::new(LocationTracker::new(location.clone())),
        gallery,
        permissions: Arc::new(StaticPermissions::all_granted()),
        settings: Settings::from_config(&config),
    });

    let navigation_path = data_dir.join(NAVIGATION_FILE);
    let root = open_root(deps, &navigation_path, cli.fresh).await;
    let session = Session::new(root, location);

    println!("{}", driver::HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("reading stdin")?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }
        let keep_going = Command::parse(&line).and_then(|command| session.execute(command));
        match keep_going {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => println!("error: {:#}", err),
        }
    }

    let saved = session.root().save_state()?;
    tokio::fs::write(&navigation_path, saved)
        .await
        .with_context(|| format!("writing {}", navigation_path.display()))?;
    tracing::info!("navigation saved to {}", navigation_path.display());
    Ok(())
}

async fn open_root(deps: Arc<Dependencies>, path: &Path, fresh: bool) -> RootComponent {
    if fresh {
        return RootComponent::new(deps);
    }
    match tokio::fs::read_to_string(path).await {
        Ok(saved) => match RootComponent::restore(Arc::clone(&deps), &saved) {
            Ok(root) => root,
            Err(err) => {
                tracing::warn!("discarding saved navigation: {}", err);
                RootComponent::new(deps)
            }
        },
        Err(_) => RootComponent::new(deps),
    }
}

/// Files in `dir` as `file://` URIs; an absent directory is an empty gallery.
async fn list_images(dir: &Path) -> Vec<String> {
    let mut images = Vec::new();
    let Ok(mut entries) = tokio::fs::read_dir(dir).await else {
        return images;
    };
    while let Ok(Some(entry)) = entries.next_entry().await {
        if entry.file_type().await.is_ok_and(|kind| kind.is_file()) {
            images.push(format!("file://{}", entry.path().display()));
        }
    }
    images.sort();
    images
}
