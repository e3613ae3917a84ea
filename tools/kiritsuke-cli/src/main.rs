//! Kiritsuke command line tool
//!
//! Prettifies media file names and manages the info db the prettifier
//! enriches titles from.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use kiritsuke_core::{
    EnrichmentResult, PrettifyConfig, Prettifier, ShapeCategory, SortKeyNormalizer,
};
use kiritsuke_infodb::InfoDb;
use std::borrow::Cow;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, Level};

/// CLI arguments
#[derive(Parser)]
#[command(name = "kiritsuke")]
#[command(about = "Prettify scene, P2P and fansub media file names")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Info db file (defaults to the user data directory)
    #[arg(short = 'd', long, env = "KIRITSUKE_INFODB", global = true)]
    infodb: Option<PathBuf>,

    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Prettify file names given as arguments, or one per line on stdin
    Prettify {
        names: Vec<String>,

        /// Print one JSON result per line instead of the bare title
        #[arg(long)]
        json: bool,

        /// Do not ask for episode names or build anime search keys
        #[arg(long, env = "KIRITSUKE_NO_EXTERNAL_INFO")]
        no_external_info: bool,

        /// Do not read or update the info db
        #[arg(long)]
        offline: bool,
    },
    /// Print the shape each file name is recognised as
    Classify { names: Vec<String> },
    /// Print sort keys for file names
    SortKey {
        names: Vec<String>,

        /// Keep extension, group tag and separators
        #[arg(long)]
        no_prettify: bool,

        /// Drop a leading "A" or "The"
        #[arg(long)]
        ignore_article: bool,
    },
    /// List files waiting for a metadata lookup
    Pending {
        /// Remove the listed requests from the info db
        #[arg(long)]
        take: bool,
    },
    /// Store looked-up metadata for a file
    Fill {
        file: PathBuf,

        #[arg(long)]
        title: String,

        #[arg(long)]
        year: Option<String>,

        #[arg(long)]
        episode_name: Option<String>,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn infodb_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => InfoDb::default_path().context("Failed to resolve the default info db path"),
    }
}

/// Names from the arguments, or from stdin when none were given.
fn collect_names(names: Vec<String>) -> Result<Vec<String>> {
    if !names.is_empty() {
        return Ok(names);
    }

    let mut lines = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read stdin")?;
        let line = line.trim();
        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }
    Ok(lines)
}

fn media_kind(category: ShapeCategory) -> &'static str {
    if category.is_series() {
        "series"
    } else if category.is_movie() {
        "movie"
    } else {
        "other"
    }
}

/// The bare file name of a path-like input; the full input stays the file identity.
fn display_name(input: &str) -> Cow<'_, str> {
    match Path::new(input).file_name() {
        Some(name) => name.to_string_lossy(),
        None => Cow::Borrowed(input),
    }
}

fn run_prettify(
    names: Vec<String>,
    json: bool,
    no_external_info: bool,
    db_path: Option<PathBuf>,
) -> Result<()> {
    let config = PrettifyConfig::new().with_external_info(!no_external_info);
    let mut prettifier = Prettifier::new(config).context("Failed to build prettifier")?;

    let db = db_path.as_deref().map(|path| Arc::new(InfoDb::open_or_default(path)));
    if let Some(db) = &db {
        prettifier = prettifier.with_cache(db.clone());
    }
    let pending_before = db.as_ref().map_or(0, |db| db.pending().len());

    for name in collect_names(names)? {
        let result = prettifier.prettify_detailed(&display_name(&name), Some(Path::new(&name)));
        if json {
            println!("{}", serde_json::to_string(&result)?);
        } else {
            println!("{}", result.title);
        }
    }

    if let (Some(db), Some(path)) = (&db, &db_path) {
        let queued = db.pending().len().saturating_sub(pending_before);
        if queued > 0 {
            db.save(path)
                .with_context(|| format!("Failed to save info db to {}", path.display()))?;
            info!(queued, "queued metadata lookups");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Prettify {
            names,
            json,
            no_external_info,
            offline,
        } => {
            let db_path = if offline {
                None
            } else {
                Some(infodb_path(cli.infodb)?)
            };
            run_prettify(names, json, no_external_info, db_path)?;
        }
        Commands::Classify { names } => {
            let prettifier = Prettifier::default().context("Failed to build prettifier")?;
            for name in collect_names(names)? {
                let category = prettifier.classify(&display_name(&name));
                println!("{}\t{category}\t{name}", media_kind(category));
            }
        }
        Commands::SortKey {
            names,
            no_prettify,
            ignore_article,
        } => {
            let sorter = SortKeyNormalizer::new().context("Failed to build sort key normalizer")?;
            for name in collect_names(names)? {
                println!("{}", sorter.normalize(&name, !no_prettify, ignore_article));
            }
        }
        Commands::Pending { take } => {
            let path = infodb_path(cli.infodb)?;
            let db = InfoDb::open_or_default(&path);
            let pending = if take { db.take_pending() } else { db.pending() };
            for (file, search_key) in &pending {
                println!("{file}\t{search_key}");
            }
            if take && !pending.is_empty() {
                db.save(&path)
                    .with_context(|| format!("Failed to save info db to {}", path.display()))?;
            }
        }
        Commands::Fill {
            file,
            title,
            year,
            episode_name,
        } => {
            let path = infodb_path(cli.infodb)?;
            let db = InfoDb::open_or_default(&path);

            let mut info = EnrichmentResult::new(title);
            if let Some(year) = year {
                info = info.with_year(year);
            }
            if let Some(episode_name) = episode_name {
                info = info.with_episode_name(episode_name);
            }
            debug!(file = %file.display(), "filling info db entry");
            db.insert(&file, info);

            db.save(&path)
                .with_context(|| format!("Failed to save info db to {}", path.display()))?;
        }
    }

    Ok(())
}
