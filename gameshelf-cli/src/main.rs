//! gameshelf CLI
//!
//! Command-line frontend for browsing a shared-game catalog: load the
//! entry files from a catalog directory, apply facet filters, pick a sort
//! order, and page through the result.

mod settings;

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gameshelf_catalog::{CategoryKind, GameEntry, GameMode, load_entries};
use gameshelf_engine::{Browser, CriteriaChange, DownloadBucket, ReleaseWindow, SortKey};

#[derive(Parser)]
#[command(name = "gameshelf")]
#[command(about = "Browse a shared-game catalog from the command line", long_about = None)]
struct Cli {
    /// Catalog directory containing game entry YAML files
    /// (defaults to the saved settings value, then ./catalog)
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Facet filters shared by browsing commands. Every flag is optional; an
/// omitted flag imposes no constraint.
#[derive(Args, Clone)]
struct FilterArgs {
    /// Keyword matched against title and description (case-insensitive)
    #[arg(short, long)]
    keyword: Option<String>,

    /// Genre category id; repeat to require several at once
    #[arg(short, long)]
    genre: Vec<String>,

    /// Engine category id; repeat to require several at once
    #[arg(short, long)]
    engine: Vec<String>,

    /// Comma-separated tags; a game must carry every one
    #[arg(short, long)]
    tags: Option<String>,

    /// Minimum average rating, 0-5 inclusive
    #[arg(long)]
    min_rating: Option<f64>,

    /// Minimum number of ratings
    #[arg(long)]
    min_votes: Option<u32>,

    /// Download bucket: 1000+, 500-999, or under-500
    #[arg(short, long)]
    downloads: Option<DownloadBucket>,

    /// Game modes; a game qualifies if it supports any of them
    /// (single-player, multiplayer, coop, pvp)
    #[arg(short, long, value_delimiter = ',')]
    mode: Vec<GameMode>,

    /// Release window: 7d, 30d, 1y, or YYYY-MM-DD..YYYY-MM-DD (inclusive)
    #[arg(short, long)]
    released: Option<ReleaseWindow>,

    /// Uploader name substring (case-insensitive)
    #[arg(short, long)]
    uploader: Option<String>,
}

impl FilterArgs {
    /// Lower the flags into criteria mutations for the browse session.
    fn to_changes(&self) -> Vec<CriteriaChange> {
        let mut changes = Vec::new();
        if let Some(ref keyword) = self.keyword {
            changes.push(CriteriaChange::Keyword(keyword.clone()));
        }
        for genre in &self.genre {
            changes.push(CriteriaChange::AddGenre(genre.clone()));
        }
        for engine in &self.engine {
            changes.push(CriteriaChange::AddEngine(engine.clone()));
        }
        if let Some(ref tags) = self.tags {
            changes.push(CriteriaChange::Tags(tags.clone()));
        }
        if self.min_rating.is_some() {
            changes.push(CriteriaChange::MinRating(self.min_rating));
        }
        if self.min_votes.is_some() {
            changes.push(CriteriaChange::MinRatingCount(self.min_votes));
        }
        if self.downloads.is_some() {
            changes.push(CriteriaChange::Downloads(self.downloads));
        }
        for &mode in &self.mode {
            changes.push(CriteriaChange::GameMode {
                mode,
                enabled: true,
            });
        }
        if self.released.is_some() {
            changes.push(CriteriaChange::ReleaseWindow(self.released));
        }
        if let Some(ref uploader) = self.uploader {
            changes.push(CriteriaChange::Uploader(uploader.clone()));
        }
        changes
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog with filters, a sort order, and pages
    Browse {
        #[command(flatten)]
        filters: FilterArgs,

        /// Sort order: recent, viewed, downloaded, rated, success
        #[arg(short, long, default_value = "recent")]
        sort: SortKey,

        /// 1-based page to show
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Print the page as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// List the categories used in the catalog, grouped by kind
    Categories,

    /// List the tags used in the catalog with entry counts
    Tags,

    /// Manage the saved catalog directory
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the settings file path
    Path,

    /// Save a catalog directory as the default
    Set {
        /// Directory to save
        dir: PathBuf,
    },

    /// Clear the saved catalog directory
    Clear,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Commands::Config { action } = &cli.command {
        run_config(action);
        return;
    }

    let catalog_dir = settings::resolve_catalog_dir(cli.catalog);
    log::debug!("loading catalog from {}", catalog_dir.display());

    let entries = match load_entries(&catalog_dir) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!(
                "{} Failed to load catalog: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Browse {
            filters,
            sort,
            page,
            json,
        } => run_browse(entries, &filters, sort, page, json),
        Commands::Categories => run_categories(&entries),
        Commands::Tags => run_tags(&entries),
        Commands::Config { .. } => unreachable!("handled above"),
    }
}

/// Run the browse command.
fn run_browse(entries: Vec<GameEntry>, filters: &FilterArgs, sort: SortKey, page: usize, json: bool) {
    let mut browser = Browser::new(entries);
    for change in filters.to_changes() {
        browser.apply(change);
    }
    browser.set_sort(sort);
    browser.goto_page(page);

    let page_entries = browser.page_entries();

    if json {
        match serde_json::to_string_pretty(&page_entries) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!(
                    "{} Failed to serialize page: {}",
                    "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                    e,
                );
                std::process::exit(1);
            }
        }
        return;
    }

    if browser.match_count() == 0 {
        println!(
            "{}",
            "No games match the current filters.".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return;
    }

    for entry in &page_entries {
        print_entry(entry);
    }

    println!(
        "{}",
        format!(
            "Page {} of {} ({} of {} games match) · sorted by {}",
            browser.page(),
            browser.page_count(),
            browser.match_count(),
            browser.total_count(),
            browser.sort().display_name().to_lowercase(),
        )
        .if_supports_color(Stdout, |t| t.dimmed()),
    );
}

/// Print one game entry as a two-line block.
fn print_entry(entry: &GameEntry) {
    let new_badge = if entry.new_release {
        format!(" {}", "[NEW]".if_supports_color(Stdout, |t| t.green()))
    } else {
        String::new()
    };

    println!(
        "{}{}  {}",
        entry.title.if_supports_color(Stdout, |t| t.bold()),
        new_badge,
        format_rating(entry).if_supports_color(Stdout, |t| t.yellow()),
    );

    let genres: Vec<_> = entry.category_ids(CategoryKind::Genre).collect();
    let engines: Vec<_> = entry.category_ids(CategoryKind::Engine).collect();
    let mut details = vec![
        format!("by {}", entry.uploader.name),
        format!("{} downloads", entry.downloads),
        format!("{} views", entry.views),
        format!("released {}", entry.released_at.format("%Y-%m-%d")),
    ];
    if !genres.is_empty() {
        details.push(genres.join(", "));
    }
    if !engines.is_empty() {
        details.push(engines.join(", "));
    }
    if !entry.tags.is_empty() {
        details.push(format!("tags: {}", entry.tags.join(", ")));
    }

    println!(
        "  {}",
        details.join(" \u{b7} ").if_supports_color(Stdout, |t| t.dimmed()),
    );
}

/// Format the rating column: "4.3★ (87)", or "unrated" with no votes.
fn format_rating(entry: &GameEntry) -> String {
    if entry.rating_count == 0 {
        "unrated".to_string()
    } else {
        format!("{:.1}\u{2605} ({})", entry.avg_rating, entry.rating_count)
    }
}

/// Run the categories command.
fn run_categories(entries: &[GameEntry]) {
    // (kind, id) → (display name, entry count)
    let mut counts: BTreeMap<(&str, &str), (&str, usize)> = BTreeMap::new();
    for entry in entries {
        for category in &entry.categories {
            let kind = match category.kind {
                CategoryKind::Genre => "Genres",
                CategoryKind::Engine => "Engines",
            };
            counts
                .entry((kind, category.id.as_str()))
                .and_modify(|(_, n)| *n += 1)
                .or_insert((category.name.as_str(), 1));
        }
    }

    if counts.is_empty() {
        println!(
            "{}",
            "No categories in the catalog.".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return;
    }

    let mut current_kind = "";
    for (&(kind, id), &(name, count)) in &counts {
        if kind != current_kind {
            if !current_kind.is_empty() {
                println!();
            }
            current_kind = kind;
            println!("{}:", kind.if_supports_color(Stdout, |t| t.bold()));
        }
        println!(
            "  {} [{}] ({} games)",
            name.if_supports_color(Stdout, |t| t.cyan()),
            id,
            count,
        );
    }
}

/// Run the tags command.
fn run_tags(entries: &[GameEntry]) {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in entries {
        for tag in &entry.tags {
            *counts.entry(tag.as_str()).or_default() += 1;
        }
    }

    if counts.is_empty() {
        println!(
            "{}",
            "No tags in the catalog.".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return;
    }

    let mut sorted: Vec<_> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    for (tag, count) in sorted {
        println!(
            "  {} {}",
            tag.if_supports_color(Stdout, |t| t.cyan()),
            format!("({count})").if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}

/// Run a config subcommand.
fn run_config(action: &ConfigAction) {
    match action {
        ConfigAction::Path => {
            println!("{}", settings::settings_path().display());
        }
        ConfigAction::Set { dir } => match settings::save_catalog_dir(Some(dir.as_path())) {
            Ok(()) => {
                println!(
                    "{} Catalog directory saved: {}",
                    "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                    dir.display().if_supports_color(Stdout, |t| t.cyan()),
                );
            }
            Err(e) => {
                eprintln!(
                    "{} Failed to save settings: {}",
                    "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                    e,
                );
                std::process::exit(1);
            }
        },
        ConfigAction::Clear => match settings::save_catalog_dir(None) {
            Ok(()) => {
                println!(
                    "{} Saved catalog directory cleared",
                    "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                );
            }
            Err(e) => {
                eprintln!(
                    "{} Failed to update settings: {}",
                    "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                    e,
                );
                std::process::exit(1);
            }
        },
    }
}
