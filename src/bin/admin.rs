//! CLI administration tool for the shortlink service.
//!
//! Creates shortlinks, inspects visit statistics, converts between slugs
//! and identifiers, and runs database diagnostics without going through
//! the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a shortlink (prompts for the URL if omitted)
//! cargo run --bin admin -- link create https://example.com/long-url
//!
//! # Top 20 shortlinks by most recent visit
//! cargo run --bin admin -- stats top --metric last-visit --limit 20
//!
//! # Statistics of one shortlink
//! cargo run --bin admin -- stats show 5Fq9x3ZbRkM2wTnVhA7cPe
//!
//! # Slug <-> identifier (no database needed)
//! cargo run --bin admin -- slug decode 5Fq9x3ZbRkM2wTnVhA7cPe
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same database and `SERVICE_ROOT` settings as the server (see `config`).

use shortlink_service::application::services::{ShortlinkService, StatsService};
use shortlink_service::config::Config;
use shortlink_service::domain::entities::{ShortlinkWithStats, StatMetric};
use shortlink_service::domain::slug;
use shortlink_service::infrastructure::persistence::{PgShortlinkRepository, PgStatsRepository};
use shortlink_service::server::connect_pool;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// CLI tool for managing the shortlink service.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage shortlinks
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show visit statistics
    Stats {
        #[command(subcommand)]
        action: StatsAction,
    },

    /// Convert between slugs and identifiers
    Slug {
        #[command(subcommand)]
        action: SlugAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// Create a new shortlink
    Create {
        /// Destination URL (http or https)
        url: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum StatsAction {
    /// Rank shortlinks by a visit metric
    Top {
        #[arg(short, long, value_enum, default_value_t = MetricArg::Visits)]
        metric: MetricArg,

        /// Number of shortlinks to show (0-100)
        #[arg(short, long, default_value_t = 10)]
        limit: i64,
    },

    /// Show the statistics of one shortlink
    Show { slug: String },
}

#[derive(Subcommand)]
enum SlugAction {
    /// Print the slug of an identifier
    Encode { id: Uuid },

    /// Print the identifier a slug encodes
    Decode { slug: String },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[derive(Clone, Copy, ValueEnum)]
enum MetricArg {
    Visits,
    LastVisit,
}

impl From<MetricArg> for StatMetric {
    fn from(metric: MetricArg) -> Self {
        match metric {
            MetricArg::Visits => StatMetric::Visits,
            MetricArg::LastVisit => StatMetric::LastVisit,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Slug { action } => handle_slug_action(action),
        Commands::Link { action } => {
            let (config, pool) = connect().await?;
            handle_link_action(action, &config, &pool).await
        }
        Commands::Stats { action } => {
            let (config, pool) = connect().await?;
            handle_stats_action(action, &config, &pool).await
        }
        Commands::Db { action } => {
            let (config, pool) = connect().await?;
            handle_db_action(action, &config, &pool).await
        }
    }
}

async fn connect() -> Result<(Config, PgPool)> {
    let config = Config::from_env()?;
    let pool = connect_pool(&config).await?;
    Ok((config, pool))
}

fn shortlink_service(config: &Config, pool: &PgPool) -> ShortlinkService<PgShortlinkRepository> {
    let repository = Arc::new(PgShortlinkRepository::new(Arc::new(pool.clone())));
    ShortlinkService::new(repository, config.service_root.clone())
}

fn stats_service(pool: &PgPool) -> StatsService<PgStatsRepository> {
    StatsService::new(Arc::new(PgStatsRepository::new(Arc::new(pool.clone()))))
}

async fn handle_link_action(action: LinkAction, config: &Config, pool: &PgPool) -> Result<()> {
    match action {
        LinkAction::Create { url, yes } => create_link(config, pool, url, yes).await,
    }
}

/// Creates a shortlink with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for the URL (or use provided)
/// 2. Confirm creation (unless `--yes` flag)
/// 3. Store the shortlink and print its short URL
async fn create_link(
    config: &Config,
    pool: &PgPool,
    url: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔗 Create Shortlink".bright_blue().bold());
    println!();

    let long_url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Destination URL")
            .with_initial_text("https://")
            .interact_text()?,
    };

    println!("  URL: {}", long_url.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this shortlink?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let service = shortlink_service(config, pool);
    let shortlink = service
        .create(&long_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create shortlink: {}", e))?;

    println!();
    println!("{}", "✅ Shortlink created".green().bold());
    println!();
    println!("  Slug:      {}", shortlink.slug().bright_yellow().bold());
    println!("  Short URL: {}", service.short_url(&shortlink).bright_cyan());
    println!("  Long URL:  {}", shortlink.long_url);
    println!();

    Ok(())
}

async fn handle_stats_action(action: StatsAction, config: &Config, pool: &PgPool) -> Result<()> {
    match action {
        StatsAction::Top { metric, limit } => show_top(pool, metric.into(), limit).await,
        StatsAction::Show { slug } => show_one(config, pool, &slug).await,
    }
}

/// Lists the top shortlinks by a metric.
///
/// # Output Format
///
/// ```text
/// 📊 Top shortlinks by visits
///
///   Visits  Last visit         Slug                    Long URL
///   ──────────────────────────────────────────────────────────────────────────
///   42      2025-07-18 19:04   5Fq9x3ZbRkM2wTnVhA7cPe  https://example.com/
/// ```
async fn show_top(pool: &PgPool, metric: StatMetric, limit: i64) -> Result<()> {
    println!(
        "{}",
        format!("📊 Top shortlinks by {metric}").bright_blue().bold()
    );
    println!();

    let top = stats_service(pool)
        .get_top(metric, limit)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    if top.is_empty() {
        println!("{}", "  No shortlinks found".yellow());
        println!();
        println!(
            "  Create one with: {} admin link create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<7} {:<18} {:<23} {}",
        "Visits".bright_white().bold(),
        "Last visit".bright_white().bold(),
        "Slug".bright_white().bold(),
        "Long URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for entry in &top {
        print_row(entry);
    }

    println!();
    println!("  Total: {}", top.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

fn print_row(entry: &ShortlinkWithStats) {
    println!(
        "  {:<7} {:<18} {:<23} {}",
        entry.visits.to_string().bright_green(),
        format_last_visit(entry).bright_black(),
        entry.shortlink.slug().cyan(),
        entry.shortlink.long_url
    );
}

fn format_last_visit(entry: &ShortlinkWithStats) -> String {
    entry
        .last_visit
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "never".to_string())
}

/// Shows the statistics of a single shortlink.
async fn show_one(config: &Config, pool: &PgPool, slug: &str) -> Result<()> {
    let service = shortlink_service(config, pool);

    let shortlink = service
        .resolve(slug)
        .await
        .map_err(|_| anyhow::anyhow!("Shortlink '{}' not found", slug))?;

    let stats = stats_service(pool)
        .get_one(shortlink)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    println!("{}", "📈 Shortlink statistics".bright_blue().bold());
    println!();
    println!("  Slug:       {}", stats.shortlink.slug().cyan());
    println!(
        "  Short URL:  {}",
        service.short_url(&stats.shortlink).bright_cyan()
    );
    println!("  Long URL:   {}", stats.shortlink.long_url);
    println!(
        "  Created:    {}",
        stats
            .shortlink
            .created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );
    println!(
        "  Visits:     {}",
        stats.visits.to_string().bright_green().bold()
    );
    println!("  Last visit: {}", format_last_visit(&stats));
    println!();

    Ok(())
}

fn handle_slug_action(action: SlugAction) -> Result<()> {
    match action {
        SlugAction::Encode { id } => println!("{}", slug::encode(id)),
        SlugAction::Decode { slug: input } => {
            let id = slug::decode(&input).with_context(|| format!("'{input}' is not a valid slug"))?;
            println!("{id}");
        }
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, config: &Config, pool: &PgPool) -> Result<()> {
    let service = shortlink_service(config, pool);

    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            service.ping().await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let shortlinks = service.count().await?;

            let (visited, visits): (i64, Option<i64>) =
                sqlx::query_as("SELECT COUNT(*), SUM(visits)::BIGINT FROM shortlink_stat")
                    .fetch_one(pool)
                    .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Shortlinks: {} ({} visited)",
                shortlinks.to_string().bright_green().bold(),
                visited.to_string().bright_green()
            );
            println!(
                "  Visits:     {}",
                visits.unwrap_or(0).to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}
