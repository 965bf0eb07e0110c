use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use eduthreat::analytics::{group_by_region, stats::rate_of_total};
use eduthreat::config::DashboardConfig;
use eduthreat::feed::{FeedClient, IncidentFeed};
use eduthreat::query::{IncidentFilter, IncidentQuery};
use eduthreat::taxonomy;

#[derive(Parser)]
#[command(
    name = "eduthreat",
    about = "Dashboard core for cyber-incident intelligence in the education sector",
    version,
    long_about = None
)]
struct Cli {
    /// Path to a TOML config file (defaults to EDUTHREAT_CONFIG or
    /// /etc/eduthreat/eduthreat.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the dashboard daemon (API server + background refresh)
    Serve {
        /// Bind address (overrides the config file)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Print headline statistics from the feed
    Stats,

    /// Print incidents grouped by country
    Countries {
        /// Maximum number of countries
        #[arg(long, default_value = "20")]
        limit: u32,
    },

    /// Print incidents grouped into geographic regions
    Regions {
        /// Maximum number of countries fetched before grouping
        #[arg(long, default_value = "50")]
        limit: u32,
    },

    /// Print the most active threat actors
    Actors {
        /// Maximum number of actors
        #[arg(long, default_value = "20")]
        limit: u32,
    },

    /// List incidents with optional filters
    Incidents {
        #[arg(long)]
        country: Option<String>,

        #[arg(long)]
        attack_category: Option<String>,

        #[arg(long)]
        ransomware_family: Option<String>,

        #[arg(long)]
        threat_actor: Option<String>,

        #[arg(long)]
        year: Option<i32>,

        /// Only incidents with completed enrichment
        #[arg(long)]
        enriched_only: bool,

        /// Free-text search over institution, title, and actor names
        #[arg(long)]
        search: Option<String>,

        #[arg(long, default_value = "1")]
        page: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::load_or_default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    match cli.command {
        Commands::Serve { bind } => {
            let mut config = config;
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            tracing::info!(bind = %config.server.bind, "Starting eduthreat dashboard");
            eduthreat::serve(config).await?;
        }
        Commands::Stats => {
            let feed = feed_client(&config)?;
            let stats = feed.stats().await?;

            println!("\nEduThreat Feed Statistics");
            println!("{:<26} : {}", "Total incidents", stats.total_incidents);
            println!("{:<26} : {}", "Enriched", stats.enriched_incidents);
            println!("{:<26} : {}", "Pending analysis", stats.unenriched_incidents);
            println!("{:<26} : {}", "Ransomware incidents", stats.incidents_with_ransomware);
            println!("{:<26} : {}", "Data breaches", stats.incidents_with_data_breach);
            println!("{:<26} : {}", "Countries affected", stats.countries_affected);
            println!("{:<26} : {}", "Threat actors", stats.unique_threat_actors);
            println!("{:<26} : {}", "Ransomware families", stats.unique_ransomware_families);
            println!(
                "{:<26} : {:.1}%",
                "Ransomware rate (total)",
                rate_of_total(stats.incidents_with_ransomware, stats.total_incidents)
            );
            println!(
                "{:<26} : {:.1}%",
                "Enrichment coverage",
                rate_of_total(stats.enriched_incidents, stats.total_incidents)
            );
            println!("{:<26} : {}", "Last updated", stats.last_updated);
            println!();
        }
        Commands::Countries { limit } => {
            let feed = feed_client(&config)?;
            let analytics = feed.countries(limit).await?;

            if analytics.data.is_empty() {
                println!("No country data available.");
            } else {
                println!("{:<4} {:<28} | {:>8} | {:>6}", "", "Country", "Count", "%");
                println!("{:-<4}-{:-<28}-|-{:-<8}-|-{:-<6}", "", "", "", "");
                for entry in &analytics.data {
                    let flag = taxonomy::country_flag(
                        Some(&entry.category),
                        entry.flag_emoji.as_deref(),
                    );
                    println!(
                        "{:<4} {:<28} | {:>8} | {:>5.1}%",
                        flag, entry.category, entry.count, entry.percentage
                    );
                }
                println!(
                    "\n{} incidents across {} countries",
                    analytics.total,
                    analytics.data.len()
                );
            }
        }
        Commands::Regions { limit } => {
            let feed = feed_client(&config)?;
            let analytics = feed.countries(limit).await?;
            let buckets = group_by_region(&analytics.data);

            if buckets.is_empty() {
                println!("No country data available.");
            }
            for bucket in buckets {
                println!("\n=== {} ({} incidents) ===", bucket.region, bucket.total);
                for country in &bucket.countries {
                    let flag = taxonomy::country_flag(
                        Some(&country.category),
                        country.flag_emoji.as_deref(),
                    );
                    println!("  {} {:<28} {}", flag, country.category, country.count);
                }
            }
            println!();
        }
        Commands::Actors { limit } => {
            let feed = feed_client(&config)?;
            let analytics = feed.threat_actors(limit).await?;

            if analytics.threat_actors.is_empty() {
                println!("No threat actor data available.");
            } else {
                for actor in &analytics.threat_actors {
                    println!("\n{} ({} incidents)", actor.name, actor.incident_count);
                    if !actor.countries_targeted.is_empty() {
                        let shown: Vec<&str> = actor
                            .countries_targeted
                            .iter()
                            .take(6)
                            .map(String::as_str)
                            .collect();
                        let more = actor.countries_targeted.len().saturating_sub(6);
                        let suffix = if more > 0 {
                            format!(" +{} more", more)
                        } else {
                            String::new()
                        };
                        println!("  Countries : {}{}", shown.join(", "), suffix);
                    }
                    if !actor.ransomware_families.is_empty() {
                        println!("  Families  : {}", actor.ransomware_families.join(", "));
                    }
                    println!(
                        "  Active    : {} - {}",
                        taxonomy::format_date(actor.first_seen.as_deref()),
                        taxonomy::format_date(actor.last_seen.as_deref())
                    );
                }
                println!("\n{} threat actors total", analytics.total);
            }
        }
        Commands::Incidents {
            country,
            attack_category,
            ransomware_family,
            threat_actor,
            year,
            enriched_only,
            search,
            page,
        } => {
            let feed = feed_client(&config)?;

            let mut query = IncidentQuery::new(config.server.per_page);
            query.set_filter(IncidentFilter {
                country,
                attack_category,
                ransomware_family,
                threat_actor,
                institution_type: None,
                year,
                enriched_only,
            });
            query.set_search(search);
            query.set_page(page);

            let list = feed.incidents(&query).await?;
            if list.incidents.is_empty() {
                println!("No incidents found matching your criteria.");
                return Ok(());
            }

            println!(
                "{:<40} | {:<13} | {:<18} | {:<18} | {:<10}",
                "Institution", "Date", "Attack Type", "Threat Actor", "Status"
            );
            println!(
                "{:-<40}-|-{:-<13}-|-{:-<18}-|-{:-<18}-|-{:-<10}",
                "", "", "", "", ""
            );
            for incident in &list.incidents {
                println!(
                    "{:<40} | {:<13} | {:<18} | {:<18} | {:<10}",
                    truncate(&incident.university_name, 40),
                    taxonomy::format_date(incident.incident_date.as_deref()),
                    taxonomy::display_label(incident.attack_label_source()),
                    incident.threat_actor_name.as_deref().unwrap_or("-"),
                    incident.status
                );
            }

            let meta = &list.pagination;
            match meta.display_range() {
                Some((start, end)) => println!(
                    "\nShowing {} to {} of {} incidents (page {} of {})",
                    start, end, meta.total, meta.page, meta.total_pages
                ),
                None => println!("\n0 incidents"),
            }
        }
    }

    Ok(())
}

fn feed_client(config: &DashboardConfig) -> Result<FeedClient> {
    Ok(FeedClient::new(
        &config.upstream.base_url,
        Duration::from_secs(config.upstream.timeout_sec),
    )?)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
