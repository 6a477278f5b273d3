use anyhow::Context;
use clap::{Parser, Subcommand};
use housing_finder::{
    transfer, Aggregator, Config, FilterCriteria, KeywordTranslator, ListingFinder, Page,
    QueryTranslator, RemoteTranslator, SearchEngine, Store,
};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "housing-finder", about = "Search a real-estate catalog in plain words")]
struct Cli {
    /// Overrides DATABASE_URL
    #[arg(long)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the schema and the default types, districts and features
    Seed,
    /// Free-text search, e.g. "2-room apartment with balcony up to 100000"
    Search {
        #[arg(required = true)]
        text: Vec<String>,
        /// One-based result page
        #[arg(long, default_value_t = 1)]
        page: i64,
    },
    /// Menu-style search with explicit filters
    Browse {
        #[arg(long)]
        district: Option<i64>,
        #[arg(long = "type")]
        type_id: Option<i64>,
        #[arg(long)]
        rooms: Option<i64>,
        #[arg(long)]
        min_price: Option<f64>,
        #[arg(long)]
        max_price: Option<f64>,
        #[arg(long = "feature")]
        features: Vec<i64>,
        #[arg(long, default_value_t = 1)]
        page: i64,
    },
    /// Show one listing (counts a view)
    Show { id: i64 },
    /// List districts, property types and features
    Menu,
    /// Catalog statistics
    Stats,
    /// Export available listings to a JSON file
    Export { path: PathBuf },
    /// Import listings from a JSON file
    Import { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(url) = cli.database_url {
        config.database_url = url;
    }

    info!("🏠 Housing Finder");

    let store = Store::connect(&config.database_url)
        .await
        .context("Failed to open listing store")?;
    store.init_schema().await.context("Failed to create schema")?;

    let engine = SearchEngine::new(store.clone());

    match cli.command {
        Command::Seed => {
            store.seed_reference_data().await?;
            info!("✅ Store ready at {}", config.database_url);
        }
        Command::Search { text, page } => {
            let text = text.join(" ");
            let translator = build_translator(&config, &store).await?;
            let finder = ListingFinder::new(translator, engine, config.page_size);

            let reply = finder
                .respond_page(&text, Page::nth(config.page_size, page))
                .await;
            println!("{}", reply.message());
        }
        Command::Browse {
            district,
            type_id,
            rooms,
            min_price,
            max_price,
            features,
            page,
        } => {
            let filters = FilterCriteria {
                district_id: district,
                type_id,
                rooms,
                min_price,
                max_price,
                features: features.into_iter().collect::<BTreeSet<_>>(),
                ..Default::default()
            };
            let translator = build_translator(&config, &store).await?;
            let finder = ListingFinder::new(translator, engine, config.page_size);
            let reply = finder.browse(filters, Page::nth(config.page_size, page)).await;
            println!("{}", reply.message());
        }
        Command::Show { id } => match store.get_listing(id).await? {
            Some(details) => println!("{}", serde_json::to_string_pretty(&details)?),
            None => println!("Listing {} not found", id),
        },
        Command::Menu => {
            println!("Districts:");
            for d in store.districts().await? {
                println!("  {}. {} (popularity {})", d.id, d.name, d.popularity);
            }
            println!("Property types:");
            for t in store.property_types().await? {
                println!("  {}. {}", t.id, t.name);
            }
            println!("Features:");
            for f in store.features().await? {
                println!("  {}. {}", f.id, f.name);
            }
        }
        Command::Stats => {
            let stats = Aggregator::new(store.clone()).statistics().await?;
            println!("📊 Listings: {}", stats.total_listings);
            match (stats.average_price, stats.average_area) {
                (Some(price), Some(area)) => {
                    println!("   Average price: {:.2}", price);
                    println!("   Average area: {} m²", area);
                }
                _ => println!("   No averages yet"),
            }
            for (name, count) in &stats.by_type {
                println!("   {}: {}", name, count);
            }
            for (name, count) in &stats.by_district {
                println!("   {}: {}", name, count);
            }
            println!("Popular features:");
            for usage in &stats.popular_features {
                println!("   {}: {} listings", usage.name, usage.count);
            }
        }
        Command::Export { path } => {
            let count = transfer::export_to_file(&engine, &path).await?;
            info!("💾 Saved {} listings to {}", count, path.display());
        }
        Command::Import { path } => {
            let report = transfer::import_from_file(&store, &path).await?;
            info!(
                "Imported {} listings, skipped {}",
                report.imported, report.skipped
            );
        }
    }

    store.close().await;
    Ok(())
}

async fn build_translator(config: &Config, store: &Store) -> anyhow::Result<Arc<dyn QueryTranslator>> {
    match &config.ai_api_url {
        Some(url) => {
            let remote = RemoteTranslator::new(url.clone(), config.ai_api_key.clone(), config.ai_timeout)?;
            Ok(Arc::new(remote))
        }
        None => Ok(Arc::new(KeywordTranslator::from_store(store).await?)),
    }
}

