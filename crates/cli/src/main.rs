use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{CatalogData, MovieId};
use metadata::{MetadataConfig, MetadataFetcher, MovieDetails};
use server::{MovieRecommendation, RecommendationService};
use similarity::{DEFAULT_RECOMMENDATIONS, SimilarityIndex};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::warn;

/// ReelMatch - "more like this" movie recommendations
#[derive(Parser)]
#[command(name = "reel-match")]
#[command(about = "Recommend movies similar to a title, with TMDB metadata", long_about = None)]
struct Cli {
    /// Path to the precomputed catalog + similarity artifact (JSON)
    #[arg(short, long, default_value = "data/movie_data.json")]
    data: PathBuf,

    /// TMDB API key
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Timeout for each metadata request, in seconds
    #[arg(long, env = "TMDB_TIMEOUT_SECS", default_value = "5")]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to a title
    Recommend {
        /// Exact catalog title (case-sensitive)
        #[arg(long)]
        title: String,

        /// Number of recommendations to return
        #[arg(long, default_value_t = DEFAULT_RECOMMENDATIONS)]
        limit: usize,

        /// Skip fetching posters, overviews and ratings
        #[arg(long)]
        no_details: bool,
    },

    /// List catalog titles in sorted order
    Titles {
        /// Only show titles containing this text (case-insensitive)
        #[arg(long)]
        filter: Option<String>,
    },

    /// Show metadata for one movie
    Details {
        /// TMDB movie id
        #[arg(long)]
        movie_id: MovieId,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Without the catalog there is nothing to serve
    let start = Instant::now();
    let catalog = Arc::new(
        CatalogData::load_from_file(&cli.data).context("Failed to load similarity artifact")?,
    );
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        catalog.len(),
        start.elapsed()
    );

    let config = MetadataConfig::new(cli.api_key.clone().unwrap_or_default())
        .with_timeout(Duration::from_secs(cli.timeout_secs));
    let fetcher = Arc::new(
        MetadataFetcher::tmdb(&config).context("Failed to create TMDB client")?,
    );
    let service = RecommendationService::new(SimilarityIndex::new(catalog.clone()), fetcher);

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            title,
            limit,
            no_details,
        } => {
            let with_details = !no_details && cli.api_key.is_some();
            if !no_details && !with_details {
                warn!("No TMDB API key given; showing titles only");
            }
            handle_recommend(&service, &title, limit, with_details).await
        }
        Commands::Titles { filter } => handle_titles(&catalog, filter.as_deref()),
        Commands::Details { movie_id } => {
            if cli.api_key.is_none() {
                bail!("A TMDB API key is required (--api-key or TMDB_API_KEY)");
            }
            handle_details(&service, movie_id).await
        }
    }
}

/// Handle the 'recommend' command
async fn handle_recommend(
    service: &RecommendationService,
    title: &str,
    limit: usize,
    with_details: bool,
) -> Result<()> {
    if !with_details {
        let movies = service.recommend(title, limit);
        if movies.is_empty() {
            println!("{}", "No recommendations found for this movie.".red());
            return Ok(());
        }
        println!("{}", format!("Movies similar to '{}':", title).bold().blue());
        for (i, movie) in movies.iter().enumerate() {
            println!("{}. {} [{}]", (i + 1).to_string().green(), movie.title, movie.id);
        }
        return Ok(());
    }

    let recommendations = service.get_recommendations(title, limit).await;
    if recommendations.is_empty() {
        println!("{}", "No recommendations found for this movie.".red());
        return Ok(());
    }
    print_recommendations(title, &recommendations);
    Ok(())
}

/// Handle the 'titles' command
fn handle_titles(catalog: &CatalogData, filter: Option<&str>) -> Result<()> {
    let filter = filter.map(str::to_lowercase);
    let titles: Vec<&str> = catalog
        .sorted_titles()
        .into_iter()
        .filter(|t| match &filter {
            Some(f) => t.to_lowercase().contains(f),
            None => true,
        })
        .collect();

    for title in &titles {
        println!("{}", title);
    }
    println!("{}", format!("{} titles", titles.len()).dimmed());
    Ok(())
}

/// Handle the 'details' command
async fn handle_details(service: &RecommendationService, movie_id: MovieId) -> Result<()> {
    let details = service.fetch_details(movie_id).await;
    print_details(&details);
    Ok(())
}

/// Print one card per recommendation
fn print_recommendations(title: &str, recommendations: &[MovieRecommendation]) {
    println!(
        "{}",
        format!("Top {} recommendations for '{}':", recommendations.len(), title)
            .bold()
            .blue()
    );
    for rec in recommendations {
        print!("{}. ", rec.rank.to_string().green());
        print_details(&rec.details);
    }
}

fn print_details(details: &MovieDetails) {
    println!(
        "{} ({})  {} {}",
        details.title.bold(),
        details.year,
        "★".yellow(),
        details.rating
    );
    println!("   {}", details.overview);
    println!("   {}", details.poster_url.dimmed());
}
