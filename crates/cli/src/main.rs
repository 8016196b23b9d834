use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::DataIndex;
use recommender::{DEFAULT_TOP_K, Recommendation, Recommender, SelfMatchPolicy};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::info;

/// CineMatch - Movie Recommender
#[derive(Parser)]
#[command(name = "cinematch")]
#[command(about = "Find movies similar to one you like, from a precomputed similarity matrix", long_about = None)]
struct Cli {
    /// Directory holding movies.json and similarity.bin / similarity.json
    #[arg(short, long, default_value = "data/sample")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get movies similar to a title
    Recommend {
        /// Exact movie title (case-sensitive)
        #[arg(long)]
        title: String,

        /// Number of recommendations to return
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        limit: usize,

        /// Skip the query's own row instead of the top-ranked entry
        #[arg(long)]
        exclude_self_index: bool,

        /// Characters of overview to show per recommendation
        #[arg(long, default_value = "150")]
        snippet: usize,

        /// Print results as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List catalog titles in order
    Titles {
        /// Maximum number of titles to print
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,

        /// Maximum number of matches to print
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Show catalog statistics
    Stats,

    /// Run benchmark to test lookup performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "1000")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "8")]
        concurrent: usize,
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

    // Load artifacts once; everything after this is read-only
    info!("Loading artifacts from {}", cli.data_dir.display());
    let start = Instant::now();
    let data_index = Arc::new(
        DataIndex::load_from_files(&cli.data_dir)
            .with_context(|| format!("Failed to load artifacts from {}", cli.data_dir.display()))?,
    );
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        data_index.len(),
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            title,
            limit,
            exclude_self_index,
            snippet,
            json,
        } => handle_recommend(data_index, &title, limit, exclude_self_index, snippet, json)?,
        Commands::Titles { limit } => handle_titles(&data_index, limit),
        Commands::Search { title, limit } => handle_search(&data_index, &title, limit),
        Commands::Stats => handle_stats(&data_index),
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(data_index, requests, concurrent).await?,
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    data_index: Arc<DataIndex>,
    title: &str,
    limit: usize,
    exclude_self_index: bool,
    snippet: usize,
    json: bool,
) -> Result<()> {
    let policy = if exclude_self_index {
        SelfMatchPolicy::ExcludeQueryIndex
    } else {
        SelfMatchPolicy::DropTopRanked
    };
    let recommender = Recommender::new(data_index.clone()).with_self_match(policy);

    let recommendations = match recommender.recommend_k(title, limit) {
        Ok(recs) => recs,
        Err(err) => {
            // anyhow reports the error itself on the way out
            if let Some(hint) = did_you_mean(&data_index, title) {
                eprint!("{}", hint);
            }
            return Err(err.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
    } else {
        println!(
            "{}",
            format!("Movies similar to {}:", title).bold().blue()
        );
        print_recommendations(&recommendations, snippet);
    }
    Ok(())
}

/// Close title matches for a title that was not found
fn did_you_mean(data_index: &DataIndex, title: &str) -> Option<String> {
    let suggestions = data_index.catalog().search(title, 5);
    if suggestions.is_empty() {
        return None;
    }
    let mut hint = String::from("Did you mean:\n");
    for (_, record) in suggestions {
        hint.push_str(&format!("  - {}\n", record.title));
    }
    Some(hint)
}

/// Handle the 'titles' command
fn handle_titles(data_index: &DataIndex, limit: Option<usize>) {
    let limit = limit.unwrap_or(data_index.len());
    for (idx, title) in data_index.catalog().titles().take(limit).enumerate() {
        println!("{:>6}  {}", idx, title);
    }
}

/// Handle the 'search' command
fn handle_search(data_index: &DataIndex, title: &str, limit: usize) {
    let matches = data_index.catalog().search(title, limit);

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("  (no matches)");
    }
    for (idx, record) in matches {
        println!(
            "{}: {} [{}]",
            idx,
            record.title,
            record.genres.as_deref().unwrap_or(recommender::DEFAULT_GENRES)
        );
    }
}

/// Handle the 'stats' command
fn handle_stats(data_index: &DataIndex) {
    let catalog = data_index.catalog();
    let with_genres = catalog.records().iter().filter(|r| r.genres.is_some()).count();
    let with_overview = catalog.records().iter().filter(|r| r.overview.is_some()).count();
    let size = data_index.similarity().size();

    println!("{}", "Catalog statistics:".bold().blue());
    println!("{}Total movies: {}", "• ".green(), catalog.len());
    println!("{}With genres: {}", "• ".green(), with_genres);
    println!("{}With overview: {}", "• ".green(), with_overview);
    println!("{}Similarity matrix: {}x{}", "• ".cyan(), size, size);
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    data_index: Arc<DataIndex>,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    if data_index.is_empty() {
        bail!("Cannot benchmark an empty catalog");
    }
    if requests == 0 {
        bail!("Benchmark needs at least one request");
    }

    let recommender = Recommender::new(data_index.clone());

    // Pick random titles from the catalog
    let titles: Vec<String> = (0..requests)
        .map(|_| {
            let idx = rand::random::<u32>() as usize % data_index.len();
            data_index
                .catalog()
                .get(idx)
                .map(|r| r.title.clone())
                .unwrap_or_default()
        })
        .collect();

    // Bound the number of in-flight lookups
    let semaphore = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();
    let mut handles = vec![];
    for title in titles {
        let recommender = recommender.clone();
        let permit = semaphore.clone().acquire_owned().await?;
        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let start = Instant::now();
            recommender.recommend(&title)?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }
    let total_time = wall_clock.elapsed();

    timings.sort();
    let busy_time: Duration = timings.iter().sum();
    let avg_latency = busy_time / (timings.len() as u32);
    let p50 = timings[timings.len() / 2];
    let p95 = timings[(timings.len() as f32 * 0.95) as usize];
    let p99 = timings[(timings.len() as f32 * 0.99) as usize];
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", requests, concurrent.max(1));
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[Recommendation], snippet: usize) {
    if recommendations.is_empty() {
        println!("  (no other movies in the catalog)");
        return;
    }
    for (rank, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} - Match Score: {}",
            (rank + 1).to_string().green(),
            rec.title.bold(),
            format!("{:.2}%", rec.score).green()
        );
        println!("   Genres: {}", rec.genres);
        println!("   {}", rec.overview_snippet(snippet));
    }
}
