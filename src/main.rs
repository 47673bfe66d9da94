use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use track_discov::{
    models::{DiscoveryInput, DiscoveryResult, NO_STRUCTURED_RECOMMENDATIONS},
    Config, Discovery, ErrorBody, HttpRecommendationProvider,
};

#[derive(Parser, Debug)]
#[command(version, about = "Discover music recommendations by genre or by tracks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Recommend songs for a genre
    Genre {
        /// Genre label, e.g. "rock" or "city pop"
        genre: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Recommend songs similar to up to 10 tracks
    Tracks {
        /// Track or "track - artist" strings
        #[arg(required = true, num_args = 1..)]
        tracks: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Number of recommendations (1-30)
    #[arg(short = 'n', long)]
    count: Option<i64>,

    /// Print the result as JSON
    #[arg(long, action)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("track_discov=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let provider = HttpRecommendationProvider::from_config(&config)?;
    let discovery = Discovery::new(provider);

    let default_count = i64::from(config.default_count().get());
    let (input, output) = match cli.command {
        Commands::Genre { genre, output } => (
            DiscoveryInput::genre(genre, output.count.unwrap_or(default_count)),
            output,
        ),
        Commands::Tracks { tracks, output } => (
            DiscoveryInput::tracks(tracks, output.count.unwrap_or(default_count)),
            output,
        ),
    };

    match discovery.submit(input).await {
        Ok(result) => {
            if output.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&result);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            let body = ErrorBody::from(&e);
            if output.json {
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                eprintln!("{}", body.error);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_result(result: &DiscoveryResult) {
    println!("{}", result.top_songs_heading());
    for song in &result.top_songs {
        println!("  * {}", song);
    }

    println!();
    println!("{}", result.recommendations_heading());
    if !result.has_structured_recommendations() {
        println!("  {}", NO_STRUCTURED_RECOMMENDATIONS);
        return;
    }

    for record in &result.recommendations {
        println!();
        println!("  {}", record.song);
        println!("  by {}", record.artist);
        println!("  {}", record.description);
    }
}
