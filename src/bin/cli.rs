use anyhow::{Context, Result};
use celebrity_search::lookup::{Limits, Lookup};
use celebrity_search::AppConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::exit;
use tracing::Level;

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Identify the person in an image and list related media
    Lookup {
        image: PathBuf,
        /// Number of image urls to fetch
        #[arg(long)]
        images: Option<usize>,
        /// Number of video urls to fetch per platform
        #[arg(long)]
        videos: Option<usize>,
    },
    /// Only identify the person in an image
    Identify { image: PathBuf },
}

fn print_urls(heading: &str, urls: &[String]) {
    println!("\n{}\n", heading);
    if urls.is_empty() {
        println!("(none)");
    }
    for (i, url) in urls.iter().enumerate() {
        println!("{}. {}", i + 1, url);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let cli = Cli::parse();

    let config_path = cli
        .config
        .ok_or_else(|| anyhow::anyhow!("Config file path required"))?;
    let cfg = AppConfig::new_from_file_and_env(&config_path).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        exit(1);
    });

    let lookup = Lookup::new(&cfg)?;

    match &cli.command {
        Commands::Lookup {
            image,
            images,
            videos,
        } => {
            let data = tokio::fs::read(image)
                .await
                .with_context(|| format!("reading {}", image.display()))?;

            let mut limits = Limits::from_config(&cfg);
            if let Some(images) = images {
                limits.images = *images;
            }
            if let Some(videos) = videos {
                limits.videos = *videos;
            }

            let results = lookup.run(&data, limits).await?;
            println!("Detected: {}", results.celebrity_name);

            print_urls(
                &format!("{} image urls for {}", limits.images, results.celebrity_name),
                &results.image_urls,
            );
            print_urls("YouTube videos", &results.youtube_urls);
            print_urls("Vimeo videos", &results.vimeo_urls);
            print_urls("Dailymotion videos", &results.dailymotion_urls);
        }
        Commands::Identify { image } => {
            let data = tokio::fs::read(image)
                .await
                .with_context(|| format!("reading {}", image.display()))?;
            let label = lookup.identity.resolve(&data).await?;
            println!("{}", label);
        }
    }

    Ok(())
}
