use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use clipsight_core::{display_lines, extract_analysis, ApiClient};

#[derive(Parser)]
#[command(name = "clipsight")]
#[command(about = "Upload videos to the analysis server and print time-stamped action labels")]
struct Cli {
    /// Analysis server origin (overrides CLIPSIGHT_API_URL)
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upload a local video file
    Upload {
        /// Path to the video file
        path: PathBuf,
    },
    /// Ask the server to fetch and store a video from a remote URL
    UploadUrl {
        /// Publicly reachable video URL
        url: String,
    },
    /// List videos available on the server
    List,
    /// Analyze an uploaded video and print its labelled segments
    Analyze {
        /// Server-side file name, as shown by `list`
        filename: String,
    },
    /// Download an uploaded video for local playback
    Fetch {
        /// Server-side file name, as shown by `list`
        filename: String,

        /// Output path (defaults to the server-side file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", style("Error:").red().bold(), message);
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let client = match cli.base_url {
        Some(base_url) => ApiClient::new(base_url),
        None => ApiClient::from_env(),
    };

    match cli.command {
        Command::Upload { path } => upload(&client, &path).await,
        Command::UploadUrl { url } => upload_url(&client, &url).await,
        Command::List => list(&client).await,
        Command::Analyze { filename } => analyze(&client, &filename).await,
        Command::Fetch { filename, output } => fetch(&client, &filename, output).await,
    }

    Ok(())
}

async fn upload(client: &ApiClient, path: &Path) {
    let spinner = create_spinner("Uploading video...");
    match client.upload_file(path).await {
        Ok(receipt) => {
            log::debug!("upload receipt: {receipt:?}");
            spinner.finish_with_message(format!(
                "{} Video uploaded successfully",
                style("✓").green().bold()
            ));
        }
        Err(e) => {
            spinner.finish_and_clear();
            fail(format!("Error uploading video: {e}"));
        }
    }
}

async fn upload_url(client: &ApiClient, url: &str) {
    if url.trim().is_empty() {
        fail("Please enter a video URL");
    }

    let spinner = create_spinner("Uploading video from URL...");
    match client.upload_url(url).await {
        Ok(receipt) => {
            log::debug!("upload receipt: {receipt:?}");
            spinner.finish_with_message(format!(
                "{} Video uploaded successfully",
                style("✓").green().bold()
            ));
        }
        Err(e) => {
            spinner.finish_and_clear();
            fail(format!("Error uploading video: {e}"));
        }
    }
}

async fn list(client: &ApiClient) {
    // List failures only get logged; the listing degrades to empty output.
    match client.list_files().await {
        Ok(files) => {
            for file in files {
                println!("{file}");
            }
        }
        Err(e) => log::error!("Error fetching video files: {e}"),
    }
}

async fn analyze(client: &ApiClient, filename: &str) {
    let spinner = create_spinner("Analyzing video...");
    match client.analyze(filename).await {
        Ok(response) => {
            spinner.finish_and_clear();
            if let Some(desc) = response.primary_description() {
                let outcome = extract_analysis(desc);
                for line in display_lines(&outcome) {
                    println!("{line}");
                }
            } else if let Some(err) = &response.error {
                fail(err);
            } else {
                println!("{}", style("No analysis returned").dim());
            }
        }
        Err(e) => {
            spinner.finish_and_clear();
            fail(e);
        }
    }
}

async fn fetch(client: &ApiClient, filename: &str, output: Option<PathBuf>) {
    let dest = output.unwrap_or_else(|| PathBuf::from(filename));
    let spinner = create_spinner("Downloading video...");
    match client.download(filename, &dest).await {
        Ok(()) => {
            spinner.finish_with_message(format!(
                "{} Saved: {}",
                style("✓").green().bold(),
                style(dest.display()).cyan()
            ));
            println!(
                "{} {}",
                style("Playback URL:").dim(),
                client.playback_url(filename)
            );
        }
        Err(e) => {
            spinner.finish_and_clear();
            fail(e);
        }
    }
}
