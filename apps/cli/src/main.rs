use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use tldw_core::{
    Endpoint, Location, Session, Settings, TldwClient, format_summary_readable,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}

#[derive(Parser)]
#[command(name = "tldw")]
#[command(about = "Summarize a YouTube video and ask follow-up questions about it")]
struct Cli {
    /// YouTube video URL
    #[arg(required_unless_present_any = ["video", "health"], value_parser = non_blank)]
    url: Option<String>,

    /// Open a video by id, the way a shared `?v=<id>` link does
    #[arg(short, long, conflicts_with = "url", value_parser = non_blank)]
    video: Option<String>,

    /// Follow-up question about the video. Repeat to ask several.
    #[arg(short = 'q', long = "ask")]
    questions: Vec<String>,

    /// Talk to the local development backend
    #[arg(long, conflicts_with = "api")]
    local: bool,

    /// Backend origin, e.g. "https://api.tldw.tube"
    #[arg(long)]
    api: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Check that the backend is up and exit
    #[arg(long)]
    health: bool,
}

fn non_blank(value: &str) -> std::result::Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("expected a YouTube URL or video id, got an empty value".to_string());
    }
    Ok(value.to_string())
}

fn create_spinner(msg: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")?,
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    Ok(pb)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_endpoint(cli: &Cli) -> Result<Endpoint> {
    if let Some(origin) = &cli.api {
        return Ok(Endpoint::custom(origin)?);
    }
    if cli.local {
        return Ok(Endpoint::Local);
    }
    Ok(Settings::load()?.endpoint)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let endpoint = resolve_endpoint(&cli)?;
    debug!(endpoint = endpoint.origin(), "resolved backend");
    let client = TldwClient::new(endpoint);

    if cli.health {
        let reply = client.health().await?;
        if reply.is_success() {
            println!(
                "{} {} is {}",
                style("✓").green().bold(),
                client.endpoint().origin(),
                reply.body.status
            );
            return Ok(());
        }
        eprintln!(
            "{} {} answered {}",
            style("Error:").red().bold(),
            client.endpoint().origin(),
            reply.status
        );
        std::process::exit(1);
    }

    let location = cli
        .video
        .as_deref()
        .map(Location::with_video)
        .unwrap_or_default();
    let mut session = Session::new(client, location);

    if !cli.json {
        println!(
            "\n{}  {}\n",
            style("tldw").cyan().bold(),
            style("Too Long; Didn't Watch").dim()
        );
    }

    let started = Instant::now();
    let spinner = create_spinner("Analyzing video...")?;
    match &cli.url {
        Some(url) => session.submit(url).await,
        None => session.open().await,
    }
    spinner.finish_and_clear();

    let controller = session.controller();
    if let Some(error) = controller.error() {
        eprintln!("{} {}", style("Error:").red().bold(), error);
        std::process::exit(1);
    }
    let Some(video) = controller.results().cloned() else {
        anyhow::bail!("backend returned no summary");
    };

    if !cli.json {
        println!(
            "{} Summarized {} {}",
            style("✓").green().bold(),
            style(controller.location()).yellow(),
            style(format!("[{}]", format_duration(started.elapsed()))).dim()
        );
        println!("{}", style("─".repeat(60)).dim());
        println!("{}", format_summary_readable(&video));
    }

    let mut answers = Vec::new();
    let mut failed = false;
    for question in &cli.questions {
        if question.trim().is_empty() {
            eprintln!("{} skipping empty question", style("!").yellow().bold());
            continue;
        }

        let spinner = create_spinner("Thinking...")?;
        session.ask(question).await;
        spinner.finish_and_clear();

        let followup = session.controller().followup();
        match (&followup.error, session.controller().visible_answer()) {
            (Some(error), _) => {
                failed = true;
                if !cli.json {
                    eprintln!("{} {}", style("Error:").red().bold(), error);
                }
                answers.push(json!({ "question": question, "error": error }));
            }
            (None, Some(answer)) => {
                if !cli.json {
                    println!("{} {}", style("Q:").cyan().bold(), question);
                    println!("{} {}\n", style("A:").green().bold(), answer);
                }
                answers.push(json!({ "question": question, "answer": answer }));
            }
            (None, None) => {}
        }
    }

    if cli.json {
        let output = json!({
            "location": session.controller().location().to_string(),
            "video": video.info,
            "summary": video.summary,
            "followups": answers,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}
