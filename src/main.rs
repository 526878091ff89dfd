use clap::Parser;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use topwords::config::Config;
use topwords::emit;
use topwords::model::Outcome;
use topwords::{parse_url, HttpFetcher, Pipeline};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "topwords", version, about = "Report the most frequent words on a web page")]
struct Cli {
    /// Absolute http(s) URL of the page
    #[arg(required_unless_present = "input", conflicts_with = "input")]
    url: Option<String>,

    /// Rank text from a file instead of fetching a page ("-" for stdin)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Number of words to report (default: from config or 5)
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Print the report exactly, with carriage-return separators
    #[arg(long, conflicts_with = "json")]
    raw: bool,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Do not load frames and iframes
    #[arg(long)]
    no_frames: bool,

    /// Apply Unicode NFKC folding before counting
    #[arg(long)]
    nfkc: bool,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn die(msg: &str) -> ! {
    eprintln!("error: {}", msg);
    process::exit(2);
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn read_input(path: &Path) -> String {
    if path.as_os_str() == "-" {
        io::read_to_string(io::stdin()).unwrap_or_else(|e| die(&format!("cannot read stdin: {}", e)))
    } else {
        fs::read_to_string(path)
            .unwrap_or_else(|e| die(&format!("cannot read {}: {}", path.display(), e)))
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Load config
    let mut config = match cli.config {
        Some(ref path) => Config::load(path),
        None => Config::discover(),
    }
    .unwrap_or_else(|e| die(&e.to_string()));

    // CLI overrides
    if let Some(n) = cli.limit {
        config.limit = n;
    }
    if let Some(secs) = cli.timeout {
        config.timeout_secs = secs;
    }
    if cli.no_frames {
        config.follow_frames = false;
    }
    if cli.nfkc {
        config.unicode_nfkc = true;
    }
    config.validate().unwrap_or_else(|e| die(&e.to_string()));

    let outcome = if let Some(ref path) = cli.input {
        topwords::process(&read_input(path), &config)
    } else {
        let raw_url = cli.url.as_deref().unwrap_or_default();
        let url = parse_url(raw_url).unwrap_or_else(|e| die(&e.to_string()));
        let fetcher = HttpFetcher::new(&config).unwrap_or_else(|e| die(&e.to_string()));
        let pipeline = Pipeline::new(fetcher, config);
        match pipeline.run(&url).await {
            Ok(outcome) => outcome,
            Err(e) => die(&e.to_string()),
        }
    };

    if cli.json {
        println!("{}", emit::render_json(&outcome));
    } else if cli.raw {
        print!("{}", emit::render(&outcome));
    } else {
        let text = emit::render(&outcome);
        match &outcome {
            Outcome::Ranked { .. } => print!("{}", text.replace('\r', "\n")),
            _ => println!("{}", text),
        }
    }

    if outcome.is_failure() {
        process::exit(1);
    }
}
