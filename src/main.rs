use clap::Parser;
use dotenv::dotenv;
use std::error::Error;
use tokio::io::{stdin, stdout, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use github_user_search_lib::repl::{run_interactive, run_once};
use github_user_search_lib::{Args, GitHubClient, SearchView};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    // Load .env before parsing so GITHUB_API_URL and RUST_LOG can come from it
    dotenv().ok();

    // Logs go to stderr, the rendered view to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    debug!("Using GitHub API at {}", args.api_url);

    let client = GitHubClient::new(&args.api_url)?;
    let mut view = SearchView::new(client).with_progress(!args.no_progress);
    let mut out = stdout();

    match &args.query {
        Some(query) => {
            run_once(&mut view, query, args.user.as_ref(), args.sort, &mut out).await?;
        }
        None => {
            view.change_sort(args.sort);
            run_interactive(&mut view, BufReader::new(stdin()), &mut out).await?;
        }
    }

    info!("Session finished");
    Ok(())
}
