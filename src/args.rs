use clap::Parser;

use crate::client::DEFAULT_API_URL;
use crate::state::{SortKey, UserSelector};

/// Search GitHub users by login and browse their repositories.
///
/// With `--query` the view is printed once; without it an interactive
/// session starts.
#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about,
    long_about = "Search GitHub users by login, pick one of the matches and list its repositories sorted by stars or forks. Runs once with --query, interactively otherwise."
)]
pub struct Args {
    /// Login fragment to search for. Starts an interactive session when omitted.
    #[clap(short, long)]
    pub query: Option<String>,

    /// User to show instead of the first match: a login or a position like `#2`.
    #[clap(short, long, requires = "query")]
    pub user: Option<UserSelector>,

    /// Order of the listed repositories.
    #[clap(short, long, value_enum, default_value_t = SortKey::None)]
    pub sort: SortKey,

    /// Root of the GitHub REST API.
    #[clap(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Do not show spinners while requests are in flight.
    #[clap(long)]
    pub no_progress: bool,
}
