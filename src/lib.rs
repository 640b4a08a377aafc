//! # GitHub User Search
//!
//! A Rust library for searching GitHub users by login and browsing the
//! repositories of a selected user, sorted by stars or forks.
//!
//! ## Main Components
//!
//! - [`GitHubClient`]: the two read-only requests against the GitHub REST API
//! - [`SearchState`]: query text, users, repositories and sort key of one view
//! - [`presenter`]: the sort projection and the text rendering
//! - [`SearchView`]: turns operator actions into requests and absorbs their failures
//! - [`Args`]: command line arguments of the binary
//!
//! ## Example
//!
//! ```no_run
//! use github_user_search_lib::{GitHubClient, SearchView, SortKey, DEFAULT_API_URL};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let client = GitHubClient::new(DEFAULT_API_URL)?;
//!     let mut view = SearchView::new(client);
//!
//!     view.set_query("octocat");
//!     view.submit_search().await;
//!     view.change_sort(SortKey::Stars);
//!
//!     print!("{}", view.render());
//!     Ok(())
//! }
//! ```

mod args;
mod client;
mod error;
mod models;
pub mod presenter;
pub mod repl;
mod state;
mod view;

pub use crate::args::Args;
pub use crate::client::{GitHubClient, QueryClient, DEFAULT_API_URL};
pub use crate::error::{CommandError, ErrorChain, QueryError};
pub use crate::models::{Repository, SearchResponse, User};
pub use crate::state::{Phase, SearchState, SortKey, UserSelector};
pub use crate::view::{Outcome, SearchView};
