use indicatif::{ProgressBar, ProgressStyle};
use tokio::time::Duration;
use tracing::{error, info, warn};

use crate::client::QueryClient;
use crate::error::ErrorChain;
use crate::models::User;
use crate::presenter;
use crate::state::{SearchState, SortKey, UserSelector};

/// Result of one view action, after errors have been absorbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The response was applied to the state.
    Applied,
    /// The request failed; the state is unchanged.
    Failed,
    /// Nothing to request, e.g. an empty search result or an unknown user.
    Skipped,
}

/// The search view: owns the client and the state, and turns operator
/// actions into requests.
///
/// Request failures never escape an action. They are logged with their full
/// cause chain and the state from before the action is kept.
///
/// Every action takes `&mut self` and holds it until its response is applied,
/// so actions run one after another and a response always belongs to the
/// newest request.
pub struct SearchView<C> {
    client: C,
    state: SearchState,
    show_progress: bool,
}

impl<C: QueryClient> SearchView<C> {
    pub fn new(client: C) -> Self {
        SearchView {
            client,
            state: SearchState::new(),
            show_progress: false,
        }
    }

    /// Show a spinner while a request is in flight.
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.state.set_query_text(text);
    }

    /// Search users for the current query, then select the first one.
    pub async fn submit_search(&mut self) -> Outcome {
        let outcome = self.search().await;
        if outcome == Outcome::Applied {
            match self.state.users().first().cloned() {
                Some(first) => {
                    self.load_repositories(first).await;
                }
                None => info!("No users found for '{}'", self.state.query_text()),
            }
        }
        outcome
    }

    /// Search users for the current query without selecting anyone.
    pub async fn search(&mut self) -> Outcome {
        let query = self.state.query_text().to_string();
        self.state.begin_search();
        let pb = self.spinner(format!("Searching users for '{}'", query));

        let result = self.client.search_users(&query).await;
        pb.finish_and_clear();

        match result {
            Ok(users) => {
                let count = users.len();
                self.state.apply_users(users);
                info!("Found {} users for '{}'", count, query);
                Outcome::Applied
            }
            Err(e) => {
                error!("Search for '{}' failed: {}", query, ErrorChain(&e));
                self.state.abandon();
                Outcome::Failed
            }
        }
    }

    /// Select a user from the last search result and load its repositories.
    pub async fn select(&mut self, selector: &UserSelector) -> Outcome {
        match selector.resolve(self.state.users()).cloned() {
            Some(user) => self.load_repositories(user).await,
            None => {
                warn!("No user '{}' in the current result", selector);
                Outcome::Skipped
            }
        }
    }

    /// Change the sort key. Only the rendering changes.
    pub fn change_sort(&mut self, key: SortKey) {
        self.state.set_sort_key(key);
    }

    pub fn render(&self) -> String {
        presenter::render(&self.state)
    }

    async fn load_repositories(&mut self, user: User) -> Outcome {
        self.state.begin_selection();
        let pb = self.spinner(format!("Loading repositories of '{}'", user.login));

        let result = self.client.list_repositories(&user.repos_url).await;
        pb.finish_and_clear();

        match result {
            Ok(repositories) => {
                let count = repositories.len();
                info!("Loaded {} repositories of '{}'", count, user.login);
                self.state.apply_repositories(user, repositories);
                Outcome::Applied
            }
            Err(e) => {
                error!(
                    "Loading repositories of '{}' failed: {}",
                    user.login,
                    ErrorChain(&e)
                );
                self.state.abandon();
                Outcome::Failed
            }
        }
    }

    fn spinner(&self, message: String) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
        pb.set_style(style);
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }
}
