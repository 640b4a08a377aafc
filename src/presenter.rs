use std::fmt;

use crate::models::Repository;
use crate::state::{SearchState, SortKey};

/// Display order of `repositories` under `key`.
///
/// Sorting is descending and stable, so repositories with equal counts keep
/// their API order. The input slice is never reordered.
pub fn sorted(repositories: &[Repository], key: SortKey) -> Vec<&Repository> {
    let mut view: Vec<&Repository> = repositories.iter().collect();
    match key {
        SortKey::None => {}
        SortKey::Stars => view.sort_by(|a, b| b.stars.cmp(&a.stars)),
        SortKey::Forks => view.sort_by(|a, b| b.forks.cmp(&a.forks)),
    }
    view
}

/// Text rendering of the search view: user list, sort key, repository cards.
pub struct SearchPage<'a> {
    state: &'a SearchState,
}

impl<'a> SearchPage<'a> {
    pub fn new(state: &'a SearchState) -> Self {
        SearchPage { state }
    }
}

impl fmt::Display for SearchPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state;
        if state.users().is_empty() {
            return writeln!(f, "No users to show. Search by login to begin.");
        }

        let selected = state.selected_user().map(|u| u.login.as_str());
        writeln!(f, "Users")?;
        for (i, user) in state.users().iter().enumerate() {
            let marker = if Some(user.login.as_str()) == selected { '>' } else { ' ' };
            writeln!(f, "{} #{:<3} {}", marker, i + 1, user.login)?;
        }

        writeln!(f)?;
        writeln!(f, "Repositories (sort by: {})", state.sort_key())?;
        let repositories = sorted(state.repositories(), state.sort_key());
        if repositories.is_empty() {
            return writeln!(f, "  (none)");
        }
        for repo in repositories {
            write_card(f, repo)?;
        }
        Ok(())
    }
}

fn write_card(f: &mut fmt::Formatter<'_>, repo: &Repository) -> fmt::Result {
    writeln!(f, "  {}", repo.name)?;
    if let Some(description) = repo.description.as_deref().filter(|d| !d.trim().is_empty()) {
        writeln!(f, "    {}", description)?;
    }
    writeln!(f, "    Stars {}  Forks {}", repo.stars, repo.forks)
}

/// Render the whole view as a string.
pub fn render(state: &SearchState) -> String {
    SearchPage::new(state).to_string()
}
