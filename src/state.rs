use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;

use crate::error::CommandError;
use crate::models::{Repository, User};

/// Field used to order the displayed repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortKey {
    #[default]
    None,
    Stars,
    Forks,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::None => "none",
            SortKey::Stars => "stars",
            SortKey::Forks => "forks",
        };
        f.write_str(name)
    }
}

impl FromStr for SortKey {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(SortKey::None),
            "stars" => Ok(SortKey::Stars),
            "forks" => Ok(SortKey::Forks),
            other => Err(CommandError::UnknownSortKey(other.to_string())),
        }
    }
}

/// How the operator names a user from the last search result.
///
/// `#3` picks the third entry (1-based); anything else is matched against
/// logins, case-insensitively as GitHub logins are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserSelector {
    Position(usize),
    Login(String),
}

impl UserSelector {
    pub fn resolve<'a>(&self, users: &'a [User]) -> Option<&'a User> {
        match self {
            UserSelector::Position(n) => n.checked_sub(1).and_then(|i| users.get(i)),
            UserSelector::Login(login) => users.iter().find(|u| u.login.eq_ignore_ascii_case(login)),
        }
    }
}

impl fmt::Display for UserSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserSelector::Position(n) => write!(f, "#{}", n),
            UserSelector::Login(login) => f.write_str(login),
        }
    }
}

impl FromStr for UserSelector {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CommandError::MissingArgument("user"));
        }
        match s.strip_prefix('#') {
            Some(n) => n
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .map(UserSelector::Position)
                .ok_or_else(|| CommandError::InvalidPosition(s.to_string())),
            None => Ok(UserSelector::Login(s.to_string())),
        }
    }
}

/// What the view is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Searching,
    Selecting,
}

/// Everything the search view shows, owned by a single view.
#[derive(Debug, Default)]
pub struct SearchState {
    query_text: String,
    users: Vec<User>,
    repositories: Vec<Repository>,
    selected: Option<User>,
    sort_key: SortKey,
    phase: Phase,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn set_query_text(&mut self, text: impl Into<String>) {
        self.query_text = text.into();
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Repositories of [`selected_user`](Self::selected_user), in API order.
    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    /// The user whose repositories are currently held.
    pub fn selected_user(&self) -> Option<&User> {
        self.selected.as_ref()
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn begin_search(&mut self) {
        self.phase = Phase::Searching;
    }

    /// Replace `users` with a search result.
    pub fn apply_users(&mut self, users: Vec<User>) {
        self.users = users;
        self.phase = Phase::Idle;
    }

    pub fn begin_selection(&mut self) {
        self.phase = Phase::Selecting;
    }

    /// Replace `repositories` with the listing of `user`, which becomes the
    /// selected user.
    pub fn apply_repositories(&mut self, user: User, repositories: Vec<Repository>) {
        self.selected = Some(user);
        self.repositories = repositories;
        self.phase = Phase::Idle;
    }

    /// Drop a failed request. Data fields are never touched.
    pub fn abandon(&mut self) {
        self.phase = Phase::Idle;
    }
}
