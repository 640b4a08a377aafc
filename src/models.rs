use serde::Deserialize;

/// A user entry from the search endpoint (`/search/users`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub login: String,
    pub repos_url: String,
}

/// Envelope of the search endpoint. Only `items` is read.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub items: Vec<User>,
}

/// A repository from a user's `repos_url` listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "stargazers_count", default)]
    pub stars: u64,
    #[serde(rename = "forks_count", default)]
    pub forks: u64,
}
