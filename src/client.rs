use futures::future::{BoxFuture, FutureExt};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::error::Error;
use tracing::debug;

use crate::error::QueryError;
use crate::models::{Repository, SearchResponse, User};

/// Default root of the GitHub REST API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// The two read-only requests the search view needs.
///
/// [`GitHubClient`] is the real implementation; tests substitute in-memory
/// fakes.
pub trait QueryClient: Send + Sync {
    /// Search users whose login matches `query`.
    fn search_users<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<User>, QueryError>>;

    /// List the repositories behind a `repos_url` taken from a search result.
    fn list_repositories<'a>(
        &'a self,
        repos_url: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Repository>, QueryError>>;
}

/// GitHub REST client backed by `reqwest`.
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    api_base: String,
}

impl GitHubClient {
    /// Create a client rooted at `api_base` (for example [`DEFAULT_API_URL`]).
    pub fn new(api_base: &str) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let api_base = api_base.trim_end_matches('/').to_string();
        // malformed bases fail here, not on the first request
        Url::parse(&api_base)?;

        let client = Client::builder()
            .user_agent(concat!("github-user-search/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(GitHubClient { client, api_base })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn search_request(&self, query: &str) -> RequestBuilder {
        self.client
            .get(format!("{}/search/users", self.api_base))
            .query(&[("q", query)])
    }

    /// Build the search URL with `query` percent-encoded as the `q` parameter.
    pub fn search_url(&self, query: &str) -> Result<Url, QueryError> {
        Ok(self.search_request(query).build()?.url().clone())
    }

    async fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, QueryError> {
        let request = request
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .build()?;
        let url = request.url().to_string();

        debug!("Requesting URL: {}", url);
        let response = self.client.execute(request).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::Status { status, url });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| QueryError::Parse { url, source })
    }
}

impl QueryClient for GitHubClient {
    fn search_users<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<User>, QueryError>> {
        async move {
            let response: SearchResponse = self.get_json(self.search_request(query)).await?;
            debug!("Search for '{}' returned {} users", query, response.items.len());
            Ok(response.items)
        }
        .boxed()
    }

    fn list_repositories<'a>(
        &'a self,
        repos_url: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Repository>, QueryError>> {
        // an unparsable URL surfaces as a reqwest builder error
        self.get_json(self.client.get(repos_url)).boxed()
    }
}
