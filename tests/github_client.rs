//! Runs the real client against an in-process mock of the GitHub API.

use axum::extract::{RawQuery, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::error::Error;
use std::io;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tracing_subscriber::fmt::MakeWriter;

use github_user_search_lib::{
    presenter, ErrorChain, GitHubClient, Outcome, QueryClient, QueryError, SearchView, SortKey,
    UserSelector,
};
use reqwest::StatusCode;

#[derive(Clone)]
struct MockGitHub {
    base_url: String,
    queries: Arc<Mutex<Vec<String>>>,
    user_agents: Arc<Mutex<Vec<String>>>,
}

async fn search_users(
    State(mock): State<MockGitHub>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> impl IntoResponse {
    let query = query.unwrap_or_default();
    mock.queries.lock().unwrap().push(query.clone());
    if let Some(agent) = headers.get("user-agent").and_then(|v| v.to_str().ok()) {
        mock.user_agents.lock().unwrap().push(agent.to_string());
    }

    if query == "q=down" {
        return (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"message": "unavailable"})));
    }
    if query == "q=nobody" {
        return (StatusCode::OK, Json(json!({"total_count": 0, "items": []})));
    }
    if query == "q=garbled" {
        return (StatusCode::OK, Json(json!({"total_count": 1, "items": "oops"})));
    }

    let items: Vec<_> = ["octocat", "broken", "offline"]
        .iter()
        .map(|login| {
            json!({
                "login": login,
                "id": 1,
                "repos_url": format!("{}/users/{}/repos", mock.base_url, login),
                "type": "User",
                "score": 1.0
            })
        })
        .collect();
    (StatusCode::OK, Json(json!({"total_count": items.len(), "items": items})))
}

async fn octocat_repos() -> impl IntoResponse {
    Json(json!([
        {"id": 1, "name": "A", "description": "first", "stargazers_count": 5, "forks_count": 2},
        {"id": 2, "name": "B", "description": null, "stargazers_count": 10, "forks_count": 2},
        {"id": 3, "name": "C", "stargazers_count": 1, "forks_count": 9}
    ]))
}

async fn broken_repos() -> impl IntoResponse {
    Json(json!({"message": "Not Found"}))
}

async fn offline_repos() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

async fn start_mock() -> MockGitHub {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let mock = MockGitHub {
        base_url: format!("http://{}", listener.local_addr().unwrap()),
        queries: Arc::new(Mutex::new(Vec::new())),
        user_agents: Arc::new(Mutex::new(Vec::new())),
    };

    let app = Router::new()
        .route("/search/users", get(search_users))
        .route("/users/octocat/repos", get(octocat_repos))
        .route("/users/broken/repos", get(broken_repos))
        .route("/users/offline/repos", get(offline_repos))
        .with_state(mock.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    mock
}

#[tokio::test]
async fn search_sends_encoded_query_and_user_agent() {
    let mock = start_mock().await;
    let client = GitHubClient::new(&mock.base_url).unwrap();

    let users = client.search_users("octo cat&type=org").await.unwrap();

    assert_eq!(users.len(), 3);
    assert_eq!(users[0].login, "octocat");
    assert_eq!(users[0].repos_url, format!("{}/users/octocat/repos", mock.base_url));
    assert_eq!(
        mock.queries.lock().unwrap().as_slice(),
        ["q=octo+cat%26type%3Dorg".to_string()]
    );
    assert!(mock.user_agents.lock().unwrap()[0].starts_with("github-user-search/"));
}

#[tokio::test]
async fn repositories_map_counts_and_missing_description() {
    let mock = start_mock().await;
    let client = GitHubClient::new(&mock.base_url).unwrap();

    let repos = client
        .list_repositories(&format!("{}/users/octocat/repos", mock.base_url))
        .await
        .unwrap();

    assert_eq!(repos.len(), 3);
    assert_eq!(repos[0].description.as_deref(), Some("first"));
    assert_eq!(repos[1].description, None);
    assert_eq!(repos[1].stars, 10);
    assert_eq!(repos[2].forks, 9);
}

#[tokio::test]
async fn error_status_keeps_status_and_url() {
    let mock = start_mock().await;
    let client = GitHubClient::new(&mock.base_url).unwrap();

    let err = client.search_users("down").await.unwrap_err();
    assert!(matches!(
        err,
        QueryError::Status { status, ref url }
            if status == StatusCode::SERVICE_UNAVAILABLE && url.ends_with("/search/users?q=down")
    ));
    assert!(err.to_string().contains("503"));

    let err = client
        .list_repositories(&format!("{}/users/offline/repos", mock.base_url))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        QueryError::Status { status, .. } if status == StatusCode::INTERNAL_SERVER_ERROR
    ));
}

#[tokio::test]
async fn wrong_shape_is_a_parse_error() {
    let mock = start_mock().await;
    let client = GitHubClient::new(&mock.base_url).unwrap();

    let err = client.search_users("garbled").await.unwrap_err();
    assert!(matches!(err, QueryError::Parse { .. }));

    let err = client
        .list_repositories(&format!("{}/users/broken/repos", mock.base_url))
        .await
        .unwrap_err();
    assert!(matches!(err, QueryError::Parse { .. }));
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = GitHubClient::new(&base).unwrap();
    let err = client.search_users("octocat").await.unwrap_err();
    assert!(matches!(err, QueryError::Network(_)));

    // the refused connection only shows up further down the chain
    assert!(err.source().is_some());
    assert!(!err.to_string().to_lowercase().contains("connect"));
    assert!(ErrorChain(&err).to_string().to_lowercase().contains("connect"));
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn failed_search_logs_the_underlying_cause() {
    let logs = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let mut view = SearchView::new(GitHubClient::new(&base).unwrap());
    view.set_query("octocat");
    assert_eq!(view.submit_search().await, Outcome::Failed);

    let text = logs.contents();
    let line = text
        .lines()
        .find(|l| l.contains("Search for 'octocat' failed"))
        .expect("failure was not logged");
    assert!(line.contains("error sending request"));
    assert!(line.to_lowercase().contains("connect"));
}

#[tokio::test]
async fn view_against_mock_api() {
    let mock = start_mock().await;
    let mut view = SearchView::new(GitHubClient::new(&mock.base_url).unwrap());

    view.set_query("octo");
    assert_eq!(view.submit_search().await, Outcome::Applied);
    assert_eq!(view.state().selected_user().unwrap().login, "octocat");

    view.change_sort(SortKey::Stars);
    let stars: Vec<u64> = presenter::sorted(view.state().repositories(), view.state().sort_key())
        .iter()
        .map(|r| r.stars)
        .collect();
    assert_eq!(stars, vec![10, 5, 1]);

    view.change_sort(SortKey::Forks);
    let order: Vec<&str> = presenter::sorted(view.state().repositories(), view.state().sort_key())
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(order, vec!["C", "A", "B"]);

    // failed listings keep what is on screen
    let outcome = view.select(&UserSelector::Login("broken".to_string())).await;
    assert_eq!(outcome, Outcome::Failed);
    let outcome = view.select(&UserSelector::Position(3)).await;
    assert_eq!(outcome, Outcome::Failed);
    assert_eq!(view.state().selected_user().unwrap().login, "octocat");
    assert_eq!(view.state().repositories().len(), 3);

    // a failed search keeps users and repositories
    view.set_query("down");
    assert_eq!(view.submit_search().await, Outcome::Failed);
    assert_eq!(view.state().users().len(), 3);
    assert_eq!(view.state().repositories().len(), 3);

    view.set_query("nobody");
    assert_eq!(view.submit_search().await, Outcome::Applied);
    assert!(view.state().users().is_empty());
    assert!(view.render().starts_with("No users to show"));
}
