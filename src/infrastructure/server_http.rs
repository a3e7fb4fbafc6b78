use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use log::{error, info, warn};
use thiserror::Error;

use crate::{AggregatorError, ErrorBody, RepositoryAggregator, RepositoryResult};

/// Server error
#[derive(Error, Debug)]
pub enum ServerError {
    /// The aggregation failed
    #[error(transparent)]
    Aggregator(#[from] AggregatorError),
}

impl ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Aggregator(AggregatorError::UserNotFound(_)) => StatusCode::NOT_FOUND,
            ServerError::Aggregator(AggregatorError::Upstream(_)) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Converts the error to the body returned to the client.
    pub fn to_error_body(&self) -> ErrorBody {
        ErrorBody {
            status: self.status_code().as_u16(),
            message: self.to_string(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed with {status}: {self}");
        } else {
            warn!("Request failed with {status}: {self}");
        }

        (status, Json(self.to_error_body())).into_response()
    }
}

/// The state shared by the request handlers.
#[derive(Clone)]
struct AppState {
    aggregator: Arc<dyn RepositoryAggregator>,
}

/// Builds the HTTP application routes on top of the given aggregator.
pub fn build_router(aggregator: Arc<dyn RepositoryAggregator>) -> Router {
    Router::new()
        .route("/api/users/{username}/repos", get(get_user_repositories))
        .route("/health", get(|| async { "OK" }))
        .with_state(AppState { aggregator })
}

async fn get_user_repositories(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Vec<RepositoryResult>>, ServerError> {
    info!("Listing repositories of user {username}");
    let repositories = state.aggregator.get_user_repositories(&username).await?;

    Ok(Json(repositories))
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header::CONTENT_TYPE};
    use mockall::predicate::eq;
    use tower::ServiceExt;

    use crate::{BranchInfo, FetcherError, MockRepositoryAggregator};

    use super::*;

    async fn send_get(router: Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .map(|value| value.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, content_type, body.to_vec())
    }

    #[tokio::test]
    async fn returns_repositories_as_json() {
        let aggregator = {
            let mut aggregator = MockRepositoryAggregator::new();
            aggregator
                .expect_get_user_repositories()
                .with(eq("octocat"))
                .returning(|_| {
                    Ok(vec![RepositoryResult::new(
                        "Hello-World",
                        "octocat",
                        vec![BranchInfo::new(
                            "master",
                            "7fd1a60b01f91b314f59955a4e4d4e80d8edf11d",
                        )],
                    )])
                })
                .times(1);

            aggregator
        };
        let router = build_router(Arc::new(aggregator));

        let (status, content_type, body) = send_get(router, "/api/users/octocat/repos").await;

        assert_eq!(StatusCode::OK, status);
        assert_eq!(Some("application/json".to_string()), content_type);
        assert_eq!(
            serde_json::json!([
                {
                    "repositoryName": "Hello-World",
                    "ownerLogin": "octocat",
                    "branches": [
                        {
                            "name": "master",
                            "lastCommitSha": "7fd1a60b01f91b314f59955a4e4d4e80d8edf11d"
                        }
                    ]
                }
            ]),
            serde_json::from_slice::<serde_json::Value>(&body).unwrap()
        );
    }

    #[tokio::test]
    async fn returns_empty_array_when_no_repositories() {
        let aggregator = {
            let mut aggregator = MockRepositoryAggregator::new();
            aggregator
                .expect_get_user_repositories()
                .returning(|_| Ok(vec![]))
                .times(1);

            aggregator
        };
        let router = build_router(Arc::new(aggregator));

        let (status, _, body) = send_get(router, "/api/users/octocat/repos").await;

        assert_eq!(StatusCode::OK, status);
        assert_eq!(b"[]".to_vec(), body);
    }

    #[tokio::test]
    async fn returns_not_found_when_user_not_found() {
        let aggregator = {
            let mut aggregator = MockRepositoryAggregator::new();
            aggregator
                .expect_get_user_repositories()
                .with(eq("ghost-user-404"))
                .returning(|username| Err(AggregatorError::UserNotFound(username.to_string())))
                .times(1);

            aggregator
        };
        let router = build_router(Arc::new(aggregator));

        let (status, content_type, body) =
            send_get(router, "/api/users/ghost-user-404/repos").await;
        let error_body: ErrorBody = serde_json::from_slice(&body).unwrap();

        assert_eq!(StatusCode::NOT_FOUND, status);
        assert_eq!(Some("application/json".to_string()), content_type);
        assert_eq!(404, error_body.status);
        assert!(error_body.message.contains("ghost-user-404"));
    }

    #[tokio::test]
    async fn returns_bad_gateway_when_upstream_fails() {
        let aggregator = {
            let mut aggregator = MockRepositoryAggregator::new();
            aggregator
                .expect_get_user_repositories()
                .returning(|_| {
                    Err(AggregatorError::Upstream(FetcherError::Status {
                        status: 503,
                        url: "https://api.github.com/users/octocat/repos".to_string(),
                    }))
                })
                .times(1);

            aggregator
        };
        let router = build_router(Arc::new(aggregator));

        let (status, _, body) = send_get(router, "/api/users/octocat/repos").await;
        let error_body: ErrorBody = serde_json::from_slice(&body).unwrap();

        assert_eq!(StatusCode::BAD_GATEWAY, status);
        assert_eq!(502, error_body.status);
    }

    #[tokio::test]
    async fn health_check_is_ok() {
        let router = build_router(Arc::new(MockRepositoryAggregator::new()));

        let (status, _, body) = send_get(router, "/health").await;

        assert_eq!(StatusCode::OK, status);
        assert_eq!(b"OK".to_vec(), body);
    }

    mod end_to_end {
        use httpmock::MockServer;
        use serde_json::json;

        use crate::{RestFetcher, SequentialAggregator};

        use super::*;

        const SHA: &str = "7fd1a60b01f91b314f59955a4e4d4e80d8edf11d";

        fn build_router_for(server: &MockServer) -> Router {
            let fetcher = Arc::new(RestFetcher::try_new(&server.base_url(), None).unwrap());

            build_router(Arc::new(SequentialAggregator::new(fetcher)))
        }

        #[tokio::test]
        async fn lists_non_fork_repositories_with_branches() {
            let server = MockServer::start();
            let repositories_mock = server.mock(|when, then| {
                when.method("GET").path("/users/octocat/repos");
                then.status(200).json_body(json!([
                    {"name": "Hello-World", "owner": {"login": "octocat"}, "fork": false},
                    {"name": "forked-repo", "owner": {"login": "octocat"}, "fork": true}
                ]));
            });
            let branches_mock = server.mock(|when, then| {
                when.method("GET").path("/repos/octocat/Hello-World/branches");
                then.status(200)
                    .json_body(json!([{"name": "master", "commit": {"sha": SHA}}]));
            });
            let forked_branches_mock = server.mock(|when, then| {
                when.method("GET").path("/repos/octocat/forked-repo/branches");
                then.status(200).json_body(json!([]));
            });

            let (status, _, body) =
                send_get(build_router_for(&server), "/api/users/octocat/repos").await;

            repositories_mock.assert();
            branches_mock.assert();
            forked_branches_mock.assert_hits(0);
            assert_eq!(StatusCode::OK, status);
            assert_eq!(
                vec![RepositoryResult::new(
                    "Hello-World",
                    "octocat",
                    vec![BranchInfo::new("master", SHA)]
                )],
                serde_json::from_slice::<Vec<RepositoryResult>>(&body).unwrap()
            );
        }

        #[tokio::test]
        async fn returns_not_found_for_unknown_user() {
            let server = MockServer::start();
            let repositories_mock = server.mock(|when, then| {
                when.method("GET").path("/users/ghost-user-404/repos");
                then.status(404).json_body(json!({"message": "Not Found"}));
            });

            let (status, _, body) =
                send_get(build_router_for(&server), "/api/users/ghost-user-404/repos").await;
            let error_body: ErrorBody = serde_json::from_slice(&body).unwrap();

            repositories_mock.assert();
            assert_eq!(StatusCode::NOT_FOUND, status);
            assert_eq!(404, error_body.status);
            assert!(error_body.message.contains("ghost-user-404"));
        }

        #[tokio::test]
        async fn returns_empty_branches_when_branch_listing_fails() {
            let server = MockServer::start();
            let repositories_mock = server.mock(|when, then| {
                when.method("GET").path("/users/octocat/repos");
                then.status(200).json_body(json!([
                    {"name": "Hello-World", "owner": {"login": "octocat"}, "fork": false}
                ]));
            });
            let branches_mock = server.mock(|when, then| {
                when.method("GET").path("/repos/octocat/Hello-World/branches");
                then.status(500);
            });

            let (status, _, body) =
                send_get(build_router_for(&server), "/api/users/octocat/repos").await;

            repositories_mock.assert();
            branches_mock.assert();
            assert_eq!(StatusCode::OK, status);
            assert_eq!(
                json!([{"repositoryName": "Hello-World", "ownerLogin": "octocat", "branches": []}]),
                serde_json::from_slice::<serde_json::Value>(&body).unwrap()
            );
        }

        #[tokio::test]
        async fn returns_bad_gateway_when_repository_listing_fails() {
            let server = MockServer::start();
            let repositories_mock = server.mock(|when, then| {
                when.method("GET").path("/users/octocat/repos");
                then.status(500);
            });

            let (status, _, _) =
                send_get(build_router_for(&server), "/api/users/octocat/repos").await;

            repositories_mock.assert();
            assert_eq!(StatusCode::BAD_GATEWAY, status);
        }
    }
}
