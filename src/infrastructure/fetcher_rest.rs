use anyhow::{Context, anyhow};
use log::debug;
use reqwest::{
    Client, StatusCode, Url,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue},
};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{FetcherError, RepositoryFetcher, StdResult, UpstreamBranch, UpstreamRepository};

/// The REST production endpoint for GitHub.
pub const GITHUB_REST_ENDPOINT: &str = "https://api.github.com";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Deserialize, Debug)]
struct RepositoryItem {
    name: String,
    owner: Owner,
    fork: bool,
}

#[derive(Deserialize, Debug)]
struct Owner {
    login: String,
}

#[derive(Deserialize, Debug)]
struct BranchItem {
    name: String,
    commit: Commit,
}

#[derive(Deserialize, Debug)]
struct Commit {
    sha: String,
}

impl From<RepositoryItem> for UpstreamRepository {
    fn from(item: RepositoryItem) -> Self {
        Self::new(&item.name, &item.owner.login, item.fork)
    }
}

impl From<BranchItem> for UpstreamBranch {
    fn from(item: BranchItem) -> Self {
        Self::new(&item.name, &item.commit.sha)
    }
}

impl From<reqwest::Error> for FetcherError {
    fn from(error: reqwest::Error) -> Self {
        FetcherError::Transport(error.to_string())
    }
}

/// Fetches repository data from the GitHub REST API.
#[derive(Debug)]
pub struct RestFetcher {
    client: Client,
    base_url: Url,
}

impl RestFetcher {
    /// Creates a new `RestFetcher` targeting the given endpoint, with an optional API token.
    pub fn try_new(endpoint: &str, api_token: Option<&str>) -> StdResult<Self> {
        let base_url =
            Url::parse(endpoint).with_context(|| format!("Invalid API endpoint: {endpoint}"))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("API endpoint can not be a base URL: {endpoint}"));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Some(api_token) = api_token {
            let mut bearer_token = HeaderValue::from_str(&format!("Bearer {api_token}"))
                .with_context(|| "Invalid API token")?;
            bearer_token.set_sensitive(true);
            headers.insert(AUTHORIZATION, bearer_token);
        }
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self { client, base_url })
    }

    fn endpoint_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        url
    }

    async fn get<T: DeserializeOwned>(&self, url: Url, resource: &str) -> Result<T, FetcherError> {
        debug!("GET {url}");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetcherError::NotFound(resource.to_string()));
        }
        if !status.is_success() {
            return Err(FetcherError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(|e| FetcherError::Decode(e.to_string()))
    }
}

#[async_trait::async_trait]
impl RepositoryFetcher for RestFetcher {
    async fn list_repositories(
        &self,
        username: &str,
    ) -> Result<Vec<UpstreamRepository>, FetcherError> {
        let url = self.endpoint_url(&["users", username, "repos"]);
        let items: Vec<RepositoryItem> = self.get(url, username).await?;

        Ok(items.into_iter().map(Into::into).collect())
    }

    async fn list_branches(
        &self,
        owner_login: &str,
        repository_name: &str,
    ) -> Result<Vec<UpstreamBranch>, FetcherError> {
        let url = self.endpoint_url(&["repos", owner_login, repository_name, "branches"]);
        let items: Vec<BranchItem> = self
            .get(url, &format!("{owner_login}/{repository_name}"))
            .await?;

        Ok(items.into_iter().map(Into::into).collect())
    }
}
