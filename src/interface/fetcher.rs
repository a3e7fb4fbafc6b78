use crate::{FetcherError, UpstreamBranch, UpstreamRepository};

/// A trait for fetching repository data from the upstream API.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RepositoryFetcher: Sync + Send {
    /// Lists the repositories of a user.
    async fn list_repositories(
        &self,
        username: &str,
    ) -> Result<Vec<UpstreamRepository>, FetcherError>;

    /// Lists the branches of a repository.
    async fn list_branches(
        &self,
        owner_login: &str,
        repository_name: &str,
    ) -> Result<Vec<UpstreamBranch>, FetcherError>;
}
