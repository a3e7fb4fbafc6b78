use std::sync::Arc;

use log::{debug, info, warn};

use crate::{
    AggregatorError, BranchInfo, RepositoryAggregator, RepositoryFetcher, RepositoryResult,
    UpstreamRepository,
};

/// Lists the repositories of a user and keeps the non-fork ones, in upstream order.
pub(crate) async fn list_non_fork_repositories(
    fetcher: &dyn RepositoryFetcher,
    username: &str,
) -> Result<Vec<UpstreamRepository>, AggregatorError> {
    let repositories = fetcher
        .list_repositories(username)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                AggregatorError::UserNotFound(username.to_string())
            } else {
                AggregatorError::Upstream(e)
            }
        })?;
    let total_repositories = repositories.len();
    let repositories = repositories
        .into_iter()
        .filter(|repository| !repository.is_fork())
        .collect::<Vec<_>>();
    info!(
        "Listed repositories for {username}: total={total_repositories}, non-fork={}",
        repositories.len()
    );

    Ok(repositories)
}

/// Lists the branches of a repository, recovering from any failure with an empty list.
pub(crate) async fn list_branches_or_empty(
    fetcher: &dyn RepositoryFetcher,
    repository: &UpstreamRepository,
) -> Vec<BranchInfo> {
    match fetcher
        .list_branches(repository.owner_login(), repository.name())
        .await
    {
        Ok(branches) => branches.into_iter().map(Into::into).collect(),
        Err(e) => {
            warn!(
                "Failed to list branches of {}/{}, using no branches: {e}",
                repository.owner_login(),
                repository.name()
            );
            vec![]
        }
    }
}

/// An aggregator that fetches the branches of each repository one after the other.
pub struct SequentialAggregator {
    fetcher: Arc<dyn RepositoryFetcher>,
}

impl SequentialAggregator {
    /// Creates a new `SequentialAggregator` instance with the given fetcher.
    pub fn new(fetcher: Arc<dyn RepositoryFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait::async_trait]
impl RepositoryAggregator for SequentialAggregator {
    async fn get_user_repositories(
        &self,
        username: &str,
    ) -> Result<Vec<RepositoryResult>, AggregatorError> {
        let repositories = list_non_fork_repositories(self.fetcher.as_ref(), username).await?;

        let mut results = Vec::with_capacity(repositories.len());
        for repository in &repositories {
            let branches = list_branches_or_empty(self.fetcher.as_ref(), repository).await;
            debug!("Fetched {repository} with {} branches", branches.len());
            results.push(RepositoryResult::from_upstream(repository, branches));
        }

        Ok(results)
    }
}
