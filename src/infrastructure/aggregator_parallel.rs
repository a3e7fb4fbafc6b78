use std::sync::Arc;

use log::{debug, warn};

use crate::{AggregatorError, RepositoryAggregator, RepositoryFetcher, RepositoryResult};

use super::aggregator_sequential::{list_branches_or_empty, list_non_fork_repositories};

/// An aggregator that fetches the branches of all repositories concurrently.
///
/// The results keep the order of the upstream repository listing.
pub struct ParallelAggregator {
    fetcher: Arc<dyn RepositoryFetcher>,
}

impl ParallelAggregator {
    /// Creates a new `ParallelAggregator` instance with the given fetcher.
    pub fn new(fetcher: Arc<dyn RepositoryFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait::async_trait]
impl RepositoryAggregator for ParallelAggregator {
    async fn get_user_repositories(
        &self,
        username: &str,
    ) -> Result<Vec<RepositoryResult>, AggregatorError> {
        let repositories = list_non_fork_repositories(self.fetcher.as_ref(), username).await?;

        let mut handles = Vec::with_capacity(repositories.len());
        for repository in &repositories {
            let fetcher_clone = Arc::clone(&self.fetcher);
            let repository_clone = repository.clone();
            let handle = tokio::spawn(async move {
                list_branches_or_empty(fetcher_clone.as_ref(), &repository_clone).await
            });
            handles.push(handle);
        }
        debug!("Started {} branch fetches for {username}", handles.len());

        let mut results = Vec::with_capacity(repositories.len());
        for (repository, handle) in repositories.iter().zip(handles) {
            let branches = handle.await.unwrap_or_else(|e| {
                warn!("Branch fetch task for {repository} failed, using no branches: {e}");
                vec![]
            });
            results.push(RepositoryResult::from_upstream(repository, branches));
        }

        Ok(results)
    }
}
