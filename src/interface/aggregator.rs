use crate::{AggregatorError, RepositoryResult};

/// A trait for aggregating the repositories of a user with their branches.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RepositoryAggregator: Sync + Send {
    /// Retrieves the non-fork repositories of a user along with their branches.
    async fn get_user_repositories(
        &self,
        username: &str,
    ) -> Result<Vec<RepositoryResult>, AggregatorError>;
}
