use serde::{Deserialize, Serialize};

use super::{UpstreamBranch, UpstreamRepository};

/// A branch of a repository and the SHA of its last commit.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BranchInfo {
    /// The name of the branch.
    pub(crate) name: String,

    /// The SHA of the commit at the tip of the branch.
    pub(crate) last_commit_sha: String,
}

impl BranchInfo {
    /// Creates a new `BranchInfo` instance.
    pub fn new(name: &str, last_commit_sha: &str) -> Self {
        Self {
            name: name.to_string(),
            last_commit_sha: last_commit_sha.to_string(),
        }
    }

    /// Retrieves the branch name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Retrieves the SHA of the last commit.
    pub fn last_commit_sha(&self) -> &str {
        &self.last_commit_sha
    }
}

impl From<UpstreamBranch> for BranchInfo {
    fn from(branch: UpstreamBranch) -> Self {
        Self::new(branch.name(), branch.last_commit_sha())
    }
}

/// A non-fork repository of a user with its branches.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryResult {
    /// The name of the repository.
    pub(crate) repository_name: String,

    /// The login of the repository owner.
    pub(crate) owner_login: String,

    /// The branches of the repository, empty when they could not be listed.
    pub(crate) branches: Vec<BranchInfo>,
}

impl RepositoryResult {
    /// Creates a new `RepositoryResult` instance.
    pub fn new(repository_name: &str, owner_login: &str, branches: Vec<BranchInfo>) -> Self {
        Self {
            repository_name: repository_name.to_string(),
            owner_login: owner_login.to_string(),
            branches,
        }
    }

    /// Creates a new `RepositoryResult` from an upstream repository and its resolved branches.
    pub fn from_upstream(repository: &UpstreamRepository, branches: Vec<BranchInfo>) -> Self {
        Self::new(repository.name(), repository.owner_login(), branches)
    }

    /// Retrieves the repository name.
    pub fn repository_name(&self) -> &str {
        &self.repository_name
    }

    /// Retrieves the owner login.
    pub fn owner_login(&self) -> &str {
        &self.owner_login
    }

    /// Retrieves the branches.
    pub fn branches(&self) -> &[BranchInfo] {
        &self.branches
    }
}

/// The body returned by the endpoint when a request fails.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    /// The HTTP status code.
    pub status: u16,

    /// A human readable description of the failure.
    pub message: String,
}
