use std::{fmt::Display, ops::Deref};

/// The name of a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(pub String);

impl Deref for RepositoryName {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for RepositoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The login of a repository owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerLogin(pub String);

impl Deref for OwnerLogin {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for OwnerLogin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A repository as listed by the upstream API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRepository {
    /// The name of the repository.
    name: RepositoryName,

    /// The login of the repository owner.
    owner_login: OwnerLogin,

    /// Whether the repository is a fork of another repository.
    is_fork: bool,
}

impl UpstreamRepository {
    /// Creates a new `UpstreamRepository` instance.
    pub fn new(name: &str, owner_login: &str, is_fork: bool) -> Self {
        Self {
            name: RepositoryName(name.to_string()),
            owner_login: OwnerLogin(owner_login.to_string()),
            is_fork,
        }
    }

    /// Retrieves the repository name.
    pub fn name(&self) -> &RepositoryName {
        &self.name
    }

    /// Retrieves the owner login.
    pub fn owner_login(&self) -> &OwnerLogin {
        &self.owner_login
    }

    /// Whether the repository is a fork.
    pub fn is_fork(&self) -> bool {
        self.is_fork
    }
}

impl Display for UpstreamRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Repository: {}, Owner: {}, Fork: {}",
            self.name, self.owner_login, self.is_fork
        )
    }
}

/// A branch as listed by the upstream API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamBranch {
    /// The name of the branch.
    name: String,

    /// The SHA of the commit at the tip of the branch.
    last_commit_sha: String,
}

impl UpstreamBranch {
    /// Creates a new `UpstreamBranch` instance.
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

impl Display for UpstreamBranch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Branch: {}, Commit: {}", self.name, self.last_commit_sha)
    }
}
