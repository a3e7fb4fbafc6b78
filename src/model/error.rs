use thiserror::Error;

/// The standard result type used throughout the application.
pub type StdResult<T> = Result<T, anyhow::Error>;

/// Fetcher error
#[derive(Error, Debug)]
pub enum FetcherError {
    /// The requested resource does not exist upstream
    #[error("Not found: {0}")]
    NotFound(String),

    /// The upstream answered with a non success status other than 404
    #[error("Unexpected status {status} for {url}")]
    Status { status: u16, url: String },

    /// The request could not be sent or the response could not be read
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded
    #[error("Decoding error: {0}")]
    Decode(String),
}

impl FetcherError {
    /// Whether the error is a 404 from the upstream.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetcherError::NotFound(_))
    }
}

/// Aggregator error
#[derive(Error, Debug)]
pub enum AggregatorError {
    /// The requested user does not exist upstream
    #[error("User '{0}' not found")]
    UserNotFound(String),

    /// Any other failure while listing the repositories of the user
    #[error("Upstream error: {0}")]
    Upstream(#[from] FetcherError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_not_found_message_contains_username() {
        let error = AggregatorError::UserNotFound("ghost-user-404".to_string());

        assert!(error.to_string().contains("ghost-user-404"));
    }

    #[test]
    fn only_not_found_is_not_found() {
        assert!(FetcherError::NotFound("octocat".to_string()).is_not_found());
        assert!(
            !FetcherError::Status {
                status: 500,
                url: "https://api.github.com/users/octocat/repos".to_string()
            }
            .is_not_found()
        );
        assert!(!FetcherError::Transport("connection refused".to_string()).is_not_found());
        assert!(!FetcherError::Decode("missing field `fork`".to_string()).is_not_found());
    }
}
