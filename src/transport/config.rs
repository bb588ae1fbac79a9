use std::time::Duration;

/// Settings for [`HttpClient`](super::HttpClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Timeout of the form page request (default: 10s).
    pub fetch_timeout: Duration,
    /// Timeout of the answer submission (default: 5s).
    pub submit_timeout: Duration,
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(10),
            submit_timeout: Duration::from_secs(5),
            user_agent: None,
        }
    }
}

impl ClientConfig {
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = Some(user_agent.to_string());
        self
    }
}
