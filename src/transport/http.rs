use super::{ClientConfig, SchemaSource, SubmissionTransport};
use crate::error::{SchemaError, SubmissionError};
use crate::submission::SubmissionPayload;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use tracing::{debug, info};

/// Blocking HTTP implementation of both network edges.
pub struct HttpClient {
    client: Client,
    config: ClientConfig,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl SchemaSource for HttpClient {
    fn fetch(&self, url: &str) -> Result<String, SchemaError> {
        info!(url, "fetching form page");
        let response = self
            .client
            .get(url)
            .timeout(self.config.fetch_timeout)
            .send()
            .map_err(|e| SchemaError::Fetch {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SchemaError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text().map_err(|e| SchemaError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        debug!(bytes = body.len(), "form page fetched");
        Ok(body)
    }
}

impl SubmissionTransport for HttpClient {
    fn submit(&self, url: &str, payload: &SubmissionPayload) -> Result<(), SubmissionError> {
        info!(url, fields = payload.len(), "submitting form");
        let response = self
            .client
            .post(url)
            .timeout(self.config.submit_timeout)
            .form(&payload.form_pairs())
            .send()
            .map_err(|e| SubmissionError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SubmissionError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
