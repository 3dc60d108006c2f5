use crate::domain::ports::{Destination, Session};
use crate::utils::error::{ImportError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Destination backed by an HTTP SQL gateway: statements are POSTed to
/// `{endpoint}/statements` with the target database in the body. `connect`
/// pings the gateway so a dead destination fails the run before it starts.
#[derive(Clone)]
pub struct HttpDestination {
    client: Client,
    endpoint: String,
    database: String,
}

impl HttpDestination {
    pub async fn connect(
        endpoint: &str,
        database: &str,
        poll_interval: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(poll_interval.max(Duration::from_secs(1)))
            .build()?;

        let health = format!("{}/health", endpoint.trim_end_matches('/'));
        let response =
            client
                .get(&health)
                .send()
                .await
                .map_err(|e| ImportError::ConnectError {
                    endpoint: endpoint.to_string(),
                    reason: e.to_string(),
                })?;
        if !response.status().is_success() {
            return Err(ImportError::ConnectError {
                endpoint: endpoint.to_string(),
                reason: format!("health check returned {}", response.status()),
            });
        }

        tracing::debug!(endpoint, database, "connected to destination gateway");
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            database: database.to_string(),
        })
    }
}

#[async_trait]
impl Destination for HttpDestination {
    async fn session<'a>(&'a self) -> Result<Box<dyn Session + Send + 'a>> {
        Ok(Box::new(HttpSession { destination: self }))
    }
}

pub struct HttpSession<'a> {
    destination: &'a HttpDestination,
}

#[async_trait]
impl Session for HttpSession<'_> {
    async fn exec(&mut self, statement: &str) -> Result<()> {
        let response = self
            .destination
            .client
            .post(format!("{}/statements", self.destination.endpoint))
            .json(&serde_json::json!({
                "database": self.destination.database,
                "statement": statement,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ImportError::ExecuteError {
                status: status.as_u16(),
                detail,
            });
        }
        Ok(())
    }
}
