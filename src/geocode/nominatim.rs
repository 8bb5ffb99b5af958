use super::{GeocodeResponse, ReverseGeocoder};
use crate::config::GeocodeConfig;
use crate::error::GeocodeError;
use crate::state::Coordinate;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Nominatim-style reverse geocoding client
pub struct NominatimClient {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl NominatimClient {
    pub fn new(endpoint: impl Into<String>, user_agent: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn from_config(config: &GeocodeConfig) -> Self {
        Self::new(
            config.endpoint.clone(),
            &config.user_agent,
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn classify(&self, error: reqwest::Error) -> GeocodeError {
        if error.is_timeout() {
            GeocodeError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else if error.is_decode() {
            GeocodeError::Malformed {
                details: error.to_string(),
            }
        } else {
            GeocodeError::Request(error)
        }
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimClient {
    async fn reverse(&self, coordinate: Coordinate) -> Result<GeocodeResponse, GeocodeError> {
        debug!(
            "Reverse geocoding {:.4}, {:.4} via {}",
            coordinate.latitude, coordinate.longitude, self.endpoint
        );

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("lat", coordinate.latitude.to_string()),
                ("lon", coordinate.longitude.to_string()),
                ("format", "json".to_string()),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status {
                status: status.as_u16(),
            });
        }

        response
            .json::<GeocodeResponse>()
            .await
            .map_err(|e| self.classify(e))
    }
}
