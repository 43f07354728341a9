use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    error::FetchError,
    model::{WeatherQuery, WeatherResponse},
};

use super::WeatherTransport;

#[derive(Debug, Clone)]
pub struct OpenWeatherTransport {
    endpoint: String,
    api_key: Option<String>,
    http: Client,
}

impl OpenWeatherTransport {
    /// `endpoint` is the API base, e.g. `http://api.openweathermap.org/data/2.5`.
    /// Without `timeout` the request may wait indefinitely.
    pub fn new(
        endpoint: String,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(FetchError::Transport)?;

        Ok(Self { endpoint, api_key, http })
    }

    fn url(&self) -> String {
        format!("{}/weather", self.endpoint.trim_end_matches('/'))
    }

    fn query_params(&self, query: &WeatherQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![("zip", query.zip_param())];
        if let Some(key) = &self.api_key {
            params.push(("appid", key.clone()));
        }
        params
    }
}

#[async_trait]
impl WeatherTransport for OpenWeatherTransport {
    #[instrument(skip(self), fields(zip = %query.zip_param()))]
    async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherResponse, FetchError> {
        let url = self.url();
        debug!(url = %url, has_key = self.api_key.is_some(), "Requesting current weather");

        let res = self
            .http
            .get(&url)
            .query(&self.query_params(query))
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = res.status();
        let body = res.text().await.map_err(FetchError::Transport)?;

        if !status.is_success() {
            return Err(FetchError::Status { status, body: truncate_body(&body) });
        }

        serde_json::from_str(&body).map_err(|e| FetchError::Malformed(e.to_string()))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
