use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc, time::Duration};

use crate::{Config, WeatherQuery, WeatherResponse, error::FetchError};

pub mod openweather;

pub use openweather::OpenWeatherTransport;

/// The single outbound GET the weather box performs.
///
/// Production code talks to OpenWeather; tests inject their own
/// implementation to script successes, failures and completion order.
#[async_trait]
pub trait WeatherTransport: Send + Sync + Debug {
    async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherResponse, FetchError>;
}

/// Construct the OpenWeather transport described by `config`.
pub fn transport_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherTransport>> {
    let transport = OpenWeatherTransport::new(
        config.endpoint.clone(),
        config.api_key.clone(),
        config.timeout_secs.map(Duration::from_secs),
    )?;

    Ok(Arc::new(transport))
}
