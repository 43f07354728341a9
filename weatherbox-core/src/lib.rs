//! Core library for the `weatherbox` CLI.
//!
//! This crate defines:
//! - The page model: tint target, list, weather box and their handlers
//! - The weather fetcher and the transport it sends its one request through
//! - Rendering of the weather summary
//! - Configuration handling
//!
//! It is used by `weatherbox-cli`, but the page and fetcher can be driven by
//! any front end.

pub mod config;
pub mod convert;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod page;
pub mod render;
pub mod transport;

pub use config::Config;
pub use error::FetchError;
pub use fetcher::WeatherFetcher;
pub use model::{Condition, MainReading, RenderedSummary, RequestState, WeatherQuery, WeatherResponse};
pub use page::{EventKind, InputField, OutputArea, OutputContent, Page, UiEvent, normalize_tint};
pub use render::{ERROR_TEXT, LOADING_TEXT, RenderMode};
pub use transport::{OpenWeatherTransport, WeatherTransport};
