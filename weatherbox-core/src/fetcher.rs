use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};

use crate::{
    error::FetchError,
    model::{RenderedSummary, RequestState, WeatherQuery},
    page::OutputArea,
    render::{ERROR_TEXT, LOADING_TEXT, RenderMode},
    transport::WeatherTransport,
};

/// Turns a click into one outbound request and renders its outcome into the
/// weather box.
///
/// Clones share the transport, the output area and the request state. Two
/// requests started back to back are not sequenced: whichever completes last
/// owns the box and the state.
#[derive(Debug, Clone)]
pub struct WeatherFetcher {
    transport: Arc<dyn WeatherTransport>,
    query: WeatherQuery,
    output: OutputArea,
    mode: RenderMode,
    state: Arc<Mutex<Option<RequestState>>>,
}

impl WeatherFetcher {
    pub fn new(
        transport: Arc<dyn WeatherTransport>,
        query: WeatherQuery,
        output: OutputArea,
        mode: RenderMode,
    ) -> Self {
        Self { transport, query, output, mode, state: Arc::default() }
    }

    /// State of the most recently written request; `None` before the first one.
    pub fn state(&self) -> Option<RequestState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set_state(&self, state: RequestState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = Some(state);
    }

    /// Request the weather and build a summary, without touching the output.
    pub async fn fetch_summary(&self) -> Result<RenderedSummary, FetchError> {
        let response = self.transport.fetch(&self.query).await?;
        RenderedSummary::from_response(&response)
    }

    /// Show the loading text, perform the request, then overwrite the box
    /// with either the summary markup or the fixed error text.
    ///
    /// The loading text and the `Pending` state are written before the first
    /// await point.
    pub async fn fetch_and_render(&self) -> RequestState {
        self.output.set_text(LOADING_TEXT);
        self.set_state(RequestState::Pending);

        let state = match self.fetch_summary().await {
            Ok(summary) => {
                info!(location = %summary.location, fahrenheit = summary.fahrenheit, "Weather rendered");
                self.output.set_markup(summary.to_markup(self.mode));
                RequestState::Resolved(summary)
            }
            Err(err) => {
                warn!(error = %err, "Weather request failed");
                self.output.set_text(ERROR_TEXT);
                RequestState::Failed
            }
        };

        self.set_state(state.clone());
        state
    }
}
