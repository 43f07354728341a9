//! Owned model of the page the three handlers act on.
//!
//! Every element binding is created once in [`Page::new`] and kept for the
//! page's lifetime; handlers never look elements up again.

use std::sync::{Arc, Mutex, PoisonError};

use crate::{
    Config,
    fetcher::WeatherFetcher,
    model::{RequestState, WeatherQuery},
    render::RenderMode,
    transport::{WeatherTransport, transport_from_config},
};

/// Content of the weather box.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputContent {
    #[default]
    Empty,
    /// Inserted as text.
    Text(String),
    /// Inserted as unescaped markup.
    Markup(String),
}

impl OutputContent {
    pub fn as_str(&self) -> &str {
        match self {
            OutputContent::Empty => "",
            OutputContent::Text(s) | OutputContent::Markup(s) => s,
        }
    }
}

impl std::fmt::Display for OutputContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared handle to the weather box. Every write replaces the whole content.
#[derive(Debug, Clone, Default)]
pub struct OutputArea {
    inner: Arc<Mutex<OutputContent>>,
}

impl OutputArea {
    pub fn set_text(&self, text: impl Into<String>) {
        self.replace(OutputContent::Text(text.into()));
    }

    pub fn set_markup(&self, markup: impl Into<String>) {
        self.replace(OutputContent::Markup(markup.into()));
    }

    pub fn content(&self) -> OutputContent {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn replace(&self, content: OutputContent) {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = content;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    value: String,
}

impl InputField {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    TintSubmit,
    NewItemSubmit,
    AjaxClick,
}

/// A user action delivered to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiEvent {
    pub kind: EventKind,
    default_prevented: bool,
}

impl UiEvent {
    pub fn new(kind: EventKind) -> Self {
        Self { kind, default_prevented: false }
    }

    /// Stop the form submission or link navigation that would otherwise follow.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// A colour made only of digits is taken as hex and gets a `#` prefix.
pub fn normalize_tint(value: &str) -> String {
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        format!("#{value}")
    } else {
        value.to_string()
    }
}

#[derive(Debug)]
pub struct Page {
    tint_input: InputField,
    bg_tint: Option<String>,
    text_input: InputField,
    list: Vec<String>,
    weather_box: OutputArea,
    fetcher: WeatherFetcher,
}

impl Page {
    pub fn new(transport: Arc<dyn WeatherTransport>, query: WeatherQuery, mode: RenderMode) -> Self {
        let weather_box = OutputArea::default();
        let fetcher = WeatherFetcher::new(transport, query, weather_box.clone(), mode);

        Self {
            tint_input: InputField::default(),
            bg_tint: None,
            text_input: InputField::default(),
            list: Vec::new(),
            weather_box,
            fetcher,
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let transport = transport_from_config(config)?;
        Ok(Self::new(transport, config.query(), config.render_mode))
    }

    pub fn tint_input(&self) -> &InputField {
        &self.tint_input
    }

    pub fn tint_input_mut(&mut self) -> &mut InputField {
        &mut self.tint_input
    }

    pub fn text_input(&self) -> &InputField {
        &self.text_input
    }

    pub fn text_input_mut(&mut self) -> &mut InputField {
        &mut self.text_input
    }

    /// Background colour of the tint target, if one was ever applied.
    pub fn background_color(&self) -> Option<&str> {
        self.bg_tint.as_deref()
    }

    pub fn list_items(&self) -> &[String] {
        &self.list
    }

    pub fn weather_box(&self) -> &OutputArea {
        &self.weather_box
    }

    /// `Pending` while a weather request is in flight, then its outcome.
    pub fn weather_state(&self) -> Option<RequestState> {
        self.fetcher.state()
    }

    /// Handle to start weather requests independently of `&mut self`,
    /// e.g. several overlapping clicks.
    pub fn weather_fetcher(&self) -> WeatherFetcher {
        self.fetcher.clone()
    }

    pub fn submit_tint(&mut self) {
        let color = normalize_tint(self.tint_input.value());
        self.bg_tint = Some(color);
        self.tint_input.clear();
    }

    /// Append the text input's value as one list entry. The value is stored
    /// as text, so markup in it is never interpreted.
    pub fn submit_new_item(&mut self) {
        self.list.push(self.text_input.value().to_string());
        self.text_input.clear();
    }

    pub async fn click_weather(&self) -> RequestState {
        self.fetcher.fetch_and_render().await
    }

    /// Route an event to its handler. Only a weather click yields a state.
    pub async fn dispatch(&mut self, event: &mut UiEvent) -> Option<RequestState> {
        event.prevent_default();

        match event.kind {
            EventKind::TintSubmit => {
                self.submit_tint();
                None
            }
            EventKind::NewItemSubmit => {
                self.submit_new_item();
                None
            }
            EventKind::AjaxClick => Some(self.click_weather().await),
        }
    }
}
