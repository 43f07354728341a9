use serde::{Deserialize, Serialize};

use crate::model::RenderedSummary;

/// Shown in the weather box while a request is in flight.
pub const LOADING_TEXT: &str = "Loading...";

/// Shown in the weather box for every kind of failure.
pub const ERROR_TEXT: &str = "Oops, something went wrong :/";

/// How service-supplied text is inserted into the summary markup.
///
/// `Raw` inserts the location name and description verbatim, so markup sent
/// by the service ends up in the page. `Escaped` HTML-escapes both first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    Raw,
    Escaped,
}

impl RenderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Raw => "raw",
            RenderMode::Escaped => "escaped",
        }
    }

    pub const fn all() -> &'static [RenderMode] {
        &[RenderMode::Raw, RenderMode::Escaped]
    }

    fn apply(&self, text: &str) -> String {
        match self {
            RenderMode::Raw => text.to_string(),
            RenderMode::Escaped => escape_html(text),
        }
    }
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RenderedSummary {
    pub fn to_markup(&self, mode: RenderMode) -> String {
        format!(
            "<table><tr><th>The Weather in {}:</th></tr>\
             <tr><td>{}&deg;F</td></tr>\
             <tr><td>{}</td></tr></table>",
            mode.apply(&self.location),
            self.fahrenheit,
            mode.apply(&self.description),
        )
    }

    pub fn to_plain_text(&self) -> String {
        format!(
            "The Weather in {}:\n{}°F\n{}",
            self.location, self.fahrenheit, self.description
        )
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(location: &str, description: &str) -> RenderedSummary {
        RenderedSummary {
            location: location.to_string(),
            fahrenheit: 50,
            description: description.to_string(),
        }
    }

    #[test]
    fn markup_contains_name_temperature_and_description() {
        let markup = summary("New York", "clear sky").to_markup(RenderMode::Raw);

        assert_eq!(
            markup,
            "<table><tr><th>The Weather in New York:</th></tr>\
             <tr><td>50&deg;F</td></tr>\
             <tr><td>clear sky</td></tr></table>"
        );
    }

    #[test]
    fn raw_mode_inserts_service_markup_verbatim() {
        let markup = summary("<b>NYC</b>", "<img src=x onerror=alert(1)>").to_markup(RenderMode::Raw);

        assert!(markup.contains("<b>NYC</b>"));
        assert!(markup.contains("<img src=x onerror=alert(1)>"));
    }

    #[test]
    fn escaped_mode_neutralises_service_markup() {
        let markup = summary("<b>NYC</b>", "rain & \"fog\"").to_markup(RenderMode::Escaped);

        assert!(markup.contains("The Weather in &lt;b&gt;NYC&lt;/b&gt;:"));
        assert!(markup.contains("rain &amp; &quot;fog&quot;"));
        assert!(!markup.contains("<b>"));
    }

    #[test]
    fn plain_text_uses_degree_sign() {
        assert_eq!(
            summary("New York", "clear sky").to_plain_text(),
            "The Weather in New York:\n50°F\nclear sky"
        );
    }

    #[test]
    fn render_mode_serde_uses_lowercase() {
        assert_eq!(serde_json::to_string(&RenderMode::Escaped).unwrap(), "\"escaped\"");
        let mode: RenderMode = serde_json::from_str("\"raw\"").unwrap();
        assert_eq!(mode, RenderMode::Raw);
    }
}
