//! What the result area shows.
//!
//! One `ResultView` is displayed at a time and each render replaces the
//! previous one entirely.

use rainfall_weather::PredictionOutcome;

/// Text colour for a rainfall outcome (tomato)
pub const RAINFALL_COLOR: &str = "#ff6347";
/// Text colour for any other outcome
pub const NO_RAINFALL_COLOR: &str = "#28a745";
/// Marker class applied to the result area for non-rainfall outcomes
pub const NO_RAIN_CLASS: &str = "no-rain";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIcon {
    Spinner,
    CheckCircle,
    Warning,
    Umbrella,
    Sun,
}

impl StatusIcon {
    /// Icon font classes
    pub fn class(self) -> &'static str {
        match self {
            StatusIcon::Spinner => "fas fa-spinner fa-spin",
            StatusIcon::CheckCircle => "fas fa-check-circle",
            StatusIcon::Warning => "fas fa-exclamation-triangle",
            StatusIcon::Umbrella => "fas fa-umbrella",
            StatusIcon::Sun => "fas fa-sun",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultView {
    #[default]
    Empty,
    Loading(String),
    Success(String),
    /// Message without the "Error: " prefix
    Error(String),
    Outcome(PredictionOutcome),
}

impl ResultView {
    pub fn loading(message: impl Into<String>) -> Self {
        Self::Loading(message.into())
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::Success(message.into())
    }

    pub fn error(message: impl std::fmt::Display) -> Self {
        Self::Error(message.to_string())
    }

    pub fn icon(&self) -> Option<StatusIcon> {
        match self {
            ResultView::Empty => None,
            ResultView::Loading(_) => Some(StatusIcon::Spinner),
            ResultView::Success(_) => Some(StatusIcon::CheckCircle),
            ResultView::Error(_) => Some(StatusIcon::Warning),
            ResultView::Outcome(o) if o.is_rainfall() => Some(StatusIcon::Umbrella),
            ResultView::Outcome(_) => Some(StatusIcon::Sun),
        }
    }

    /// Plain text as displayed next to the icon
    pub fn text(&self) -> String {
        match self {
            ResultView::Empty => String::new(),
            ResultView::Loading(m) | ResultView::Success(m) => m.clone(),
            ResultView::Error(m) => format!("Error: {}", m),
            ResultView::Outcome(o) => format!("Result: {}", o.label()),
        }
    }

    /// Text colour; only outcomes are coloured
    pub fn color(&self) -> Option<&'static str> {
        match self {
            ResultView::Outcome(o) if o.is_rainfall() => Some(RAINFALL_COLOR),
            ResultView::Outcome(_) => Some(NO_RAINFALL_COLOR),
            _ => None,
        }
    }

    pub fn has_no_rain_marker(&self) -> bool {
        matches!(self, ResultView::Outcome(o) if !o.is_rainfall())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ResultView::Empty)
    }

    /// Markup for the result area: icon element followed by escaped text
    pub fn to_html(&self) -> String {
        match self.icon() {
            Some(icon) => format!(
                "<i class='{}'></i> {}",
                icon.class(),
                escape_html(&self.text())
            ),
            None => String::new(),
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_text_has_prefix() {
        let view = ResultView::error("city not found");
        assert_eq!(view.text(), "Error: city not found");
        assert_eq!(view.icon(), Some(StatusIcon::Warning));
        assert_eq!(view.color(), None);
    }

    #[test]
    fn test_rainfall_outcome() {
        let view = ResultView::Outcome(PredictionOutcome::Rainfall);
        assert_eq!(view.text(), "Result: Rainfall");
        assert_eq!(view.color(), Some(RAINFALL_COLOR));
        assert_eq!(view.icon(), Some(StatusIcon::Umbrella));
        assert!(!view.has_no_rain_marker());
    }

    #[test]
    fn test_other_outcome_is_green_with_marker() {
        for label in ["No Rainfall", "Drizzle", ""] {
            let view = ResultView::Outcome(PredictionOutcome::from_label(label));
            assert_eq!(view.text(), format!("Result: {}", label));
            assert_eq!(view.color(), Some(NO_RAINFALL_COLOR));
            assert_eq!(view.icon(), Some(StatusIcon::Sun));
            assert!(view.has_no_rain_marker());
        }
    }

    #[test]
    fn test_html_rendering() {
        assert_eq!(ResultView::Empty.to_html(), "");
        assert_eq!(
            ResultView::loading("Fetching weather data...").to_html(),
            "<i class='fas fa-spinner fa-spin'></i> Fetching weather data..."
        );
        assert_eq!(
            ResultView::Outcome(PredictionOutcome::Rainfall).to_html(),
            "<i class='fas fa-umbrella'></i> Result: Rainfall"
        );
    }

    #[test]
    fn test_html_escapes_backend_text() {
        let view = ResultView::error("<script>alert('x')</script>");
        assert_eq!(
            view.to_html(),
            "<i class='fas fa-exclamation-triangle'></i> Error: &lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
    }
}
