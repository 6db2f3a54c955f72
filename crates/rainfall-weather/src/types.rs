use rainfall_core::NetworkError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The seven numeric inputs the prediction model expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherParameters {
    pub pressure: f64,
    pub dewpoint: f64,
    pub humidity: f64,
    pub cloud: f64,
    pub sunshine: f64,
    pub winddirection: f64,
    pub windspeed: f64,
}

/// Geographic position from the host's geolocation capability
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Decoded body of `/get_weather` and `/get_weather_coords`.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherResponse {
    Success(WeatherParameters),
    /// The backend reported an `error` field
    Failure(String),
}

impl WeatherResponse {
    /// Decode a response body.
    ///
    /// A truthy `error` field wins over everything else. Otherwise all seven
    /// fields must be present and numeric.
    pub fn decode(body: &str) -> Result<Self, WeatherError> {
        let value = parse_object(body)?;
        if let Some(message) = backend_error(&value) {
            return Ok(Self::Failure(message));
        }

        serde_json::from_value(value)
            .map(Self::Success)
            .map_err(|e| WeatherError::Parse(format!("weather data: {}", e)))
    }
}

/// Categorical result of a prediction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictionOutcome {
    Rainfall,
    /// Any label other than "Rainfall", kept verbatim (the backend sends "No Rainfall")
    NoRainfall(String),
}

impl PredictionOutcome {
    pub const RAINFALL_LABEL: &'static str = "Rainfall";

    pub fn from_label(label: &str) -> Self {
        if label == Self::RAINFALL_LABEL {
            Self::Rainfall
        } else {
            Self::NoRainfall(label.to_string())
        }
    }

    /// The label exactly as the backend returned it
    pub fn label(&self) -> &str {
        match self {
            Self::Rainfall => Self::RAINFALL_LABEL,
            Self::NoRainfall(label) => label,
        }
    }

    pub fn is_rainfall(&self) -> bool {
        matches!(self, Self::Rainfall)
    }
}

/// Decoded body of `/predict`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictionResponse {
    Success(PredictionOutcome),
    Failure(String),
}

impl PredictionResponse {
    pub fn decode(body: &str) -> Result<Self, WeatherError> {
        let value = parse_object(body)?;
        if let Some(message) = backend_error(&value) {
            return Ok(Self::Failure(message));
        }

        match value.get("prediction") {
            Some(Value::String(label)) => Ok(Self::Success(PredictionOutcome::from_label(label))),
            Some(other) => Err(WeatherError::Parse(format!(
                "prediction must be a string, got {}",
                other
            ))),
            None => Err(WeatherError::Parse("missing field `prediction`".to_string())),
        }
    }
}

/// Body of `POST /predict`.
///
/// `None` marks a field whose form text was not a number; it is sent as JSON
/// `null` and left for the backend to reject.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub pressure: Option<f64>,
    pub dewpoint: Option<f64>,
    pub humidity: Option<i64>,
    pub cloud: Option<i64>,
    pub sunshine: Option<f64>,
    pub winddirection: Option<f64>,
    pub windspeed: Option<f64>,
}

fn parse_object(body: &str) -> Result<Value, WeatherError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| WeatherError::Parse(e.to_string()))?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(WeatherError::Parse(format!("expected a JSON object, got {}", value)))
    }
}

/// The `error` field's message if it is set to something truthy.
fn backend_error(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Location service errors. Each variant carries the platform's message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("{0}")]
    PermissionDenied(String),
    #[error("{0}")]
    PositionUnavailable(String),
    #[error("{0}")]
    Timeout(String),
    #[error("{0}")]
    Other(String),
}

/// Transport and decoding failures talking to the backend
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error("Invalid response: {0}")]
    Parse(String),
}
