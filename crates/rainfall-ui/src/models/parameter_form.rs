//! Text-backed form holding the seven weather parameters.
//!
//! Fields hold what the user sees; parsing to numbers happens only when a
//! prediction payload is built, and is as permissive as a browser's
//! `parseFloat`/`parseInt`.

use std::str::FromStr;

use rainfall_weather::{PredictionRequest, WeatherParameters};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterField {
    Pressure,
    Dewpoint,
    Humidity,
    Cloud,
    Sunshine,
    WindDirection,
    WindSpeed,
}

impl ParameterField {
    pub const ALL: [ParameterField; 7] = [
        ParameterField::Pressure,
        ParameterField::Dewpoint,
        ParameterField::Humidity,
        ParameterField::Cloud,
        ParameterField::Sunshine,
        ParameterField::WindDirection,
        ParameterField::WindSpeed,
    ];

    /// Wire and input name
    pub fn name(self) -> &'static str {
        match self {
            ParameterField::Pressure => "pressure",
            ParameterField::Dewpoint => "dewpoint",
            ParameterField::Humidity => "humidity",
            ParameterField::Cloud => "cloud",
            ParameterField::Sunshine => "sunshine",
            ParameterField::WindDirection => "winddirection",
            ParameterField::WindSpeed => "windspeed",
        }
    }

    /// Humidity and cloud are submitted as integers
    pub fn is_integer(self) -> bool {
        matches!(self, ParameterField::Humidity | ParameterField::Cloud)
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown parameter '{0}'")]
pub struct ParseFieldError(pub String);

impl FromStr for ParameterField {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParameterField::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| ParseFieldError(s.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterForm {
    values: [String; 7],
}

impl ParameterForm {
    pub fn get(&self, field: ParameterField) -> &str {
        &self.values[field.index()]
    }

    pub fn set(&mut self, field: ParameterField, text: impl Into<String>) {
        self.values[field.index()] = text.into();
    }

    /// Overwrite every field from fetched data.
    ///
    /// Dewpoint and sunshine are shown with two decimals; the rest as returned.
    pub fn populate(&mut self, params: &WeatherParameters) {
        self.set(ParameterField::Pressure, params.pressure.to_string());
        self.set(ParameterField::Dewpoint, to_fixed(params.dewpoint, 2));
        self.set(ParameterField::Humidity, params.humidity.to_string());
        self.set(ParameterField::Cloud, params.cloud.to_string());
        self.set(ParameterField::Sunshine, to_fixed(params.sunshine, 2));
        self.set(ParameterField::WindDirection, params.winddirection.to_string());
        self.set(ParameterField::WindSpeed, params.windspeed.to_string());
    }

    /// Build the `/predict` payload. Unparseable fields become `None`.
    pub fn to_request(&self) -> PredictionRequest {
        let float = |field| parse_float_prefix(self.get(field));
        let int = |field| parse_int_prefix(self.get(field));

        PredictionRequest {
            pressure: float(ParameterField::Pressure),
            dewpoint: float(ParameterField::Dewpoint),
            humidity: int(ParameterField::Humidity),
            cloud: int(ParameterField::Cloud),
            sunshine: float(ParameterField::Sunshine),
            winddirection: float(ParameterField::WindDirection),
            windspeed: float(ParameterField::WindSpeed),
        }
    }
}

/// Fixed-point text with `digits` decimals, rounding exact ties away from
/// zero the way a browser's `toFixed` does (`0.125` gives `"0.13"`).
pub fn to_fixed(value: f64, digits: usize) -> String {
    // An exact tie at `digits` decimals has at most digits + 1 binary
    // fraction bits, so its `digits + 1` expansion is exact and ends in 5.
    let scaled = value * 2f64.powi(digits as i32 + 1);
    if scaled.is_finite() && scaled.fract() == 0.0 {
        let exact = format!("{:.*}", digits + 1, value);
        if exact.ends_with('5') {
            // One ulp further from zero breaks the tie upward in magnitude.
            let nudged = f64::from_bits(value.to_bits() + 1);
            return format!("{:.*}", digits, nudged);
        }
    }
    format!("{:.*}", digits, value)
}

/// Longest leading decimal number in `text`, after leading whitespace.
///
/// `"12.5hPa"` gives 12.5, `"abc"` gives `None`.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();
    let is_digit = |i: usize| i < len && bytes[i].is_ascii_digit();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        let negative = bytes.first() == Some(&b'-');
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = end;
    while is_digit(end) {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < len && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while is_digit(frac_end) {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if end < len && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < len && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while is_digit(exp_end) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Leading base-10 integer in `text`; `"77.9"` gives 77.
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let value: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -value } else { value })
}
