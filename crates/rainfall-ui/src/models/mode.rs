//! Input modes and the visibility of the page sections they control.

use std::str::FromStr;

/// Which input method is active. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    City,
    CurrentLocation,
    Manual,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::City, Mode::CurrentLocation, Mode::Manual];

    /// Value of the mode control option
    pub fn value(self) -> &'static str {
        match self {
            Mode::City => "city",
            Mode::CurrentLocation => "current",
            Mode::Manual => "manual",
        }
    }

    /// The section that belongs to this mode
    pub fn section(self) -> Section {
        match self {
            Mode::City => Section::City,
            Mode::CurrentLocation => Section::CurrentLocation,
            Mode::Manual => Section::Manual,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.value())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mode '{0}', expected city, current or manual")]
pub struct ParseModeError(pub String);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "city" => Ok(Mode::City),
            "current" => Ok(Mode::CurrentLocation),
            "manual" => Ok(Mode::Manual),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

/// Toggleable regions of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    City,
    CurrentLocation,
    Manual,
    /// The shared parameter fields and their predict trigger
    Weather,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionVisibility {
    pub city: bool,
    pub current_location: bool,
    pub manual: bool,
    pub weather: bool,
}

impl SectionVisibility {
    /// Only the given mode's section is shown
    pub fn only(mode: Mode) -> Self {
        let mut visibility = Self::default();
        visibility.set(mode.section(), true);
        visibility
    }

    pub fn is_visible(&self, section: Section) -> bool {
        match section {
            Section::City => self.city,
            Section::CurrentLocation => self.current_location,
            Section::Manual => self.manual,
            Section::Weather => self.weather,
        }
    }

    pub fn set(&mut self, section: Section, visible: bool) {
        match section {
            Section::City => self.city = visible,
            Section::CurrentLocation => self.current_location = visible,
            Section::Manual => self.manual = visible,
            Section::Weather => self.weather = visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_values_round_trip() {
        for mode in Mode::ALL {
            assert_eq!(mode.value().parse::<Mode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_unknown_mode() {
        let err = "satellite".parse::<Mode>().unwrap_err();
        assert!(err.to_string().contains("satellite"));
    }

    #[test]
    fn test_only_shows_exactly_one_section() {
        for mode in Mode::ALL {
            let visibility = SectionVisibility::only(mode);
            let shown: Vec<Section> = [
                Section::City,
                Section::CurrentLocation,
                Section::Manual,
                Section::Weather,
            ]
            .into_iter()
            .filter(|s| visibility.is_visible(*s))
            .collect();
            assert_eq!(shown, vec![mode.section()]);
        }
    }
}
