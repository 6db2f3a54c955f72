//! Form controller for the rainfall prediction page.
//!
//! The page has three mutually exclusive input modes (city, current location,
//! manual entry), two parameter forms (the shared one filled by a weather
//! fetch, and the manual one), and a single result area. All user actions are
//! modelled as [`Trigger`]s handled by [`FormController`].

pub mod controller;
pub mod models;

pub use controller::{
    ControllerError, FormController, FormView, Trigger, FETCHED_MESSAGE, FETCHING_MESSAGE,
    PREDICTING_MESSAGE,
};
pub use models::mode::{Mode, ParseModeError, Section, SectionVisibility};
pub use models::parameter_form::{ParameterField, ParameterForm, ParseFieldError};
pub use models::result_view::{
    ResultView, StatusIcon, NO_RAINFALL_COLOR, NO_RAIN_CLASS, RAINFALL_COLOR,
};
