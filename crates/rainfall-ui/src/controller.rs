//! Trigger handling for the rainfall form.
//!
//! Every handler renders its loading status before the backend call and its
//! final status after the call resolves. The form state lock is never held
//! across an await, so overlapping actions are allowed and the response that
//! resolves last overwrites what the earlier one rendered.

use parking_lot::Mutex;
use tokio::sync::mpsc;

use rainfall_weather::{
    Geolocator, PredictionResponse, WeatherBackend, WeatherError, WeatherResponse,
};

use crate::models::mode::{Mode, Section, SectionVisibility};
use crate::models::parameter_form::{ParameterField, ParameterForm};
use crate::models::result_view::ResultView;

pub const FETCHING_MESSAGE: &str = "Fetching weather data...";
pub const FETCHED_MESSAGE: &str = "Weather data fetched. You can now predict.";
pub const PREDICTING_MESSAGE: &str = "Processing prediction...";

/// A user action on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    ModeChange(Mode),
    FetchByCity,
    FetchByLocation,
    /// Predict from the fetched (shared) parameter fields
    PredictShared,
    /// Predict from the manual entry fields
    PredictManual,
}

/// Errors returned to the host instead of being rendered.
///
/// `EmptyCity` and `GeolocationUnsupported` are blocking alerts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    #[error("Please enter a city name.")]
    EmptyCity,

    #[error("Geolocation is not supported by your browser.")]
    GeolocationUnsupported,

    #[error("{0:?} is not available in the current view")]
    TriggerHidden(Trigger),
}

impl ControllerError {
    /// Whether the host should show this as a blocking alert
    pub fn is_alert(&self) -> bool {
        matches!(self, Self::EmptyCity | Self::GeolocationUnsupported)
    }
}

/// Snapshot of everything the page displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub mode: Mode,
    pub sections: SectionVisibility,
    pub city: String,
    pub shared: ParameterForm,
    pub manual: ParameterForm,
    pub result: ResultView,
}

#[derive(Debug, Clone, Copy)]
enum FormSource {
    Shared,
    Manual,
}

pub struct FormController<B, G> {
    backend: B,
    geolocator: G,
    state: Mutex<FormView>,
    renders: Option<mpsc::UnboundedSender<ResultView>>,
}

impl<B: WeatherBackend, G: Geolocator> FormController<B, G> {
    /// Build the controller with `initial` as the pre-selected mode.
    ///
    /// Shows only that mode's section; nothing is rendered yet.
    pub fn new(backend: B, geolocator: G, initial: Mode) -> Self {
        tracing::debug!("Form loaded in {} mode", initial);
        Self {
            backend,
            geolocator,
            state: Mutex::new(FormView {
                mode: initial,
                sections: SectionVisibility::only(initial),
                city: String::new(),
                shared: ParameterForm::default(),
                manual: ParameterForm::default(),
                result: ResultView::Empty,
            }),
            renders: None,
        }
    }

    /// Receive every render of the result area, in order.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<ResultView> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.renders = Some(tx);
        rx
    }

    pub fn view(&self) -> FormView {
        self.state.lock().clone()
    }

    pub fn mode(&self) -> Mode {
        self.state.lock().mode
    }

    pub fn result(&self) -> ResultView {
        self.state.lock().result.clone()
    }

    pub fn set_city(&self, text: impl Into<String>) {
        self.state.lock().city = text.into();
    }

    pub fn set_shared_field(&self, field: ParameterField, text: impl Into<String>) {
        self.state.lock().shared.set(field, text);
    }

    pub fn set_manual_field(&self, field: ParameterField, text: impl Into<String>) {
        self.state.lock().manual.set(field, text);
    }

    /// Whether the control for `trigger` is currently visible
    pub fn exposed(&self, trigger: Trigger) -> bool {
        let sections = self.state.lock().sections;
        match trigger {
            Trigger::ModeChange(_) => true,
            Trigger::FetchByCity => sections.is_visible(Section::City),
            Trigger::FetchByLocation => sections.is_visible(Section::CurrentLocation),
            Trigger::PredictShared => sections.is_visible(Section::Weather),
            Trigger::PredictManual => sections.is_visible(Section::Manual),
        }
    }

    /// Run the handler for `trigger` if its control is visible.
    pub async fn dispatch(&self, trigger: Trigger) -> Result<(), ControllerError> {
        if !self.exposed(trigger) {
            tracing::debug!("Ignoring hidden trigger {:?}", trigger);
            return Err(ControllerError::TriggerHidden(trigger));
        }

        match trigger {
            Trigger::ModeChange(mode) => {
                self.select_mode(mode);
                Ok(())
            }
            Trigger::FetchByCity => self.fetch_by_city().await,
            Trigger::FetchByLocation => self.fetch_by_location().await,
            Trigger::PredictShared => {
                self.predict_shared().await;
                Ok(())
            }
            Trigger::PredictManual => {
                self.predict_manual().await;
                Ok(())
            }
        }
    }

    /// Switch input mode: hide everything, clear the result, show the mode's section.
    pub fn select_mode(&self, mode: Mode) {
        {
            let mut state = self.state.lock();
            state.mode = mode;
            state.sections = SectionVisibility::only(mode);
        }
        tracing::debug!("Mode changed to {}", mode);
        self.render(ResultView::Empty);
    }

    /// Fetch weather for the city field's trimmed text.
    pub async fn fetch_by_city(&self) -> Result<(), ControllerError> {
        let city = self.state.lock().city.trim().to_string();
        if city.is_empty() {
            return Err(ControllerError::EmptyCity);
        }

        self.begin_fetch();
        let result = self.backend.weather_by_city(&city).await;
        self.finish_fetch(result);
        Ok(())
    }

    /// Resolve the device position, then fetch weather for it.
    pub async fn fetch_by_location(&self) -> Result<(), ControllerError> {
        if !self.geolocator.is_supported() {
            return Err(ControllerError::GeolocationUnsupported);
        }

        self.begin_fetch();
        let coords = match self.geolocator.current_position().await {
            Ok(coords) => coords,
            Err(e) => {
                tracing::debug!("Position request failed: {}", e);
                self.render(ResultView::error(e));
                return Ok(());
            }
        };

        let result = self.backend.weather_by_coords(coords).await;
        self.finish_fetch(result);
        Ok(())
    }

    pub async fn predict_shared(&self) {
        self.predict(FormSource::Shared).await;
    }

    pub async fn predict_manual(&self) {
        self.predict(FormSource::Manual).await;
    }

    async fn predict(&self, source: FormSource) {
        let request = {
            let state = self.state.lock();
            match source {
                FormSource::Shared => state.shared.to_request(),
                FormSource::Manual => state.manual.to_request(),
            }
        };

        self.render(ResultView::loading(PREDICTING_MESSAGE));

        let view = match self.backend.predict(&request).await {
            Ok(PredictionResponse::Success(outcome)) => {
                tracing::info!("Prediction: {}", outcome.label());
                ResultView::Outcome(outcome)
            }
            Ok(PredictionResponse::Failure(message)) => ResultView::Error(message),
            Err(e) => {
                tracing::debug!("Prediction request failed: {}", e);
                ResultView::error(e)
            }
        };
        self.render(view);
    }

    fn begin_fetch(&self) {
        self.state.lock().sections.weather = false;
        self.render(ResultView::loading(FETCHING_MESSAGE));
    }

    fn finish_fetch(&self, result: Result<WeatherResponse, WeatherError>) {
        match result {
            Ok(WeatherResponse::Success(params)) => {
                {
                    let mut state = self.state.lock();
                    state.shared.populate(&params);
                    state.sections.weather = true;
                }
                tracing::info!("Weather data fetched");
                self.render(ResultView::success(FETCHED_MESSAGE));
            }
            Ok(WeatherResponse::Failure(message)) => {
                self.render(ResultView::Error(message));
            }
            Err(e) => {
                tracing::debug!("Weather request failed: {}", e);
                self.render(ResultView::error(e));
            }
        }
    }

    fn render(&self, view: ResultView) {
        self.state.lock().result = view.clone();
        if let Some(tx) = &self.renders {
            let _ = tx.send(view);
        }
    }
}
