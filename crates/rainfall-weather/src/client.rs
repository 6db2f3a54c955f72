//! HTTP client for the prediction backend.

use rainfall_core::ReqwestErrorExt;
use reqwest::Client;
use tracing::instrument;

use crate::types::{
    Coordinates, PredictionRequest, PredictionResponse, WeatherError, WeatherResponse,
};

/// The three backend calls the form depends on.
///
/// `BackendClient` is the HTTP implementation; the form controller is generic
/// over this trait so other transports can stand in.
#[allow(async_fn_in_trait)]
pub trait WeatherBackend {
    /// `GET /get_weather?city=...`
    async fn weather_by_city(&self, city: &str) -> Result<WeatherResponse, WeatherError>;

    /// `GET /get_weather_coords?lat=...&lon=...`
    async fn weather_by_coords(
        &self,
        coords: Coordinates,
    ) -> Result<WeatherResponse, WeatherError>;

    /// `POST /predict`
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, WeatherError>;
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// No request timeout is configured; the platform default applies.
    pub fn new(base_url: &str) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .build()
            .map_err(|e| WeatherError::Network(e.into_network_error()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Read the body whatever the status: the backend pairs `error` bodies
    /// with 400/500 responses.
    async fn read_body(response: reqwest::Response) -> Result<String, WeatherError> {
        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Backend returned status {}", status);
        }

        response
            .text()
            .await
            .map_err(|e| WeatherError::Network(e.into_network_error()))
    }

    async fn get_weather(&self, url: &str) -> Result<WeatherResponse, WeatherError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.into_network_error()))?;

        let body = Self::read_body(response).await?;
        WeatherResponse::decode(&body)
    }
}

impl WeatherBackend for BackendClient {
    #[instrument(skip(self), level = "info")]
    async fn weather_by_city(&self, city: &str) -> Result<WeatherResponse, WeatherError> {
        let url = format!(
            "{}/get_weather?city={}",
            self.base_url,
            urlencoding::encode(city)
        );
        self.get_weather(&url).await
    }

    #[instrument(skip(self), level = "info")]
    async fn weather_by_coords(
        &self,
        coords: Coordinates,
    ) -> Result<WeatherResponse, WeatherError> {
        let url = format!(
            "{}/get_weather_coords?lat={}&lon={}",
            self.base_url, coords.latitude, coords.longitude
        );
        self.get_weather(&url).await
    }

    #[instrument(skip(self), level = "info")]
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, WeatherError> {
        let url = format!("{}/predict", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.into_network_error()))?;

        let body = Self::read_body(response).await?;
        PredictionResponse::decode(&body)
    }
}
