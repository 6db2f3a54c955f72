//! End-to-end form flows against a mocked prediction backend.

use rainfall_ui::{
    FormController, Mode, ParameterField, ResultView, StatusIcon, Trigger, FETCHED_MESSAGE,
    NO_RAIN_CLASS, RAINFALL_COLOR,
};
use rainfall_weather::{BackendClient, FixedGeolocator, NoGeolocation};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn london_weather() -> serde_json::Value {
    serde_json::json!({
        "pressure": 1012,
        "dewpoint": 8.456,
        "humidity": 77,
        "cloud": 40,
        "sunshine": 3.219,
        "winddirection": 180,
        "windspeed": 12
    })
}

#[tokio::test]
async fn city_fetch_then_predict_rainfall() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get_weather"))
        .and(query_param("city", "London"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_weather()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(body_json(serde_json::json!({
            "pressure": 1012.0,
            "dewpoint": 8.46,
            "humidity": 77,
            "cloud": 40,
            "sunshine": 3.22,
            "winddirection": 180.0,
            "windspeed": 12.0
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"prediction": "Rainfall"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = BackendClient::new(&mock_server.uri()).unwrap();
    let controller = FormController::new(backend, NoGeolocation, Mode::City);

    controller.set_city("London");
    controller.dispatch(Trigger::FetchByCity).await.unwrap();

    let view = controller.view();
    assert!(view.sections.weather);
    assert_eq!(view.result, ResultView::success(FETCHED_MESSAGE));
    assert_eq!(view.shared.get(ParameterField::Dewpoint), "8.46");
    assert_eq!(view.shared.get(ParameterField::Sunshine), "3.22");
    assert_eq!(view.shared.get(ParameterField::Pressure), "1012");

    controller.dispatch(Trigger::PredictShared).await.unwrap();

    let result = controller.result();
    assert_eq!(result.text(), "Result: Rainfall");
    assert_eq!(result.color(), Some(RAINFALL_COLOR));
    assert_eq!(result.icon(), Some(StatusIcon::Umbrella));
    assert!(!result.has_no_rain_marker());
}

#[tokio::test]
async fn city_not_found_keeps_section_hidden() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get_weather"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(serde_json::json!({"error": "city not found"})),
        )
        .mount(&mock_server)
        .await;

    let backend = BackendClient::new(&mock_server.uri()).unwrap();
    let controller = FormController::new(backend, NoGeolocation, Mode::City);
    controller.set_city("Nowhere");
    controller.dispatch(Trigger::FetchByCity).await.unwrap();

    let view = controller.view();
    assert_eq!(view.result.text(), "Error: city not found");
    assert!(!view.sections.weather);
    assert!(!controller.exposed(Trigger::PredictShared));
    assert!(view.shared.get(ParameterField::Pressure).is_empty());
}

#[tokio::test]
async fn current_location_fetch_sends_coordinates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get_weather_coords"))
        .and(query_param("lat", "48.8566"))
        .and(query_param("lon", "2.3522"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_weather()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = BackendClient::new(&mock_server.uri()).unwrap();
    let controller = FormController::new(
        backend,
        FixedGeolocator::new(48.8566, 2.3522),
        Mode::CurrentLocation,
    );

    controller.dispatch(Trigger::FetchByLocation).await.unwrap();

    assert!(controller.view().sections.weather);
    assert_eq!(controller.result(), ResultView::success(FETCHED_MESSAGE));
}

#[tokio::test]
async fn manual_predict_with_garbage_surfaces_backend_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(body_json(serde_json::json!({
            "pressure": 1015.5,
            "dewpoint": null,
            "humidity": 60,
            "cloud": null,
            "sunshine": 6.0,
            "winddirection": 90.0,
            "windspeed": 3.5
        })))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "Missing input values for: dewpoint, cloud"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = BackendClient::new(&mock_server.uri()).unwrap();
    let controller = FormController::new(backend, NoGeolocation, Mode::Manual);
    for (field, text) in [
        (ParameterField::Pressure, "1015.5"),
        (ParameterField::Dewpoint, "dry"),
        (ParameterField::Humidity, "60"),
        (ParameterField::Cloud, ""),
        (ParameterField::Sunshine, "6"),
        (ParameterField::WindDirection, "90"),
        (ParameterField::WindSpeed, "3.5"),
    ] {
        controller.set_manual_field(field, text);
    }

    controller.dispatch(Trigger::PredictManual).await.unwrap();

    assert_eq!(
        controller.result().text(),
        "Error: Missing input values for: dewpoint, cloud"
    );
}

#[tokio::test]
async fn manual_predict_no_rainfall_sets_marker() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"prediction": "No Rainfall"})),
        )
        .mount(&mock_server)
        .await;

    let backend = BackendClient::new(&mock_server.uri()).unwrap();
    let controller = FormController::new(backend, NoGeolocation, Mode::Manual);
    controller.dispatch(Trigger::PredictManual).await.unwrap();

    let result = controller.result();
    assert_eq!(result.text(), "Result: No Rainfall");
    assert!(result.has_no_rain_marker());
    assert_eq!(
        result.to_html(),
        "<i class='fas fa-sun'></i> Result: No Rainfall"
    );
    assert_eq!(NO_RAIN_CLASS, "no-rain");
}
