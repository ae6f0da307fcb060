//! RapidAPI provider against a mock HTTP server.

use std::sync::Arc;

use cleoncast_core::{
    FetchErrorKind, ForecastSnapshot, LocationQuery, ScreenRuntime, ScreenView, Settlement,
    ShareableAddress, StaticCredentials, ViewState, WeatherProvider, WeatherSnapshot,
    provider::rapidapi::RapidApiProvider, render::CurrentView,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

const HOST: &str = "weatherapi-com.p.rapidapi.com";

fn current_body(name: &str, temp: f64, text: &str) -> serde_json::Value {
    serde_json::json!({
        "location": {
            "name": name,
            "region": "Ile-de-France",
            "country": "France",
            "lat": 48.87,
            "lon": 2.33,
            "localtime": "2023-01-21 12:00"
        },
        "current": {
            "last_updated": "2023-01-21 11:45",
            "temp_c": temp,
            "temp_f": 50.0,
            "is_day": 1,
            "condition": { "text": text, "code": 1003 },
            "humidity": 81
        }
    })
}

fn forecast_body() -> serde_json::Value {
    serde_json::json!({
        "location": { "name": "Paris", "country": "France" },
        "current": { "temp_c": 9.0, "condition": { "text": "Sunny" } },
        "forecast": {
            "forecastday": [
                { "date": "2023-01-21", "date_epoch": 1674259200,
                  "day": { "maxtemp_c": 5.1, "mintemp_c": -1.2, "condition": { "text": "Sunny" } } },
                { "date": "2023-01-22", "date_epoch": 1674345600,
                  "day": { "maxtemp_c": 4.0, "mintemp_c": 0.3, "condition": { "text": "Overcast" } } },
                { "date": "2023-01-23", "date_epoch": 1674432000,
                  "day": { "maxtemp_c": 6.2, "mintemp_c": 1.0, "condition": { "text": "Light rain" } } }
            ]
        }
    })
}

fn provider(server: &MockServer, key: Option<&str>) -> RapidApiProvider {
    let credentials = match key {
        Some(key) => StaticCredentials::new(key),
        None => StaticCredentials::none(),
    };

    RapidApiProvider::builder()
        .base_url(server.uri())
        .api_host(HOST)
        .credentials(Arc::new(credentials))
        .build()
        .expect("mock server uri is valid")
}

#[tokio::test]
async fn current_sends_query_and_auth_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("q", "Paris"))
        .and(header("X-RapidAPI-Key", "test-key"))
        .and(header("X-RapidAPI-Host", HOST))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(current_body("Paris", 9.6, "Partly cloudy")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = provider(&server, Some("test-key"))
        .current(&LocationQuery::from("Paris"))
        .await
        .unwrap();

    assert_eq!(snapshot.location.name, "Paris");
    assert_eq!(snapshot.location.country, "France");
    assert_eq!(snapshot.temperature_c, 9.6);
    assert_eq!(snapshot.condition, "Partly cloudy");
}

#[tokio::test]
async fn forecast_requests_three_days() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("q", "Paris"))
        .and(query_param("days", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&server)
        .await;

    let forecast = provider(&server, Some("test-key"))
        .forecast(&LocationQuery::from("Paris"))
        .await
        .unwrap();

    let dates: Vec<_> = forecast.days.iter().map(|d| d.date.as_str()).collect();
    assert_eq!(dates, ["2023-01-21", "2023-01-22", "2023-01-23"]);
    assert_eq!(forecast.days[0].max_temp_c, 5.1);
    assert_eq!(forecast.days[2].condition, "Light rain");
}

#[tokio::test]
async fn empty_query_is_passed_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("q", ""))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": { "code": 1003, "message": "Parameter q is missing." }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = provider(&server, Some("test-key"))
        .current(&LocationQuery::from(""))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FetchErrorKind::Status);
    assert!(err.to_string().contains("status code 400"));
    assert!(err.to_string().contains("Parameter q is missing."));
}

#[tokio::test]
async fn missing_key_sends_unauthenticated_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "message": "Invalid API key. Go to https://docs.rapidapi.com/docs/keys for more info."
        })))
        .mount(&server)
        .await;

    let err = provider(&server, None)
        .current(&LocationQuery::from("Paris"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FetchErrorKind::Status);
    assert!(err.to_string().contains("Invalid API key"));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("x-rapidapi-key"));
    assert_eq!(requests[0].headers.get("x-rapidapi-host").unwrap(), HOST);
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "location": {} })),
        )
        .mount(&server)
        .await;

    let err = provider(&server, Some("k"))
        .current(&LocationQuery::from("Paris"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FetchErrorKind::Decode);
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    // Grab a free port, then close it so nothing is listening there.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .unwrap();

    let provider = RapidApiProvider::builder()
        .base_url(format!("http://{addr}"))
        .credentials(Arc::new(StaticCredentials::new("k")))
        .build()
        .unwrap();

    let err = provider.current(&LocationQuery::from("Paris")).await.unwrap_err();

    assert_eq!(err.kind(), FetchErrorKind::Transport);
}

#[tokio::test]
async fn current_screen_renders_rounded_result_and_share_link() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("q", "paris"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(current_body("Paris", 12.5, "Sunny")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider: Arc<dyn WeatherProvider> = Arc::new(provider(&server, Some("k")));
    let mut screen = ScreenRuntime::<WeatherSnapshot>::new(provider)
        .with_address(ShareableAddress::parse("http://localhost:3000/").unwrap());

    let ticket = screen.submit("paris");
    assert_eq!(screen.settle_all().await, vec![Settlement::Applied(ticket)]);

    let view: ScreenView<CurrentView> = ScreenView::from(&screen.state().view);
    assert_eq!(view.to_string(), "Weather in Paris, France\n13°C, Sunny");

    // The submitted text is what gets shared, not the service's spelling.
    assert_eq!(screen.address().unwrap().as_str(), "http://localhost:3000/?city=paris");
}

#[tokio::test]
async fn forecast_screen_reports_service_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(
            ResponseTemplate::new(403).set_body_string("You are not subscribed to this API."),
        )
        .mount(&server)
        .await;

    let provider: Arc<dyn WeatherProvider> = Arc::new(provider(&server, Some("k")));
    let mut screen = ScreenRuntime::<ForecastSnapshot>::new(provider);

    screen.submit("Paris");
    screen.settle_all().await;

    match &screen.state().view {
        ViewState::Failed { error, previous: None } => {
            assert_eq!(
                error.to_string(),
                "request failed with status code 403: You are not subscribed to this API."
            );
        }
        other => panic!("expected failure, got {other:?}"),
    }
}
