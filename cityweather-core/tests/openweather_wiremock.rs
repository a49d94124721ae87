//! OpenWeather client against a mock HTTP server.

use cityweather_core::{ErrorKind, OpenWeatherClient, WeatherClient};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn paris_current() -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": 2.3488, "lat": 48.8534 },
        "weather": [{ "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }],
        "main": { "temp": 18.4, "feels_like": 17.9, "humidity": 60, "pressure": 1017 },
        "wind": { "speed": 3.2, "deg": 250 },
        "sys": { "country": "FR" },
        "name": "Paris",
        "cod": 200
    })
}

fn forecast_point(dt_txt: &str, id: u16, temp: f64) -> serde_json::Value {
    serde_json::json!({
        "dt_txt": dt_txt,
        "main": { "temp": temp, "humidity": 70 },
        "weather": [{ "id": id, "description": "whatever" }],
        "wind": { "speed": 1.0 }
    })
}

fn test_client(server: &MockServer) -> OpenWeatherClient {
    OpenWeatherClient::with_base_url("TEST_KEY".into(), server.uri())
}

#[tokio::test]
async fn current_conditions_are_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Paris"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_current()))
        .expect(1)
        .mount(&server)
        .await;

    let current = test_client(&server).fetch_current("Paris").await.unwrap();

    assert_eq!(current.city_name, "Paris");
    assert_eq!(current.country_code, "FR");
    assert_eq!(current.condition_id, 800);
    assert_eq!(current.condition_description, "clear sky");
    assert_eq!(current.humidity_pct, 60);
    assert!((current.temperature_c - 18.4).abs() < f64::EPSILON);
    assert!((current.wind_speed_mps - 3.2).abs() < f64::EPSILON);
}

#[tokio::test]
async fn city_with_spaces_is_sent_as_query_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "New York"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_current()))
        .expect(1)
        .mount(&server)
        .await;

    assert!(test_client(&server).fetch_current("New York").await.is_ok());
}

#[tokio::test]
async fn forecast_points_keep_feed_order() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "cod": "200",
        "cnt": 3,
        "list": [
            forecast_point("2024-01-15 09:00:00", 500, 4.0),
            forecast_point("2024-01-15 12:00:00", 501, 5.0),
            forecast_point("2024-01-16 12:00:00", 804, 6.5),
        ],
        "city": { "name": "Oslo", "country": "NO" }
    });
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let feed = test_client(&server).fetch_forecast("Oslo").await.unwrap();

    let ids: Vec<u16> = feed.points.iter().map(|p| p.condition_id).collect();
    assert_eq!(ids, [500, 501, 804]);
    assert_eq!(feed.points[2].timestamp.to_string(), "2024-01-16 12:00:00");
}

#[tokio::test]
async fn http_404_is_not_found_with_provider_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "cod": "404", "message": "city not found" })),
        )
        .mount(&server)
        .await;

    let failure = test_client(&server).fetch_current("Atlantis").await.unwrap_err();

    assert_eq!(failure.kind, ErrorKind::NotFound);
    assert_eq!(failure.message.as_deref(), Some("city not found"));
}

#[tokio::test]
async fn unauthorized_is_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401,
            "message": "Invalid API key. Please see https://openweathermap.org/faq#error401 for more info."
        })))
        .mount(&server)
        .await;

    let failure = test_client(&server).fetch_current("Paris").await.unwrap_err();

    assert_eq!(failure.kind, ErrorKind::ProviderError);
    assert!(failure.message.unwrap().starts_with("Invalid API key"));
}

#[tokio::test]
async fn html_error_page_is_provider_error_without_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let failure = test_client(&server).fetch_forecast("Paris").await.unwrap_err();

    assert_eq!(failure.kind, ErrorKind::ProviderError);
    assert!(failure.message.is_none());
}

#[tokio::test]
async fn malformed_success_body_is_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "name": "Paris" })))
        .mount(&server)
        .await;

    let failure = test_client(&server).fetch_current("Paris").await.unwrap_err();

    assert_eq!(failure.kind, ErrorKind::ProviderError);
}

#[tokio::test]
async fn current_body_without_humidity_is_provider_error() {
    let server = MockServer::start().await;
    let mut body = paris_current();
    body["main"].as_object_mut().unwrap().remove("humidity");
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let failure = test_client(&server).fetch_current("Paris").await.unwrap_err();

    assert_eq!(failure.kind, ErrorKind::ProviderError);
    assert!(failure.message.is_none());
}

#[tokio::test]
async fn connection_refused_is_network_error() {
    // Reserve a free port, then release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = OpenWeatherClient::with_base_url("TEST_KEY".into(), format!("http://{addr}"));
    let failure = client.fetch_current("Paris").await.unwrap_err();

    assert_eq!(failure.kind, ErrorKind::NetworkError);
    assert!(failure.message.is_some());
}
