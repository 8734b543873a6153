//! Geocoders and the resolver chain against mock HTTP servers.

use weatherdash_core::{
    Config, Geocoder, GeocoderId, LocationResolver, ReverseGeocoder,
    geocode::{
        bigdatacloud::BigDataCloudGeocoder, geocoders_from_config, nominatim::NominatimGeocoder,
        open_meteo::OpenMeteoGeocoder, reverse_geocoder_from_config,
    },
    resolver::FALLBACK_LOCALITY,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn http() -> reqwest::Client {
    weatherdash_core::http::client().unwrap()
}

#[tokio::test]
async fn bigdatacloud_autocomplete() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/geo-autocomplete"))
        .and(query_param("query", "Mangalagiri"))
        .and(query_param("limit", "5"))
        .and(query_param("countryCode", "IN"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "name": "Mangalagiri",
                "countryName": "India",
                "regionName": "Andhra Pradesh",
                "latitude": 16.4302,
                "longitude": 80.5686
            },
            { "name": "No coordinates", "countryName": "India" }
        ])))
        .mount(&mock_server)
        .await;

    let geocoder =
        BigDataCloudGeocoder::new(http(), &mock_server.uri()).with_country_code(Some("IN"));
    let found = geocoder.search("Mangalagiri", 5).await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Mangalagiri");
    assert_eq!(found[0].country, "India");
    assert_eq!(found[0].state.as_deref(), Some("Andhra Pradesh"));
}

#[tokio::test]
async fn bigdatacloud_error_status_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/geo-autocomplete"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .mount(&mock_server)
        .await;

    let geocoder = BigDataCloudGeocoder::new(http(), &mock_server.uri());
    let err = geocoder.search("Mangalagiri", 5).await.unwrap_err();

    let msg = format!("{err:#}");
    assert!(msg.contains("503"), "{msg}");
    assert!(msg.contains("busy"), "{msg}");
}

#[tokio::test]
async fn open_meteo_without_results_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Atlantis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "generationtime_ms": 0.5
        })))
        .mount(&mock_server)
        .await;

    let geocoder = OpenMeteoGeocoder::new(http(), &mock_server.uri());
    assert!(geocoder.search("Atlantis", 5).await.unwrap().is_empty());
}

#[tokio::test]
async fn open_meteo_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("count", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                { "name": "Amaravati", "country": "India", "admin1": "Andhra Pradesh",
                  "latitude": 16.5131, "longitude": 80.5165 }
            ]
        })))
        .mount(&mock_server)
        .await;

    let geocoder = OpenMeteoGeocoder::new(http(), &mock_server.uri());
    let found = geocoder.search("Amaravati", 1).await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].state.as_deref(), Some("Andhra Pradesh"));
}

#[tokio::test]
async fn nominatim_search() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("format", "jsonv2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "lat": "16.4302", "lon": "80.5686", "name": "Mangalagiri",
                "address": { "town": "Mangalagiri", "state": "Andhra Pradesh", "country": "India" }
            }
        ])))
        .mount(&mock_server)
        .await;

    let geocoder = NominatimGeocoder::new(http(), &mock_server.uri());
    let found = geocoder.search("Mangalagiri", 5).await.unwrap();

    assert_eq!(found[0].country, "India");
    assert!((found[0].longitude - 80.5686).abs() < 1e-9);
}

#[tokio::test]
async fn reverse_geocoding_prefers_city_then_locality() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/reverse-geocode-client"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "city": "",
            "locality": "Mangalagiri",
            "principalSubdivision": "Andhra Pradesh"
        })))
        .mount(&mock_server)
        .await;

    let geocoder = BigDataCloudGeocoder::new(http(), &mock_server.uri());
    let name = geocoder.locality(16.43, 80.57).await.unwrap();

    assert_eq!(name.as_deref(), Some("Mangalagiri"));
}

fn config_for(server: &MockServer, order: &[GeocoderId]) -> Config {
    let mut cfg = Config::default();
    cfg.set_geocoder_order(order);
    cfg.endpoints.bigdatacloud = server.uri();
    cfg.endpoints.open_meteo_geocoding = server.uri();
    cfg.endpoints.nominatim = server.uri();
    cfg
}

#[tokio::test]
async fn resolver_falls_back_to_next_provider() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/geo-autocomplete"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                { "name": "Amaravati", "country": "India", "admin1": "Andhra Pradesh",
                  "latitude": 16.5131, "longitude": 80.5165 }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let cfg = config_for(
        &mock_server,
        &[GeocoderId::BigDataCloud, GeocoderId::OpenMeteo, GeocoderId::Nominatim],
    );
    let resolver = LocationResolver::new(geocoders_from_config(&cfg, &http()).unwrap());

    let found = resolver.resolve_one("Amaravati").await.expect("second provider answers");
    assert_eq!(found.name, "Amaravati");
}

#[tokio::test]
async fn resolver_never_calls_network_for_builtin_places() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let cfg = config_for(&mock_server, GeocoderId::all());
    let resolver = LocationResolver::new(geocoders_from_config(&cfg, &http()).unwrap());

    let found = resolver.resolve_one("Tadepalli").await.unwrap();
    assert_eq!(found.name, "Tadepalli");
    assert_eq!(found.state.as_deref(), Some("Andhra Pradesh"));
}

#[tokio::test]
async fn resolver_returns_empty_when_everyone_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let cfg = config_for(&mock_server, GeocoderId::all());
    let resolver = LocationResolver::new(geocoders_from_config(&cfg, &http()).unwrap())
        .with_reverse(reverse_geocoder_from_config(&cfg, &http()));

    assert!(resolver.search("Atlantis").await.is_empty());

    let here = resolver.locate(16.43, 80.57).await;
    assert_eq!(here.name, FALLBACK_LOCALITY);
}
