use super::*;
use crate::state::{PlaceLabel, SharedState};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

enum FakeGeocoder {
    Fails,
    Hangs,
    Replies(GeocodeResponse),
}

#[async_trait::async_trait]
impl ReverseGeocoder for FakeGeocoder {
    async fn reverse(&self, _coordinate: Coordinate) -> Result<GeocodeResponse, GeocodeError> {
        match self {
            FakeGeocoder::Fails => Err(GeocodeError::Status { status: 503 }),
            FakeGeocoder::Hangs => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(GeocodeResponse::default())
            }
            FakeGeocoder::Replies(response) => Ok(response.clone()),
        }
    }
}

fn resolver(geocoder: FakeGeocoder) -> PlaceResolver {
    PlaceResolver::new(Arc::new(geocoder), Duration::from_secs(5))
}

fn address(suburb: Option<&str>, city: Option<&str>) -> GeocodeResponse {
    GeocodeResponse {
        address: Some(GeocodeAddress {
            suburb: suburb.map(str::to_string),
            city: city.map(str::to_string),
        }),
    }
}

fn here() -> Coordinate {
    Coordinate::new(35.6892, 51.389)
}

#[tokio::test]
async fn test_network_failure_is_offline() {
    let label = resolver(FakeGeocoder::Fails).resolve(here()).await;
    assert_eq!(label.as_str(), "OFFLINE SECTOR");
}

#[tokio::test(start_paused = true)]
async fn test_timeout_is_offline() {
    let label = resolver(FakeGeocoder::Hangs).resolve(here()).await;
    assert_eq!(label, PlaceLabel::Offline);
}

#[tokio::test]
async fn test_suburb_is_uppercased() {
    let reply = address(Some("Downtown"), Some("Springfield"));
    let label = resolver(FakeGeocoder::Replies(reply)).resolve(here()).await;
    assert_eq!(label.as_str(), "DOWNTOWN");
}

#[tokio::test]
async fn test_city_used_without_suburb() {
    let reply = address(None, Some("Springfield"));
    let label = resolver(FakeGeocoder::Replies(reply)).resolve(here()).await;
    assert_eq!(label.as_str(), "SPRINGFIELD");
}

#[tokio::test]
async fn test_no_place_fields_is_site_sector() {
    let label = resolver(FakeGeocoder::Replies(address(None, None)))
        .resolve(here())
        .await;
    assert_eq!(label.as_str(), "SITE SECTOR");

    let label = resolver(FakeGeocoder::Replies(GeocodeResponse::default()))
        .resolve(here())
        .await;
    assert_eq!(label, PlaceLabel::Site);
}

#[test]
fn test_blank_suburb_falls_through_to_city() {
    assert_eq!(
        label_from_response(&address(Some(""), Some("Karaj"))),
        PlaceLabel::Named("KARAJ".to_string())
    );
}

#[test]
fn test_response_parsing_ignores_extra_fields() {
    let body = r#"{"place_id": 1, "address": {"suburb": "Downtown", "road": "Main St"}}"#;
    let response: GeocodeResponse = serde_json::from_str(body).unwrap();
    assert_eq!(label_from_response(&response).as_str(), "DOWNTOWN");
}

#[tokio::test]
async fn test_resolve_into_updates_state() {
    let state = SharedState::new();
    resolver(FakeGeocoder::Replies(address(Some("Tajrish"), None)))
        .resolve_into(here(), &state)
        .await;
    assert_eq!(state.place_label().as_str(), "TAJRISH");
}

/// Serve one canned HTTP reply and hand back the request line
async fn serve_once(body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}/reverse", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
        }

        let reply = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        socket.write_all(reply.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        String::from_utf8_lossy(&request)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    });

    (endpoint, handle)
}

#[tokio::test]
async fn test_nominatim_client_queries_and_parses() {
    let (endpoint, server) = serve_once(r#"{"address":{"city":"Shiraz"}}"#).await;
    let client = NominatimClient::new(endpoint, "field-radar-test", Duration::from_secs(5));

    let response = client.reverse(Coordinate::new(29.5, 52.5)).await.unwrap();
    assert_eq!(label_from_response(&response).as_str(), "SHIRAZ");

    let request_line = server.await.unwrap();
    assert!(request_line.starts_with("GET /reverse?"));
    assert!(request_line.contains("lat=29.5"));
    assert!(request_line.contains("lon=52.5"));
    assert!(request_line.contains("format=json"));
}

#[tokio::test]
async fn test_nominatim_malformed_body_is_offline() {
    let (endpoint, _server) = serve_once("<html>rate limited</html>").await;
    let client = NominatimClient::new(endpoint, "field-radar-test", Duration::from_secs(5));
    let resolver = PlaceResolver::new(Arc::new(client), Duration::from_secs(5));

    assert_eq!(resolver.resolve(here()).await, PlaceLabel::Offline);
}

#[tokio::test]
async fn test_nominatim_unreachable_is_offline() {
    // Bind then drop so the port is very likely closed.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}/reverse", listener.local_addr().unwrap());
    drop(listener);

    let client = NominatimClient::new(endpoint, "field-radar-test", Duration::from_secs(1));
    let resolver = PlaceResolver::new(Arc::new(client), Duration::from_secs(1));
    assert_eq!(resolver.resolve(here()).await, PlaceLabel::Offline);
}
