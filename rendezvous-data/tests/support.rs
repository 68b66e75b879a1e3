//! Mock HTTP server standing in for the Google Maps web services.

use tokio::runtime::Runtime;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A canned reply: HTTP status code and JSON body.
#[derive(Debug, Clone)]
pub struct Reply {
    /// HTTP status code.
    pub status: u16,
    /// Response body, served as `application/json`.
    pub body: String,
}

impl Reply {
    /// A 200 reply carrying `body`.
    pub fn ok(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_owned(),
        }
    }

    /// An empty JSON object with the given status.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: "{}".to_owned(),
        }
    }
}

/// A `wiremock` server with one reply per path, driven from synchronous
/// steps through its own runtime.
///
/// The server accepts connections on a background thread, so the blocking
/// client under test is called outside this runtime.
pub struct MapsServer {
    runtime: Runtime,
    server: MockServer,
}

impl MapsServer {
    /// Start a server answering `routes`; unmatched paths get a 404.
    pub fn start(routes: Vec<(&'static str, Reply)>) -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("mock server runtime");
        let server = runtime.block_on(async {
            let server = MockServer::start().await;
            for (route, reply) in routes {
                Mock::given(method("GET"))
                    .and(path(route))
                    .respond_with(
                        ResponseTemplate::new(reply.status)
                            .set_body_raw(reply.body, "application/json"),
                    )
                    .mount(&server)
                    .await;
            }
            server
        });
        Self { runtime, server }
    }

    /// Base URL to configure the client with.
    pub fn base_url(&self) -> String {
        self.server.uri()
    }

    /// Request targets (path and query) received so far.
    pub fn requests(&self) -> Vec<String> {
        self.runtime
            .block_on(self.server.received_requests())
            .expect("request recording is enabled")
            .iter()
            .map(|request| match request.url.query() {
                Some(query) => format!("{}?{query}", request.url.path()),
                None => request.url.path().to_owned(),
            })
            .collect()
    }
}

/// Successful geocoding response.
pub const GEOCODE_OK: &str = r#"{
  "status": "OK",
  "results": [
    {"geometry": {"location": {"lat": 12.9352, "lng": 77.6245}}},
    {"geometry": {"location": {"lat": 0.0, "lng": 0.0}}}
  ]
}"#;

/// Geocoding response with no results.
pub const GEOCODE_ZERO_RESULTS: &str = r#"{"status": "ZERO_RESULTS", "results": []}"#;

/// Successful directions response.
pub const DIRECTIONS_OK: &str = r#"{
  "status": "OK",
  "routes": [
    {
      "overview_polyline": {"points": "_p~iF~ps|U_ulLnnqC_mqNvxq`@"},
      "legs": [
        {
          "distance": {"text": "5.2 km", "value": 5200},
          "duration": {"text": "12 mins", "value": 720}
        }
      ]
    }
  ]
}"#;

/// Directions response with a denied request.
pub const DIRECTIONS_DENIED: &str = r#"{
  "status": "REQUEST_DENIED",
  "error_message": "The provided API key is invalid.",
  "routes": []
}"#;
