//! Mock REST service helpers
//!
//! Wraps `wiremock` so tests can stand up the shelter API under `/api` and
//! build clients pointed at it (or at a port nobody listens on).

use rescuedesk::client::{ApiClient, Config};
use serde::Serialize;
use serde_json::json;
use wiremock::{MockServer, ResponseTemplate};

/// Path prefix the service is mounted under
pub const API_PREFIX: &str = "/api";

/// Start a fresh mock service
pub async fn start_server() -> MockServer {
    MockServer::start().await
}

/// Client for the mock service
pub fn api_for(server: &MockServer) -> ApiClient {
    let config = Config::for_server(format!("{}{}", server.uri(), API_PREFIX)).expect("valid mock url");
    ApiClient::new(config).expect("http client")
}

/// Client for a local port that refuses connections
pub fn unreachable_api() -> ApiClient {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        listener.local_addr().expect("local addr").port()
    };
    let config = Config::for_server(format!("http://127.0.0.1:{}{}", port, API_PREFIX)).expect("valid url");
    ApiClient::new(config).expect("http client")
}

/// Full request path for a service route
pub fn api_path(route: &str) -> String {
    format!("{}{}", API_PREFIX, route)
}

/// 200 with a `{ data }` envelope
pub fn data<T: Serialize>(value: T) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": value }))
}

/// Error response carrying a `message`
pub fn message(status: u16, text: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({ "success": false, "message": text }))
}

/// A user object as the service sends it
pub fn remote_user(id: &str, username: &str, role: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "username": username,
        "name": format!("{} (remote)", username),
        "email": format!("{}@example.com", username),
        "role": role,
    })
}

/// Successful auth envelope
pub fn auth_ok(token: &str, user: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "token": token,
        "user": user,
    }))
}
