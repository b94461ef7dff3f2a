//! Local stand-in for the Finage API.

use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    Router,
};
use finage_market_data::{FinageClient, FinageConfig};
use tokio::net::TcpListener;

#[derive(Clone)]
struct Shared {
    status: StatusCode,
    body: String,
    requests: Arc<Mutex<Vec<String>>>,
}

/// Upstream that answers every request with the same status and body.
pub struct MockUpstream {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockUpstream {
    pub async fn start(status: StatusCode, body: &str) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let shared = Shared {
            status,
            body: body.to_string(),
            requests: requests.clone(),
        };

        let app = Router::new().fallback(respond).with_state(shared);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    /// Path and query of every request received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn client(&self, api_key: &str) -> FinageClient {
        FinageClient::new(&FinageConfig::new(self.base_url.clone(), api_key).unwrap())
    }
}

async fn respond(
    State(shared): State<Shared>,
    uri: Uri,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    shared.requests.lock().unwrap().push(uri.to_string());
    (
        shared.status,
        [(header::CONTENT_TYPE, "application/json")],
        shared.body.clone(),
    )
}

/// Base URL of a port nothing listens on.
pub async fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
