//! Local stand-in for the tagging service that records what it receives.

use axum::Router;
use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::routing::post;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
pub struct CapturedPart {
    pub name: String,
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub authorization: Option<String>,
    pub parts: Vec<CapturedPart>,
}

#[derive(Clone)]
struct Reply {
    status: StatusCode,
    body: String,
    delay: Duration,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

pub struct MockImagga {
    pub url: String,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockImagga {
    pub async fn spawn(status: StatusCode, body: &str) -> Self {
        Self::spawn_with_delay(status, body, Duration::ZERO).await
    }

    pub async fn spawn_with_delay(status: StatusCode, body: &str, delay: Duration) -> Self {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let reply = Reply {
            status,
            body: body.to_string(),
            delay,
            captured: captured.clone(),
        };

        let router = Router::new()
            .route("/v2/tags", post(tags_handler))
            .with_state(reply);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

        Self {
            url: format!("http://{}/v2/tags", addr),
            captured,
        }
    }

    pub async fn requests(&self) -> Vec<CapturedRequest> {
        self.captured.lock().await.clone()
    }
}

/// Endpoint on a port nothing listens on.
pub async fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/v2/tags", addr)
}

async fn tags_handler(
    State(reply): State<Reply>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> (StatusCode, String) {
    let mut request = CapturedRequest {
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        parts: Vec::new(),
    };

    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(String::from);
        let bytes = field.bytes().await.unwrap().to_vec();
        request.parts.push(CapturedPart {
            name,
            file_name,
            bytes,
        });
    }

    reply.captured.lock().await.push(request);
    tokio::time::sleep(reply.delay).await;

    (reply.status, reply.body)
}
