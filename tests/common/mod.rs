#![allow(dead_code)]
use axum::{
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use campaign_intake::RawFormValues;
use reqwest::Url;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{Mutex, Notify};

/// One request as the fake webhook saw it.
#[derive(Debug, Clone)]
pub struct Hit {
    pub content_type: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Clone, Default)]
pub struct Received(Arc<Mutex<Vec<Hit>>>);

impl Received {
    pub async fn hits(&self) -> Vec<Hit> {
        self.0.lock().await.clone()
    }
}

pub struct FakeWebhook {
    pub url: Url,
    pub received: Received,
    /// Held requests complete once this is notified.
    pub release: Arc<Notify>,
}

async fn serve(app: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{addr}/hook").parse().unwrap()
}

async fn spawn(status: StatusCode, reply: &'static str, hold: bool) -> FakeWebhook {
    let received = Received::default();
    let release = Arc::new(Notify::new());

    let state = received.clone();
    let gate = release.clone();
    let app = Router::new().route(
        "/hook",
        post(move |headers: HeaderMap, body: String| {
            let state = state.clone();
            let gate = gate.clone();
            async move {
                state.0.lock().await.push(Hit {
                    content_type: headers
                        .get(CONTENT_TYPE)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string),
                    body: serde_json::from_str(&body).unwrap_or(serde_json::Value::Null),
                });
                if hold {
                    gate.notified().await;
                }
                (status, reply)
            }
        }),
    );

    FakeWebhook {
        url: serve(app).await,
        received,
        release,
    }
}

pub async fn webhook(status: StatusCode, reply: &'static str) -> FakeWebhook {
    spawn(status, reply, false).await
}

/// A webhook that accepts requests but only answers after `release` is notified.
pub async fn held_webhook() -> FakeWebhook {
    spawn(StatusCode::OK, "ok", true).await
}

/// An address with nothing listening on it.
pub async fn dead_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/hook").parse().unwrap()
}

pub fn phone_only() -> RawFormValues {
    RawFormValues {
        name: "Jo".to_string(),
        business_name: "Acme".to_string(),
        business_link: "acme.com".to_string(),
        email: String::new(),
        phone_number: "555-1234".to_string(),
        industry: "Retail".to_string(),
        ..Default::default()
    }
}
