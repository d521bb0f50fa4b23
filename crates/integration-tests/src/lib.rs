//! Integration tests for the Firecracker Stand.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p firecracker-integration-tests
//! ```
//!
//! Tests drive the storefront router in-process with
//! [`tower::ServiceExt::oneshot`]; no server or network is needed.
//! A [`Shopper`] carries the session cookie between requests the way a
//! browser would.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, HeaderValue, Request, StatusCode, header};
use firecracker_core::Catalog;
use firecracker_storefront::config::StorefrontConfig;
use firecracker_storefront::state::AppState;
use tower::ServiceExt;

/// A response with its body collected into a string.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Parse the body as JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }

    /// A header value as a string, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A browser-like client with its own session.
pub struct Shopper {
    app: Router,
    cookie: Option<String>,
}

impl Shopper {
    /// A shopper against a fresh storefront with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(StorefrontConfig::default())
    }

    /// A shopper against a fresh storefront with the given configuration.
    #[must_use]
    pub fn with_config(config: StorefrontConfig) -> Self {
        let state = AppState::new(config, Catalog::firecrackers());
        Self {
            app: firecracker_storefront::app(state),
            cookie: None,
        }
    }

    /// A second shopper on the same storefront, with no session yet.
    #[must_use]
    pub fn stranger(&self) -> Self {
        Self {
            app: self.app.clone(),
            cookie: None,
        }
    }

    /// Another client sharing this shopper's session, like a second tab.
    #[must_use]
    pub fn twin(&self) -> Self {
        Self {
            app: self.app.clone(),
            cookie: self.cookie.clone(),
        }
    }

    /// Send a GET request.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = Request::get(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    /// Send a form-encoded POST request.
    pub async fn post_form(&mut self, uri: &str, form: &str) -> TestResponse {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Add one unit of a product via the cart route.
    pub async fn add(&mut self, product_id: u32) -> TestResponse {
        self.post_form("/cart/add", &format!("product_id={product_id}"))
            .await
    }

    /// Remove one unit of a product via the cart route.
    pub async fn remove(&mut self, product_id: u32) -> TestResponse {
        self.post_form("/cart/remove", &format!("product_id={product_id}"))
            .await
    }

    /// The shopper's cart as JSON.
    pub async fn cart_json(&mut self) -> serde_json::Value {
        self.get("/api/cart").await.json()
    }

    async fn send(&mut self, mut request: Request<Body>) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            request
                .headers_mut()
                .insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        }

        let response = self.app.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}

impl Default for Shopper {
    fn default() -> Self {
        Self::new()
    }
}
