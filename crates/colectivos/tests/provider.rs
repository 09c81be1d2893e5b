#![allow(missing_docs)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use colectivos::provider::{Clock, Config, HttpRequest};
use http::{Request, Response};

/// How the mock upstream answers.
#[derive(Clone, Debug)]
pub enum Upstream {
    Respond(u16, Bytes),
    Slow(Duration, u16, Bytes),
    Hang,
    Unreachable(String),
}

#[derive(Clone)]
pub struct MockProvider {
    upstream: Upstream,
    config: HashMap<String, String>,
    now: DateTime<Utc>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    #[allow(unused)]
    #[must_use]
    pub fn new(upstream: Upstream) -> Self {
        let config = HashMap::from([
            ("CLIENT_ID".to_string(), "test-id".to_string()),
            ("CLIENT_SECRET".to_string(), "test-secret".to_string()),
        ]);

        Self {
            upstream,
            config,
            now: Utc.timestamp_opt(1_700_000_600, 0).unwrap(),
            requests: Arc::new(Mutex::new(vec![])),
        }
    }

    #[allow(unused)]
    #[must_use]
    pub fn with_config(mut self, key: &str, value: &str) -> Self {
        self.config.insert(key.to_string(), value.to_string());
        self
    }

    #[allow(unused)]
    #[must_use]
    pub fn without_config(mut self, key: &str) -> Self {
        self.config.remove(key);
        self
    }

    /// URIs of the requests received so far.
    #[allow(unused)]
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpRequest for MockProvider {
    async fn fetch(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        self.requests.lock().unwrap().push(request.uri().to_string());

        let (status, body) = match self.upstream.clone() {
            Upstream::Respond(status, body) => (status, body),
            Upstream::Slow(delay, status, body) => {
                tokio::time::sleep(delay).await;
                (status, body)
            }
            Upstream::Hang => std::future::pending().await,
            Upstream::Unreachable(reason) => return Err(anyhow!(reason)),
        };

        Response::builder().status(status).body(body).context("failed to build response")
    }
}

impl Config for MockProvider {
    async fn get(&self, key: &str) -> Result<String> {
        self.config.get(key).cloned().ok_or_else(|| anyhow!("{key} not set"))
    }
}

impl Clock for MockProvider {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
