//! Host provider: real HTTP, process environment and the system clock.

use std::env;

use anyhow::{Context, Result};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::{Request, Response};
use realtime::{Clock, Config, HttpRequest};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug)]
pub struct Provider {
    client: reqwest::Client,
}

impl Provider {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("building HTTP client")?;
        Ok(Self { client })
    }
}

impl HttpRequest for Provider {
    async fn fetch(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        let request = reqwest::Request::try_from(request).context("converting request")?;
        let url = request.url().clone();

        let response = self
            .client
            .execute(request)
            .await
            .with_context(|| format!("requesting {}{}", url.host_str().unwrap_or(""), url.path()))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.context("reading response body")?;

        let mut reply = Response::builder().status(status).body(body).context("building response")?;
        *reply.headers_mut() = headers;
        Ok(reply)
    }
}

impl Config for Provider {
    async fn get(&self, key: &str) -> Result<String> {
        let value = env::var(key).with_context(|| format!("`{key}` is not set"))?;
        tracing::trace!("{key} loaded from environment");
        Ok(value)
    }
}

impl Clock for Provider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
