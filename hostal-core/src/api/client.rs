use std::time::Duration;

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::pagination::{Page, PageRequest};
use super::resource::ResourceService;
use crate::config::ApiConfig;
use crate::error::{HostalError, HostalResult};
use crate::models::{
    Client, Reservation, ReservationDetail, Room, RoomCategory, RoomState, SupportMessage,
};

pub const TOTAL_COUNT_HEADER: &str = "x-total-count";
pub const MERGE_PATCH_CONTENT_TYPE: &str = "application/merge-patch+json";

/// Problem body returned by the backend on failures.
#[derive(Debug, Default, Deserialize)]
struct ProblemBody {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> HostalResult<Self> {
        Self::from_config(&ApiConfig {
            base_url: base_url.into(),
            ..Default::default()
        })
    }

    pub fn from_config(config: &ApiConfig) -> HostalResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|t| !t.is_empty()),
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn rooms(&self) -> ResourceService<'_, Room> {
        ResourceService::new(self)
    }

    pub fn categories(&self) -> ResourceService<'_, RoomCategory> {
        ResourceService::new(self)
    }

    pub fn room_states(&self) -> ResourceService<'_, RoomState> {
        ResourceService::new(self)
    }

    pub fn reservations(&self) -> ResourceService<'_, Reservation> {
        ResourceService::new(self)
    }

    pub fn reservation_details(&self) -> ResourceService<'_, ReservationDetail> {
        ResourceService::new(self)
    }

    pub fn clients(&self) -> ResourceService<'_, Client> {
        ResourceService::new(self)
    }

    pub fn support_messages(&self) -> ResourceService<'_, SupportMessage> {
        ResourceService::new(self)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!(method = %method, url = %url, "API request");

        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> HostalResult<Response> {
        let response = builder.send().await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response).await)
        }
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> HostalResult<T> {
        let response = self
            .send(self.request(Method::GET, path).query(query))
            .await?;
        Ok(response.json::<T>().await?)
    }

    /// Fetches one page; the total comes from `X-Total-Count`.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        page: &PageRequest,
        filters: &[(String, String)],
    ) -> HostalResult<Page<T>> {
        let mut query = page.to_query();
        query.extend(filters.iter().cloned());

        let response = self
            .send(self.request(Method::GET, path).query(&query))
            .await?;
        let total = total_count(response.headers());
        let items = response.json::<Vec<T>>().await?;

        Ok(Page::new(items, total, page))
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> HostalResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::POST, path).json(body))
            .await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> HostalResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::PUT, path).json(body))
            .await?;
        Ok(response.json::<T>().await?)
    }

    /// Partial update; only the fields present in `body` change.
    pub async fn patch_json<B, T>(&self, path: &str, body: &B) -> HostalResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body)?;
        let response = self
            .send(
                self.request(Method::PATCH, path)
                    .header(CONTENT_TYPE, MERGE_PATCH_CONTENT_TYPE)
                    .body(payload),
            )
            .await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn delete(&self, path: &str) -> HostalResult<()> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    /// Bodiless PUT used by the `/activate` and `/deactivate` endpoints.
    pub async fn put_action(&self, path: &str) -> HostalResult<()> {
        self.send(self.request(Method::PUT, path)).await?;
        Ok(())
    }
}

fn total_count(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(TOTAL_COUNT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// Error key from an `X-<app>-error` alert header, if the backend sent one.
fn alert_header_code(headers: &HeaderMap) -> Option<String> {
    headers.iter().find_map(|(name, value)| {
        let name = name.as_str();
        if name.starts_with("x-") && name.ends_with("-error") {
            value.to_str().ok().map(|v| v.to_string())
        } else {
            None
        }
    })
}

async fn error_from_response(response: Response) -> HostalError {
    let status = response.status();
    let header_code = alert_header_code(response.headers());
    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();

    let problem: ProblemBody = serde_json::from_str(&body).unwrap_or_default();

    let code = problem
        .message
        .clone()
        .filter(|m| m.starts_with("error."))
        .or(header_code);

    let message = problem
        .detail
        .or(problem.title)
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty() && trimmed.len() <= 200).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| canonical_reason(status));

    warn!(status = status.as_u16(), url = %url, code = ?code, "API request rejected");

    HostalError::Api {
        status: status.as_u16(),
        code,
        message,
    }
}

fn canonical_reason(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(|r| r.to_string())
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}
