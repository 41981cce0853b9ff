//! `RestaurantApi` contract and its reqwest implementation.

use crate::model::restaurant::Restaurant;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::time::Instant;

/// Collection resource path appended to every base URL.
pub const RESTAURANTS_PATH: &str = "restaurants";

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of one request against one endpoint.
#[derive(Debug)]
pub enum ApiError {
    /// Connection refused, DNS failure, reset, ...
    Transport { url: String, source: reqwest::Error },
    /// Server answered with a non-success status.
    Status { url: String, status: u16 },
    /// Body was not a valid restaurant array.
    Decode { url: String, message: String },
}

impl ApiError {
    pub fn url(&self) -> &str {
        match self {
            Self::Transport { url, .. } | Self::Status { url, .. } | Self::Decode { url, .. } => {
                url
            }
        }
    }

    /// Stable short code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Status { .. } => "http_status",
            Self::Decode { .. } => "malformed_body",
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport { url, source } => write!(f, "request to {url} failed: {source}"),
            Self::Status { url, status } => write!(f, "{url} responded with status {status}"),
            Self::Decode { url, message } => write!(f, "invalid payload from {url}: {message}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Builds `{base}/restaurants`, tolerating a trailing slash on `base`.
pub fn restaurants_url(base_url: &str) -> String {
    format!("{}/{RESTAURANTS_PATH}", base_url.trim_end_matches('/'))
}

/// Transport used by the services; generic so tests can script responses.
pub trait RestaurantApi {
    /// `GET {base_url}/restaurants`.
    fn fetch_restaurants(
        &self,
        base_url: &str,
    ) -> impl Future<Output = ApiResult<Vec<Restaurant>>> + Send;

    /// `POST {base_url}/restaurants` with the complete record as JSON.
    fn create_restaurant(
        &self,
        base_url: &str,
        restaurant: &Restaurant,
    ) -> impl Future<Output = ApiResult<()>> + Send;
}

/// reqwest-backed API client. Uses transport default timeouts.
#[derive(Debug, Clone, Default)]
pub struct HttpRestaurantApi {
    client: reqwest::Client,
}

impl HttpRestaurantApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl RestaurantApi for HttpRestaurantApi {
    async fn fetch_restaurants(&self, base_url: &str) -> ApiResult<Vec<Restaurant>> {
        let url = restaurants_url(base_url);
        let started_at = Instant::now();

        let response = self.client.get(&url).send().await.map_err(|source| {
            ApiError::Transport {
                url: url.clone(),
                source,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                "event=api_fetch module=api status=error url={} http_status={} duration_ms={}",
                url,
                status.as_u16(),
                started_at.elapsed().as_millis()
            );
            return Err(ApiError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;
        let restaurants =
            serde_json::from_slice::<Vec<Restaurant>>(&body).map_err(|err| ApiError::Decode {
                url: url.clone(),
                message: err.to_string(),
            })?;

        info!(
            "event=api_fetch module=api status=ok url={} count={} duration_ms={}",
            url,
            restaurants.len(),
            started_at.elapsed().as_millis()
        );
        Ok(restaurants)
    }

    async fn create_restaurant(&self, base_url: &str, restaurant: &Restaurant) -> ApiResult<()> {
        let url = restaurants_url(base_url);
        let started_at = Instant::now();

        let response = self
            .client
            .post(&url)
            .json(restaurant)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                "event=api_create module=api status=error url={} http_status={} duration_ms={}",
                url,
                status.as_u16(),
                started_at.elapsed().as_millis()
            );
            return Err(ApiError::Status {
                url,
                status: status.as_u16(),
            });
        }

        info!(
            "event=api_create module=api status=ok url={} restaurant_id={} duration_ms={}",
            url,
            restaurant.id,
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::restaurants_url;

    #[test]
    fn restaurants_url_joins_with_single_slash() {
        assert_eq!(
            restaurants_url("http://localhost:3000/api"),
            "http://localhost:3000/api/restaurants"
        );
        assert_eq!(
            restaurants_url("http://localhost:3000/api/"),
            "http://localhost:3000/api/restaurants"
        );
    }
}
