use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::{
    domain::{AlumniRecord, Level, UserProfile},
    error::ApiError,
    protocol::ApiRoute,
};
use url::Url;

use crate::{
    controller::{DirectoryPayload, FetchTarget},
    error::FetchError,
    DirectoryProvider, ProfileProvider,
};

fn parse_base_url(raw: &str) -> Result<Url, FetchError> {
    let url = Url::parse(raw.trim()).map_err(|err| FetchError::InvalidUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(FetchError::InvalidUrl {
            url: raw.to_string(),
            reason: "url cannot be used as a base".into(),
        });
    }
    Ok(url)
}

/// Joins the route onto `base`, percent-encoding each segment.
pub fn endpoint_url(base: &Url, route: &ApiRoute<'_>) -> Result<Url, FetchError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| FetchError::InvalidUrl {
            url: base.to_string(),
            reason: "url cannot be used as a base".into(),
        })?
        .pop_if_empty()
        .extend(route.segments());
    Ok(url)
}

async fn get_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, FetchError> {
    let response = request.send().await.map_err(FetchError::transport)?;
    let status = response.status();
    let body = response.bytes().await.map_err(FetchError::transport)?;

    if !status.is_success() {
        let api_error = ApiError::from_body(&body);
        return Err(FetchError::Status {
            status: status.as_u16(),
            code: api_error.as_ref().map(|err| err.code),
            detail: api_error.map(|err| err.message),
        });
    }

    serde_json::from_slice(&body).map_err(|err| FetchError::Decode(err.to_string()))
}

/// Directory API client: `/api/colleges`, `/api/branches/:college`,
/// `/api/alumni/:college/:branch`.
#[derive(Debug, Clone)]
pub struct HttpDirectoryClient {
    http: Client,
    base_url: Url,
}

impl HttpDirectoryClient {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Self::with_http_client(Client::new(), base_url)
    }

    pub fn with_http_client(http: Client, base_url: &str) -> Result<Self, FetchError> {
        Ok(Self {
            http,
            base_url: parse_base_url(base_url)?,
        })
    }

    async fn get<T: DeserializeOwned>(&self, route: ApiRoute<'_>) -> Result<T, FetchError> {
        let url = endpoint_url(&self.base_url, &route)?;
        tracing::debug!(%url, "directory request");
        get_json(self.http.get(url)).await
    }
}

#[async_trait]
impl DirectoryProvider for HttpDirectoryClient {
    async fn colleges(&self) -> Result<Vec<String>, FetchError> {
        self.get(ApiRoute::Colleges).await
    }

    async fn branches(&self, college: &str) -> Result<Vec<String>, FetchError> {
        self.get(ApiRoute::Branches { college }).await
    }

    async fn alumni(&self, college: &str, branch: &str) -> Result<Vec<AlumniRecord>, FetchError> {
        self.get(ApiRoute::Alumni { college, branch }).await
    }

    async fn fetch(&self, target: &FetchTarget) -> Result<DirectoryPayload, FetchError> {
        let route = target.route();
        match target.level() {
            Level::Colleges => self.get(route).await.map(DirectoryPayload::Colleges),
            Level::Branches => self.get(route).await.map(DirectoryPayload::Branches),
            Level::Alumni => self.get(route).await.map(DirectoryPayload::Alumni),
        }
    }
}

/// Profile service client used by the navbar indicator.
#[derive(Debug, Clone)]
pub struct HttpProfileClient {
    http: Client,
    base_url: Url,
}

impl HttpProfileClient {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Self::with_http_client(Client::new(), base_url)
    }

    pub fn with_http_client(http: Client, base_url: &str) -> Result<Self, FetchError> {
        Ok(Self {
            http,
            base_url: parse_base_url(base_url)?,
        })
    }
}

#[async_trait]
impl ProfileProvider for HttpProfileClient {
    async fn profile(&self, token: &str) -> Result<UserProfile, FetchError> {
        let url = endpoint_url(&self.base_url, &ApiRoute::UserProfile)?;
        get_json(self.http.get(url).bearer_auth(token)).await
    }
}
