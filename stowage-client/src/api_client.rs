//! REST client for the inventory API.

use crate::config::{AuthConfig, ClientConfig};
use crate::reference::ReferenceLists;
use crate::types::{
    ApiEnvelope, AuthUserPayload, ErrorBody, LookupOption, SuccessPayload, TransitionRequest, User,
};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use std::sync::Arc;
use stowage_core::{
    BuildingDisplay, BuildingFilters, ContainerDisplay, ContainerFilters, EntityId, EntityKind,
    FetchError, FetchListParams, FetchListResult, FurnitureDisplay, FurnitureFilters,
    ItemDisplay, ItemFilters, ListEntity, PlaceDisplay, PlaceFilters, RoomDisplay, RoomFilters,
};
use tracing::debug;

/// Cookie carrying the session token issued by the auth provider.
pub const SESSION_COOKIE: &str = "better-auth.session_token";

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
    #[error("Config error: {0}")]
    Config(String),
}

impl ApiClientError {
    /// Message suitable for showing next to a list.
    ///
    /// Errors reported by the API itself are shown verbatim.
    pub fn user_message(&self) -> String {
        match self {
            ApiClientError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<ApiClientError> for FetchError {
    fn from(err: ApiClientError) -> Self {
        FetchError::new(err.user_message())
    }
}

/// Client handle built once at startup and shared by every fetcher.
#[derive(Clone)]
pub struct ApiClient {
    rest: Arc<RestClient>,
    references: ReferenceLists,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiClientError> {
        let rest = Arc::new(RestClient::new(config)?);
        let references = ReferenceLists::new(Arc::clone(&rest));
        Ok(Self { rest, references })
    }

    pub fn rest(&self) -> &Arc<RestClient> {
        &self.rest
    }

    pub fn references(&self) -> &ReferenceLists {
        &self.references
    }
}

#[derive(Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
    auth_header: HeaderMap,
}

impl RestClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        let auth_header = build_auth_headers(&config.auth)?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim().trim_end_matches('/').to_string(),
            auth_header,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/<kind>` for any listable kind.
    ///
    /// A response without `totalCount` counts its own rows.
    pub async fn list<E: ListEntity>(
        &self,
        params: &FetchListParams<E::Filters>,
    ) -> Result<FetchListResult<E>, ApiClientError> {
        let path = format!("/api/{}", E::KIND.api_path());
        let (data, total_count) = self
            .request::<Vec<E>, _, ()>(Method::GET, &path, Some(&params.query_pairs()), None)
            .await?;
        let data = data.ok_or_else(|| {
            ApiClientError::InvalidResponse(format!("{} response has no data", path))
        })?;
        debug!(
            kind = %E::KIND,
            rows = data.len(),
            total_count,
            "list response decoded"
        );
        Ok(match total_count {
            Some(total) => FetchListResult::new(data, total),
            None => FetchListResult::from_data(data),
        })
    }

    pub async fn list_items(
        &self,
        params: &FetchListParams<ItemFilters>,
    ) -> Result<FetchListResult<ItemDisplay>, ApiClientError> {
        self.list::<ItemDisplay>(params).await
    }

    pub async fn list_places(
        &self,
        params: &FetchListParams<PlaceFilters>,
    ) -> Result<FetchListResult<PlaceDisplay>, ApiClientError> {
        self.list::<PlaceDisplay>(params).await
    }

    pub async fn list_containers(
        &self,
        params: &FetchListParams<ContainerFilters>,
    ) -> Result<FetchListResult<ContainerDisplay>, ApiClientError> {
        self.list::<ContainerDisplay>(params).await
    }

    pub async fn list_rooms(
        &self,
        params: &FetchListParams<RoomFilters>,
    ) -> Result<FetchListResult<RoomDisplay>, ApiClientError> {
        self.list::<RoomDisplay>(params).await
    }

    pub async fn list_buildings(
        &self,
        params: &FetchListParams<BuildingFilters>,
    ) -> Result<FetchListResult<BuildingDisplay>, ApiClientError> {
        self.list::<BuildingDisplay>(params).await
    }

    pub async fn list_furniture(
        &self,
        params: &FetchListParams<FurnitureFilters>,
    ) -> Result<FetchListResult<FurnitureDisplay>, ApiClientError> {
        self.list::<FurnitureDisplay>(params).await
    }

    /// `DELETE /api/entities/<table>/<id>`
    pub async fn soft_delete(&self, kind: EntityKind, id: EntityId) -> Result<bool, ApiClientError> {
        let path = format!("/api/entities/{}/{}", kind.table(), id);
        self.success(Method::DELETE, &path).await
    }

    /// `POST /api/entities/<table>/<id>`
    pub async fn restore(&self, kind: EntityKind, id: EntityId) -> Result<bool, ApiClientError> {
        let path = format!("/api/entities/{}/{}", kind.table(), id);
        self.success(Method::POST, &path).await
    }

    /// Signed-in user, or `None` when the session is anonymous.
    pub async fn current_user(&self) -> Result<Option<User>, ApiClientError> {
        let payload: AuthUserPayload = self.get_data("/api/auth/user", None::<&()>).await?;
        Ok(payload.user)
    }

    pub async fn create_transition(
        &self,
        transition: &TransitionRequest,
    ) -> Result<serde_json::Value, ApiClientError> {
        let (data, _) = self
            .request::<serde_json::Value, (), _>(
                Method::POST,
                "/api/transitions",
                None,
                Some(transition),
            )
            .await?;
        Ok(data.unwrap_or(serde_json::Value::Null))
    }

    pub async fn room_options(&self) -> Result<Vec<LookupOption>, ApiClientError> {
        self.get_data("/api/rooms", Some(&reference_query())).await
    }

    pub async fn building_options(&self) -> Result<Vec<LookupOption>, ApiClientError> {
        self.get_data("/api/buildings", Some(&reference_query()))
            .await
    }

    pub async fn entity_type_options(
        &self,
        kind: EntityKind,
    ) -> Result<Vec<LookupOption>, ApiClientError> {
        self.get_data(
            "/api/entity-types",
            Some(&[("entity_category", kind.as_str())]),
        )
        .await
    }

    async fn success(&self, method: Method, path: &str) -> Result<bool, ApiClientError> {
        let (data, _) = self
            .request::<SuccessPayload, (), ()>(method, path, None, None)
            .await?;
        Ok(data.is_some_and(|payload| payload.success))
    }

    async fn get_data<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, ApiClientError>
    where
        T: serde::de::DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let (data, _) = self.request::<T, Q, ()>(Method::GET, path, query, None).await?;
        data.ok_or_else(|| ApiClientError::InvalidResponse(format!("{} response has no data", path)))
    }

    async fn request<T, Q, B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
    ) -> Result<(Option<T>, Option<u64>), ApiClientError>
    where
        T: serde::de::DeserializeOwned,
        Q: serde::Serialize + ?Sized,
        B: serde::Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .client
            .request(method, url)
            .headers(self.auth_header.clone());
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        self.parse_response(response).await
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<(Option<T>, Option<u64>), ApiClientError> {
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            if let Ok(body) = serde_json::from_str::<ErrorBody>(&text) {
                return Err(ApiClientError::Api {
                    status: status.as_u16(),
                    message: body.error,
                });
            }
            return Err(ApiClientError::InvalidResponse(format!(
                "HTTP {}: {}",
                status.as_u16(),
                text
            )));
        }
        match serde_json::from_str::<ApiEnvelope<T>>(&text)? {
            ApiEnvelope::Error { error } => Err(ApiClientError::Api {
                status: status.as_u16(),
                message: error,
            }),
            ApiEnvelope::Data { data, total_count } => Ok((data, total_count)),
        }
    }
}

fn reference_query() -> [(&'static str, &'static str); 3] {
    [
        ("showDeleted", "false"),
        ("sortBy", "name"),
        ("sortDirection", "asc"),
    ]
}

fn build_auth_headers(auth: &AuthConfig) -> Result<HeaderMap, ApiClientError> {
    let mut headers = HeaderMap::new();
    if let Some(token) = auth.session_token.as_deref().filter(|t| !t.trim().is_empty()) {
        let value = format!("{}={}", SESSION_COOKIE, token.trim());
        headers.insert(
            HeaderName::from_static("cookie"),
            HeaderValue::from_str(&value).map_err(|e| ApiClientError::Config(e.to_string()))?,
        );
    }
    if let Some(token) = auth.bearer_token.as_deref().filter(|t| !t.trim().is_empty()) {
        let value = format!("Bearer {}", token.trim());
        headers.insert(
            HeaderName::from_static("authorization"),
            HeaderValue::from_str(&value).map_err(|e| ApiClientError::Config(e.to_string()))?,
        );
    }
    Ok(headers)
}
