//! reqwest-backed gateway.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::api::envelope::{ApiOperation, ApiResponse};
use crate::api::errors::ApiError;
use crate::api::{FavoriteState, ListQuery, RecipeGateway};
use crate::config::ClientConfig;
use crate::errors::MixoError;
use crate::generation::GenerationMode;
use crate::recipes::{Recipe, RecipeId};

/// Header carrying the CSRF token.
pub const CSRF_HEADER: &str = "X-CSRFToken";

#[derive(Debug, Serialize)]
struct CreateRecipeBody<'a> {
    user_request: &'a str,
}

/// Gateway talking JSON over HTTP to the recipe service.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    config: ClientConfig,
    client: reqwest::Client,
}

impl HttpGateway {
    /// Build a gateway from explicit configuration.
    ///
    /// Default headers and the CSRF token are attached to every request.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured header name or value is invalid or
    /// the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let headers = build_default_headers(&config)?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("mixo/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::ClientBuild {
                message: e.to_string(),
            })?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.config.url(path))
    }

    /// Send a request and decode a JSON body on success.
    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: ApiOperation,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.send_checked(request).await?;
        let body = response.bytes().await.map_err(ApiError::from_reqwest)?;
        serde_json::from_slice(&body).map_err(|e| {
            debug!(
                event = "core.api.decode_failed",
                operation = %operation,
                body_len = body.len()
            );
            ApiError::Decode {
                message: e.to_string(),
            }
        })
    }

    /// Send a request whose response body is irrelevant.
    async fn send_empty(&self, request: RequestBuilder) -> Result<(), ApiError> {
        self.send_checked(request).await.map(|_| ())
    }

    async fn send_checked(&self, request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await.map_err(ApiError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    /// Run one call, log it, and fold the outcome into an envelope.
    async fn execute<T, F>(
        &self,
        operation: ApiOperation,
        method: &Method,
        path: &str,
        call: F,
    ) -> ApiResponse<T>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        let started = Instant::now();
        info!(
            event = "core.api.request_started",
            operation = %operation,
            method = %method,
            path = path
        );

        match call.await {
            Ok(data) => {
                info!(
                    event = "core.api.request_completed",
                    operation = %operation,
                    path = path,
                    elapsed_ms = started.elapsed().as_millis() as u64
                );
                ApiResponse::ok(data)
            }
            Err(e) => {
                warn!(
                    event = "core.api.request_failed",
                    operation = %operation,
                    path = path,
                    error_code = e.error_code(),
                    error = %e,
                    elapsed_ms = started.elapsed().as_millis() as u64
                );
                ApiResponse::failure(e.user_message(operation))
            }
        }
    }
}

fn build_default_headers(config: &ClientConfig) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let token = config
        .csrf_token
        .as_ref()
        .map(|token| (CSRF_HEADER, token));
    let configured = config
        .default_headers
        .iter()
        .map(|(name, value)| (name.as_str(), value));

    for (name, value) in configured.chain(token) {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| ApiError::InvalidHeader {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| ApiError::InvalidHeader {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}

#[async_trait]
impl RecipeGateway for HttpGateway {
    async fn create_recipe(
        &self,
        request_text: &str,
        mode: GenerationMode,
    ) -> ApiResponse<Recipe> {
        let path = mode.path();
        let body = CreateRecipeBody {
            user_request: request_text,
        };
        let request = self.request(Method::POST, path).json(&body);
        self.execute(
            ApiOperation::CreateRecipe,
            &Method::POST,
            path,
            self.send_json(ApiOperation::CreateRecipe, request),
        )
        .await
    }

    async fn list_recipes(&self, query: &ListQuery) -> ApiResponse<Vec<Recipe>> {
        let path = "/api/cocktails/";
        let request = self.request(Method::GET, path).query(query);
        self.execute(
            ApiOperation::ListRecipes,
            &Method::GET,
            path,
            self.send_json(ApiOperation::ListRecipes, request),
        )
        .await
    }

    async fn get_recipe(&self, id: RecipeId) -> ApiResponse<Recipe> {
        let path = format!("/cocktail/{}/", id);
        let request = self.request(Method::GET, &path);
        self.execute(
            ApiOperation::GetRecipe,
            &Method::GET,
            &path,
            self.send_json(ApiOperation::GetRecipe, request),
        )
        .await
    }

    async fn set_favorite(&self, id: RecipeId) -> ApiResponse<FavoriteState> {
        let path = format!("/api/cocktail/{}/favorite/", id);
        let request = self.request(Method::POST, &path);
        self.execute(
            ApiOperation::SetFavorite,
            &Method::POST,
            &path,
            self.send_json(ApiOperation::SetFavorite, request),
        )
        .await
    }

    async fn delete_recipe(&self, id: RecipeId) -> ApiResponse<()> {
        let path = format!("/api/cocktail/{}/delete/", id);
        let request = self.request(Method::DELETE, &path);
        self.execute(
            ApiOperation::DeleteRecipe,
            &Method::DELETE,
            &path,
            self.send_empty(request),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_headers_include_csrf_and_content_type() {
        let mut config = ClientConfig::new("http://localhost:8000");
        config.csrf_token = Some("abc123".to_string());
        config
            .default_headers
            .insert("Accept-Language".to_string(), "fr-FR".to_string());

        let headers = build_default_headers(&config).unwrap();

        assert_eq!(headers.get(CSRF_HEADER).unwrap(), "abc123");
        assert_eq!(headers.get("accept-language").unwrap(), "fr-FR");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_invalid_header_name_is_rejected() {
        let mut config = ClientConfig::new("http://localhost:8000");
        config
            .default_headers
            .insert("bad header".to_string(), "x".to_string());

        let result = HttpGateway::new(config);
        assert!(matches!(result, Err(ApiError::InvalidHeader { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_server_yields_connection_failure() {
        // Port 9 (discard) on localhost is not expected to accept HTTP
        let gateway = HttpGateway::new(ClientConfig::new("http://127.0.0.1:9")).unwrap();

        let response = gateway.delete_recipe(7).await;

        assert!(!response.success);
        assert_eq!(
            response.error.as_deref(),
            Some("Connection error: unable to reach the server")
        );
    }
}
