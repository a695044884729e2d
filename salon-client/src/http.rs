//! HTTP client for the salon REST API

use crate::{ClientConfig, ClientError, ClientResult, GENERIC_ERROR_MESSAGE};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::ErrorBody;

/// HTTP client for making requests to the backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        tracing::debug!(%method, %url, "API request");
        let mut request = self.client.request(method, &url);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        request
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.request(Method::GET, path).send().await?;
        Self::handle_response(response).await
    }

    /// Make a GET request with query parameters
    pub async fn get_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        let response = self.request(Method::GET, path).query(query).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        let response = self.request(Method::PUT, path).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a PATCH request with JSON body
    pub async fn patch<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        let response = self.request(Method::PATCH, path).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), body = %text, "API request failed");
            return Err(error_from_response(status, &text));
        }

        serde_json::from_str(&text).map_err(|e| {
            ClientError::InvalidResponse(format!("{} (status {})", e, status.as_u16()))
        })
    }
}

/// Map a non-2xx response to a [`ClientError`]
///
/// The body may carry `detail` (string, list of field errors or object),
/// `message`, and an optional numeric `code`; anything else falls back to
/// a generic message.
pub fn error_from_response(status: StatusCode, body: &str) -> ClientError {
    let body: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = body
        .server_message()
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());

    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::FORBIDDEN => ClientError::Forbidden(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY if body.code.is_none() => {
            ClientError::Validation(message)
        }
        _ => ClientError::Api(body.into_app_error(status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    #[test]
    fn test_url_joining() {
        let client = HttpClient::new(&ClientConfig::new("http://salon.local/api/")).unwrap();
        assert_eq!(client.url("/citas"), "http://salon.local/api/citas");
        assert_eq!(client.url("caja/actual"), "http://salon.local/api/caja/actual");
    }

    #[test]
    fn test_bearer_header() {
        let client = HttpClient::new(&ClientConfig::default())
            .unwrap()
            .with_token("t0k3n");
        assert_eq!(client.auth_header().as_deref(), Some("Bearer t0k3n"));
    }

    #[test]
    fn test_detail_string_becomes_validation_message() {
        let err = error_from_response(
            StatusCode::BAD_REQUEST,
            r#"{"detail":"El horario no está disponible"}"#,
        );
        assert_eq!(err.user_message(), "El horario no está disponible");
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[test]
    fn test_field_error_list_uses_first_msg() {
        let err = error_from_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail":[{"loc":["body","monto"],"msg":"debe ser positivo"}]}"#,
        );
        assert_eq!(err.user_message(), "debe ser positivo");
    }

    #[test]
    fn test_message_field_fallback() {
        let err = error_from_response(StatusCode::FORBIDDEN, r#"{"message":"Sin permiso"}"#);
        assert!(matches!(err, ClientError::Forbidden(ref m) if m == "Sin permiso"));
    }

    #[test]
    fn test_unparseable_body_gets_generic_message() {
        let err = error_from_response(StatusCode::NOT_FOUND, "<html>nope</html>");
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_coded_error_keeps_code() {
        let err = error_from_response(
            StatusCode::CONFLICT,
            r#"{"code":5003,"message":"Ya hay una caja abierta"}"#,
        );
        match err {
            ClientError::Api(app) => {
                assert_eq!(app.code, ErrorCode::CajaAlreadyOpen);
                assert_eq!(app.message, "Ya hay una caja abierta");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_server_error_without_body() {
        let err = error_from_response(StatusCode::INTERNAL_SERVER_ERROR, "");
        match err {
            ClientError::Api(app) => assert_eq!(app.code, ErrorCode::InternalError),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unauthorized() {
        assert!(matches!(
            error_from_response(StatusCode::UNAUTHORIZED, "{}"),
            ClientError::Unauthorized
        ));
    }
}
