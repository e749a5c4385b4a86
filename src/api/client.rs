use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::config::AppConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionContext;

/// Credential failures on this path are bad logins, not expired sessions.
pub const LOGIN_PATH: &str = "/auth/login";

const SESSION_EXPIRED: &str = "Sessão expirada. Faça login novamente.";

/// Single point of egress to the backend.
///
/// Every request carries `Authorization: Bearer <token>` while a session is
/// held. Any 401 outside the login endpoint clears the credential store and
/// resets the session before the error is returned to the caller.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionContext,
    log_requests: bool,
}

impl ApiClient {
    pub fn new(config: &AppConfig, session: SessionContext) -> ClientResult<Self> {
        let base_url = config.api.base_url.trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_url).map_err(|e| {
            ClientError::validation(format!("URL da API inválida '{}': {}", base_url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::validation(format!(
                "URL da API deve usar http ou https: {}",
                base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            session,
            log_requests: config.api.enable_request_logging,
        })
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Dispatch one request and apply the response policy.
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> ClientResult<Response> {
        // Token read at dispatch time; compared on rejection to detect a newer login
        let token = self.session.token();

        let mut request = self
            .http
            .request(method.clone(), self.url(path))
            .header(ACCEPT, "application/json");
        if let Some(token) = &token {
            request = request.bearer_auth(token);
        }
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        if self.log_requests {
            tracing::debug!("{} {} (auth: {})", method, path, token.is_some());
        }

        let response = request.send().await.map_err(|e| {
            tracing::debug!("{} {} failed before a response: {}", method, path, e);
            ClientError::network(format!("Falha de comunicação com o servidor: {}", e))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = read_error_body(response).await;

        if status == StatusCode::UNAUTHORIZED && path != LOGIN_PATH {
            self.session.expire(token.as_deref());
            return Err(ClientError::auth_rejected(rejection_message(error_body.as_ref())));
        }

        tracing::debug!("{} {} -> {}", method, path, status);
        Err(ClientError::backend(status.as_u16(), error_body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let response = self.send(Method::GET, path, query, None).await?;
        Self::decode(response).await
    }

    pub(crate) async fn post_json<T: DeserializeOwned>(&self, path: &str, body: Value) -> ClientResult<T> {
        let response = self.send(Method::POST, path, &[], Some(body)).await?;
        Self::decode(response).await
    }

    pub(crate) async fn put_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<Value>,
    ) -> ClientResult<T> {
        let response = self.send(Method::PUT, path, &[], body).await?;
        Self::decode(response).await
    }

    pub(crate) async fn delete_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<Value>,
    ) -> ClientResult<T> {
        let response = self.send(Method::DELETE, path, &[], body).await?;
        Self::decode(response).await
    }

    /// Binary download (reports).
    pub(crate) async fn get_bytes(&self, path: &str, query: &[(&str, String)]) -> ClientResult<Vec<u8>> {
        let response = self.send(Method::GET, path, query, None).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

async fn read_error_body(response: Response) -> Option<Value> {
    let bytes = response.bytes().await.ok()?;
    if bytes.is_empty() {
        return None;
    }
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(value) => Some(value),
        Err(_) => Some(Value::String(String::from_utf8_lossy(&bytes).into_owned())),
    }
}

fn rejection_message(body: Option<&Value>) -> String {
    body.and_then(|b| b.get("error").or_else(|| b.get("msg")))
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(|m| format!("{} ({})", SESSION_EXPIRED, m))
        .unwrap_or_else(|| SESSION_EXPIRED.to_string())
}
