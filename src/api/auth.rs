use serde::{Deserialize, Serialize};
use serde_json::json;

use super::client::LOGIN_PATH;
use super::ApiClient;
use crate::error::ClientResult;
use crate::models::{Usuario, UsuarioPayload};
use crate::session::SessionUser;

/// Body of a successful `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub usuario: SessionUser,
}

pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Raw credential exchange. Use `SessionContext::login` to establish a session.
    pub async fn login(&self, email: &str, senha: &str) -> ClientResult<LoginResponse> {
        self.client
            .post_json(LOGIN_PATH, json!({ "email": email, "senha": senha }))
            .await
    }

    pub async fn me(&self) -> ClientResult<Usuario> {
        self.client.get_json("/auth/me", &[]).await
    }

    pub async fn register(&self, payload: &UsuarioPayload) -> ClientResult<Usuario> {
        payload.validate(true)?;
        self.client
            .post_json("/auth/register", serde_json::to_value(payload)?)
            .await
    }
}
