use super::ApiClient;
use crate::error::ClientResult;
use crate::models::{MessageResponse, Usuario, UsuarioPayload};

pub struct UsuariosApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UsuariosApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ClientResult<Vec<Usuario>> {
        self.client.get_json("/usuarios", &[]).await
    }

    pub async fn create(&self, payload: &UsuarioPayload) -> ClientResult<Usuario> {
        payload.validate(true)?;
        self.client.post_json("/usuarios", serde_json::to_value(payload)?).await
    }

    pub async fn update(&self, id: i64, payload: UsuarioPayload) -> ClientResult<Usuario> {
        let payload = payload.normalized();
        payload.validate(false)?;
        self.client
            .put_json(&format!("/usuarios/{}", id), Some(serde_json::to_value(&payload)?))
            .await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<MessageResponse> {
        self.client.delete_json(&format!("/usuarios/{}", id), None).await
    }
}
