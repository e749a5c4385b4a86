use super::ApiClient;
use crate::error::ClientResult;
use crate::models::{Cidade, CidadePayload, MessageResponse};

pub struct CidadesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CidadesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ClientResult<Vec<Cidade>> {
        self.client.get_json("/cidades", &[]).await
    }

    pub async fn create(&self, payload: &CidadePayload) -> ClientResult<Cidade> {
        payload.validate()?;
        self.client.post_json("/cidades", serde_json::to_value(payload)?).await
    }

    pub async fn update(&self, id: i64, payload: &CidadePayload) -> ClientResult<Cidade> {
        payload.validate()?;
        self.client
            .put_json(&format!("/cidades/{}", id), Some(serde_json::to_value(payload)?))
            .await
    }

    /// Soft delete: the backend marks the city inactive.
    pub async fn delete(&self, id: i64) -> ClientResult<MessageResponse> {
        self.client.delete_json(&format!("/cidades/{}", id), None).await
    }
}
