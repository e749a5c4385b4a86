use serde_json::json;

use super::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::models::{MessageResponse, Profissional, ProfissionalFilter, ProfissionalPayload};

pub struct ProfissionaisApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ProfissionaisApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filter: &ProfissionalFilter) -> ClientResult<Vec<Profissional>> {
        self.client.get_json("/profissionais", &filter.to_query()).await
    }

    pub async fn get(&self, id: i64) -> ClientResult<Profissional> {
        self.client.get_json(&format!("/profissionais/{}", id), &[]).await
    }

    pub async fn create(&self, payload: &ProfissionalPayload) -> ClientResult<Profissional> {
        payload.validate()?;
        self.client.post_json("/profissionais", serde_json::to_value(payload)?).await
    }

    pub async fn update(&self, id: i64, payload: &ProfissionalPayload) -> ClientResult<Profissional> {
        payload.validate()?;
        self.client
            .put_json(&format!("/profissionais/{}", id), Some(serde_json::to_value(payload)?))
            .await
    }

    /// Soft-deactivate with a mandatory reason.
    pub async fn deactivate(&self, id: i64, motivo: &str) -> ClientResult<MessageResponse> {
        if motivo.trim().is_empty() {
            return Err(ClientError::validation("Motivo da inativação é obrigatório"));
        }
        self.client
            .delete_json(
                &format!("/profissionais/{}", id),
                Some(json!({ "motivo_inativacao": motivo.trim() })),
            )
            .await
    }

    pub async fn reactivate(&self, id: i64) -> ClientResult<MessageResponse> {
        self.client
            .put_json(&format!("/profissionais/{}/reativar", id), None)
            .await
    }
}
