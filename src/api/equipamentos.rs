use super::ApiClient;
use crate::error::ClientResult;
use crate::models::{
    Equipamento, EquipamentoPayload, EquipamentoProfissionais, MessageResponse, StatusFilter,
};

pub struct EquipamentosApi<'a> {
    client: &'a ApiClient,
}

impl<'a> EquipamentosApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ClientResult<Vec<Equipamento>> {
        self.client.get_json("/equipamentos", &[]).await
    }

    pub async fn create(&self, payload: &EquipamentoPayload) -> ClientResult<Equipamento> {
        payload.validate()?;
        self.client.post_json("/equipamentos", serde_json::to_value(payload)?).await
    }

    pub async fn update(&self, id: i64, payload: &EquipamentoPayload) -> ClientResult<Equipamento> {
        payload.validate()?;
        self.client
            .put_json(&format!("/equipamentos/{}", id), Some(serde_json::to_value(payload)?))
            .await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<MessageResponse> {
        self.client.delete_json(&format!("/equipamentos/{}", id), None).await
    }

    /// Professionals assigned to one facility, filtered by status (default ativo).
    pub async fn profissionais(&self, id: i64, status: StatusFilter) -> ClientResult<EquipamentoProfissionais> {
        self.client
            .get_json(
                &format!("/equipamentos/{}/profissionais", id),
                &[("status", status.as_str().to_string())],
            )
            .await
    }
}
