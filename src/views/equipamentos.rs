use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::{
    Equipamento, EquipamentoPayload, EquipamentoProfissionais, MessageResponse, StatusFilter,
};
use crate::session::AccessLevel;

/// Any authenticated user may browse; managing facilities requires city-admin.
pub struct EquipamentosPage<'a> {
    api: &'a ApiClient,
}

impl<'a> EquipamentosPage<'a> {
    pub const MANAGE: AccessLevel = AccessLevel::AdminCidade;

    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub fn can_manage(&self) -> bool {
        self.api.session().has_permission(Self::MANAGE)
    }

    pub async fn list(&self) -> ClientResult<Vec<Equipamento>> {
        self.api.session().require(AccessLevel::Visualizacao)?;
        self.api.equipamentos().list().await
    }

    pub async fn profissionais(&self, id: i64, status: StatusFilter) -> ClientResult<EquipamentoProfissionais> {
        self.api.session().require(AccessLevel::Visualizacao)?;
        self.api.equipamentos().profissionais(id, status).await
    }

    pub async fn create(&self, payload: &EquipamentoPayload) -> ClientResult<Equipamento> {
        self.api.session().require(Self::MANAGE)?;
        self.api.equipamentos().create(payload).await
    }

    pub async fn update(&self, id: i64, payload: &EquipamentoPayload) -> ClientResult<Equipamento> {
        self.api.session().require(Self::MANAGE)?;
        self.api.equipamentos().update(id, payload).await
    }

    pub async fn deactivate(&self, id: i64) -> ClientResult<MessageResponse> {
        self.api.session().require(Self::MANAGE)?;
        self.api.equipamentos().delete(id).await
    }
}
