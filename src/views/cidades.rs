use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::{Cidade, CidadePayload, MessageResponse};
use crate::session::AccessLevel;

/// City management; every action requires city-admin.
pub struct CidadesPage<'a> {
    api: &'a ApiClient,
}

impl<'a> CidadesPage<'a> {
    pub const REQUIRED: AccessLevel = AccessLevel::AdminCidade;

    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> ClientResult<Vec<Cidade>> {
        self.api.session().require(Self::REQUIRED)?;
        self.api.cidades().list().await
    }

    pub async fn create(&self, payload: &CidadePayload) -> ClientResult<Cidade> {
        self.api.session().require(Self::REQUIRED)?;
        self.api.cidades().create(payload).await
    }

    pub async fn update(&self, id: i64, payload: &CidadePayload) -> ClientResult<Cidade> {
        self.api.session().require(Self::REQUIRED)?;
        self.api.cidades().update(id, payload).await
    }

    pub async fn deactivate(&self, id: i64) -> ClientResult<MessageResponse> {
        self.api.session().require(Self::REQUIRED)?;
        self.api.cidades().delete(id).await
    }
}
