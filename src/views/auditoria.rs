use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::{AuditFilter, AuditStats, AuditoriaEntry, Usuario};
use crate::session::AccessLevel;

pub struct AuditoriaPage<'a> {
    api: &'a ApiClient,
}

impl<'a> AuditoriaPage<'a> {
    pub const REQUIRED: AccessLevel = AccessLevel::AdminCidade;

    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, filter: &AuditFilter) -> ClientResult<Vec<AuditoriaEntry>> {
        self.api.session().require(Self::REQUIRED)?;
        self.api.auditoria().list(filter).await
    }

    pub async fn stats(&self) -> ClientResult<AuditStats> {
        self.api.session().require(Self::REQUIRED)?;
        self.api.auditoria().stats().await
    }

    /// Entries together with the users needed to label them.
    pub async fn list_with_users(&self, filter: &AuditFilter) -> ClientResult<(Vec<AuditoriaEntry>, Vec<Usuario>)> {
        self.api.session().require(Self::REQUIRED)?;
        let auditoria = self.api.auditoria();
        let usuarios = self.api.usuarios();
        futures::try_join!(auditoria.list(filter), usuarios.list())
    }
}
