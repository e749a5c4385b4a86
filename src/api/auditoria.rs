use super::ApiClient;
use crate::error::ClientResult;
use crate::models::{AuditFilter, AuditStats, AuditoriaEntry};

pub struct AuditoriaApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuditoriaApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filter: &AuditFilter) -> ClientResult<Vec<AuditoriaEntry>> {
        self.client.get_json("/auditoria", &filter.to_query()).await
    }

    pub async fn stats(&self) -> ClientResult<AuditStats> {
        self.client.get_json("/auditoria/estatisticas", &[]).await
    }
}
