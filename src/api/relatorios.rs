use serde_json::Value;

use super::ApiClient;
use crate::error::ClientResult;
use crate::models::ProfissionalFilter;

/// Report formats rendered by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Pdf,
    Excel,
}

impl ReportFormat {
    pub fn path(self) -> &'static str {
        match self {
            ReportFormat::Pdf => "/relatorios/profissionais/pdf",
            ReportFormat::Excel => "/relatorios/profissionais/excel",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Excel => "xlsx",
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Ok(ReportFormat::Pdf),
            "excel" | "xlsx" => Ok(ReportFormat::Excel),
            other => Err(format!("formato inválido: {} (use pdf ou excel)", other)),
        }
    }
}

pub struct RelatoriosApi<'a> {
    client: &'a ApiClient,
}

impl<'a> RelatoriosApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn profissionais(&self, format: ReportFormat, filter: &ProfissionalFilter) -> ClientResult<Vec<u8>> {
        self.client.get_bytes(format.path(), &filter.to_query()).await
    }

    /// Aggregated statistics, passed through untouched.
    pub async fn stats(&self) -> ClientResult<Value> {
        self.client.get_json("/relatorios/estatisticas", &[]).await
    }
}
