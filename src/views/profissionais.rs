use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;

use super::name_index;
use crate::api::relatorios::ReportFormat;
use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::{
    Cidade, Equipamento, MessageResponse, Profissional, ProfissionalFilter, ProfissionalPayload,
};
use crate::session::AccessLevel;

const UNKNOWN: &str = "N/A";

/// Filtered listing plus the lookups needed to label it.
#[derive(Debug, Clone, Serialize)]
pub struct ProfissionaisListing {
    pub profissionais: Vec<Profissional>,
    pub cidades: Vec<Cidade>,
    pub equipamentos: Vec<Equipamento>,
    #[serde(skip)]
    cidade_nomes: HashMap<i64, String>,
    #[serde(skip)]
    equipamento_nomes: HashMap<i64, String>,
}

impl ProfissionaisListing {
    pub fn new(profissionais: Vec<Profissional>, cidades: Vec<Cidade>, equipamentos: Vec<Equipamento>) -> Self {
        let cidade_nomes = name_index(&cidades, |c| (c.id, c.nome.clone()));
        let equipamento_nomes = name_index(&equipamentos, |e| (e.id, e.nome.clone()));
        Self {
            profissionais,
            cidades,
            equipamentos,
            cidade_nomes,
            equipamento_nomes,
        }
    }

    pub fn cidade_nome(&self, id: i64) -> &str {
        self.cidade_nomes.get(&id).map(String::as_str).unwrap_or(UNKNOWN)
    }

    pub fn equipamento_nome(&self, id: i64) -> &str {
        self.equipamento_nomes.get(&id).map(String::as_str).unwrap_or(UNKNOWN)
    }

    /// Client-side free-text narrowing on top of the server-side filters.
    pub fn search(mut self, term: &str) -> Self {
        self.profissionais.retain(|p| p.matches(term));
        self
    }
}

/// Browsing needs any level; editing, (de)activation and exports need editor.
pub struct ProfissionaisPage<'a> {
    api: &'a ApiClient,
}

impl<'a> ProfissionaisPage<'a> {
    pub const EDIT: AccessLevel = AccessLevel::Editor;

    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub fn can_edit(&self) -> bool {
        self.api.session().has_permission(Self::EDIT)
    }

    pub async fn list(&self, filter: &ProfissionalFilter, search: Option<&str>) -> ClientResult<ProfissionaisListing> {
        self.api.session().require(AccessLevel::Visualizacao)?;

        let profissionais = self.api.profissionais();
        let cidades = self.api.cidades();
        let equipamentos = self.api.equipamentos();
        let (profissionais, cidades, equipamentos) =
            futures::try_join!(profissionais.list(filter), cidades.list(), equipamentos.list())?;

        let listing = ProfissionaisListing::new(profissionais, cidades, equipamentos);
        Ok(match search {
            Some(term) => listing.search(term),
            None => listing,
        })
    }

    pub async fn get(&self, id: i64) -> ClientResult<Profissional> {
        self.api.session().require(AccessLevel::Visualizacao)?;
        self.api.profissionais().get(id).await
    }

    pub async fn create(&self, payload: &ProfissionalPayload) -> ClientResult<Profissional> {
        self.api.session().require(Self::EDIT)?;
        self.api.profissionais().create(payload).await
    }

    pub async fn update(&self, id: i64, payload: &ProfissionalPayload) -> ClientResult<Profissional> {
        self.api.session().require(Self::EDIT)?;
        self.api.profissionais().update(id, payload).await
    }

    pub async fn deactivate(&self, id: i64, motivo: &str) -> ClientResult<MessageResponse> {
        self.api.session().require(Self::EDIT)?;
        self.api.profissionais().deactivate(id, motivo).await
    }

    pub async fn reactivate(&self, id: i64) -> ClientResult<MessageResponse> {
        self.api.session().require(Self::EDIT)?;
        self.api.profissionais().reactivate(id).await
    }

    /// Aggregated report statistics as the backend computes them.
    pub async fn stats(&self) -> ClientResult<serde_json::Value> {
        self.api.session().require(AccessLevel::Visualizacao)?;
        self.api.relatorios().stats().await
    }

    /// Download a report and write it as `relatorio_profissionais_<date>.<ext>` under `dir`.
    pub async fn export(&self, format: ReportFormat, filter: &ProfissionalFilter, dir: &Path) -> ClientResult<PathBuf> {
        self.api.session().require(Self::EDIT)?;
        let bytes = self.api.relatorios().profissionais(format, filter).await?;

        let file_name = report_file_name(format, Utc::now().date_naive());
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(file_name);
        tokio::fs::write(&path, &bytes).await?;

        tracing::info!("report written to {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }
}

pub(crate) fn report_file_name(format: ReportFormat, date: chrono::NaiveDate) -> String {
    format!("relatorio_profissionais_{}.{}", date.format("%Y-%m-%d"), format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn report_names_carry_date_and_extension() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 9).unwrap();
        assert_eq!(report_file_name(ReportFormat::Pdf, date), "relatorio_profissionais_2024-07-09.pdf");
        assert_eq!(report_file_name(ReportFormat::Excel, date), "relatorio_profissionais_2024-07-09.xlsx");
    }

    #[test]
    fn listing_labels_unknown_ids() {
        let cidades = vec![Cidade {
            id: 1,
            nome: "Belo Horizonte".to_string(),
            status: Default::default(),
            data_cadastro: None,
        }];
        let listing = ProfissionaisListing::new(Vec::new(), cidades, Vec::new());
        assert_eq!(listing.cidade_nome(1), "Belo Horizonte");
        assert_eq!(listing.cidade_nome(99), "N/A");
        assert_eq!(listing.equipamento_nome(1), "N/A");
    }
}
