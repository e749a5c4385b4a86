use serde::Serialize;

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::{ProfissionalFilter, StatusFilter};
use crate::session::AccessLevel;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_profissionais: usize,
    pub profissionais_ativos: usize,
    pub profissionais_inativos: usize,
    pub total_equipamentos: usize,
    pub total_cidades: usize,
}

pub struct DashboardPage<'a> {
    api: &'a ApiClient,
}

impl<'a> DashboardPage<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Counts from five concurrent listings.
    pub async fn load(&self) -> ClientResult<DashboardStats> {
        self.api.session().require(AccessLevel::Visualizacao)?;

        let profissionais = self.api.profissionais();
        let todos = ProfissionalFilter::with_status(StatusFilter::Todos);
        let ativos = ProfissionalFilter::with_status(StatusFilter::Ativo);
        let inativos = ProfissionalFilter::with_status(StatusFilter::Inativo);
        let equipamentos = self.api.equipamentos();
        let cidades = self.api.cidades();

        let (todos, ativos, inativos, equipamentos, cidades) = futures::try_join!(
            profissionais.list(&todos),
            profissionais.list(&ativos),
            profissionais.list(&inativos),
            equipamentos.list(),
            cidades.list(),
        )?;

        Ok(DashboardStats {
            total_profissionais: todos.len(),
            profissionais_ativos: ativos.len(),
            profissionais_inativos: inativos.len(),
            total_equipamentos: equipamentos.len(),
            total_cidades: cidades.len(),
        })
    }
}
