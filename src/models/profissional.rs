use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{is_blank, push_param};
use crate::error::{ClientError, ClientResult};

/// A professional assigned to an equipamento.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profissional {
    pub id: i64,
    pub equipamento_id: i64,
    pub nome_completo: String,
    #[serde(default)]
    pub data_nascimento: Option<NaiveDate>,
    pub cpf: String,
    #[serde(default)]
    pub rg: String,
    #[serde(default)]
    pub data_expedicao_rg: Option<NaiveDate>,
    #[serde(default)]
    pub escolaridade: String,
    #[serde(default)]
    pub profissao: String,
    #[serde(default)]
    pub cargo: String,
    #[serde(default)]
    pub vinculo_institucional: String,
    #[serde(default)]
    pub telefone: String,
    pub email: String,
    #[serde(default)]
    pub data_inicio_trabalho: Option<NaiveDate>,
    #[serde(default)]
    pub endereco_residencial: String,
    pub cidade_id: i64,
    #[serde(default)]
    pub data_cadastro: Option<NaiveDateTime>,
    #[serde(default = "default_true")]
    pub ativo: bool,
    #[serde(default)]
    pub motivo_inativacao: Option<String>,
    #[serde(default)]
    pub data_inativacao: Option<NaiveDateTime>,
}

fn default_true() -> bool {
    true
}

impl Profissional {
    /// Free-text search: name and e-mail case-insensitively, CPF verbatim.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return true;
        }
        let lowered = term.to_lowercase();
        self.nome_completo.to_lowercase().contains(&lowered)
            || self.cpf.contains(term)
            || self.email.to_lowercase().contains(&lowered)
    }
}

/// Create/update body for `/profissionais`. Dates travel as `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfissionalPayload {
    pub nome_completo: String,
    pub data_nascimento: Option<NaiveDate>,
    pub cpf: String,
    pub rg: String,
    pub data_expedicao_rg: Option<NaiveDate>,
    pub escolaridade: String,
    pub profissao: String,
    pub cargo: String,
    pub vinculo_institucional: String,
    pub telefone: String,
    pub email: String,
    pub data_inicio_trabalho: Option<NaiveDate>,
    pub endereco_residencial: String,
    pub cidade_id: Option<i64>,
    pub equipamento_id: Option<i64>,
}

impl ProfissionalPayload {
    pub fn validate(&self) -> ClientResult<()> {
        let text_fields = [
            ("nome_completo", &self.nome_completo),
            ("cpf", &self.cpf),
            ("rg", &self.rg),
            ("escolaridade", &self.escolaridade),
            ("profissao", &self.profissao),
            ("cargo", &self.cargo),
            ("vinculo_institucional", &self.vinculo_institucional),
            ("telefone", &self.telefone),
            ("email", &self.email),
            ("endereco_residencial", &self.endereco_residencial),
        ];

        let mut missing: Vec<&str> = text_fields
            .iter()
            .filter(|(_, value)| is_blank(value))
            .map(|(name, _)| *name)
            .collect();

        if self.data_nascimento.is_none() {
            missing.push("data_nascimento");
        }
        if self.data_expedicao_rg.is_none() {
            missing.push("data_expedicao_rg");
        }
        if self.data_inicio_trabalho.is_none() {
            missing.push("data_inicio_trabalho");
        }
        if self.cidade_id.is_none() {
            missing.push("cidade_id");
        }
        if self.equipamento_id.is_none() {
            missing.push("equipamento_id");
        }

        if !missing.is_empty() {
            return Err(ClientError::missing_fields(&missing));
        }
        Ok(())
    }
}

impl From<&Profissional> for ProfissionalPayload {
    fn from(p: &Profissional) -> Self {
        Self {
            nome_completo: p.nome_completo.clone(),
            data_nascimento: p.data_nascimento,
            cpf: p.cpf.clone(),
            rg: p.rg.clone(),
            data_expedicao_rg: p.data_expedicao_rg,
            escolaridade: p.escolaridade.clone(),
            profissao: p.profissao.clone(),
            cargo: p.cargo.clone(),
            vinculo_institucional: p.vinculo_institucional.clone(),
            telefone: p.telefone.clone(),
            email: p.email.clone(),
            data_inicio_trabalho: p.data_inicio_trabalho,
            endereco_residencial: p.endereco_residencial.clone(),
            cidade_id: Some(p.cidade_id),
            equipamento_id: Some(p.equipamento_id),
        }
    }
}

/// Which professionals a listing should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    Ativo,
    Inativo,
    // The backend defaults a missing status to "ativo", so "all" is sent explicitly
    Todos,
}

impl StatusFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::Ativo => "ativo",
            StatusFilter::Inativo => "inativo",
            StatusFilter::Todos => "todos",
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ativo" | "ativos" => Ok(StatusFilter::Ativo),
            "inativo" | "inativos" => Ok(StatusFilter::Inativo),
            "todos" | "" => Ok(StatusFilter::Todos),
            other => Err(format!("status inválido: {} (use ativo, inativo ou todos)", other)),
        }
    }
}

/// Server-side filters for `GET /profissionais` and the report endpoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfissionalFilter {
    pub status: StatusFilter,
    pub cidade_id: Option<i64>,
    pub equipamento_id: Option<i64>,
    pub profissao: Option<String>,
    pub cargo: Option<String>,
}

impl ProfissionalFilter {
    pub fn with_status(status: StatusFilter) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// Query pairs with empty values left out.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("status", self.status.as_str().to_string())];
        push_param(&mut params, "cidade_id", self.cidade_id.map(|v| v.to_string()));
        push_param(&mut params, "equipamento_id", self.equipamento_id.map(|v| v.to_string()));
        push_param(&mut params, "profissao", self.profissao.clone());
        push_param(&mut params, "cargo", self.cargo.clone());
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Profissional {
        serde_json::from_value(serde_json::json!({
            "id": 10,
            "equipamento_id": 3,
            "nome_completo": "Ana Paula Ribeiro",
            "data_nascimento": "1988-05-17",
            "cpf": "123.456.789-00",
            "rg": "MG-12.345.678",
            "data_expedicao_rg": "2006-01-10",
            "escolaridade": "Superior completo",
            "profissao": "Assistente Social",
            "cargo": "Técnica de referência",
            "vinculo_institucional": "Efetivo",
            "telefone": "(31) 99999-0000",
            "email": "Ana.Ribeiro@cidade.gov.br",
            "data_inicio_trabalho": "2015-02-01",
            "endereco_residencial": "Rua A, 100",
            "cidade_id": 2,
            "data_cadastro": "2024-01-02T08:00:00",
            "ativo": true,
            "motivo_inativacao": null,
            "data_inativacao": null
        }))
        .unwrap()
    }

    #[test]
    fn search_matches_name_cpf_and_email() {
        let p = sample();
        assert!(p.matches("ana paula"));
        assert!(p.matches("456.789"));
        assert!(p.matches("ana.ribeiro@"));
        assert!(p.matches("  "));
        assert!(!p.matches("carlos"));
    }

    #[test]
    fn filter_query_omits_empty_values() {
        let filter = ProfissionalFilter {
            status: StatusFilter::Todos,
            cidade_id: Some(2),
            equipamento_id: None,
            profissao: Some("  ".to_string()),
            cargo: Some("Coordenador".to_string()),
        };
        assert_eq!(
            filter.to_query(),
            vec![
                ("status", "todos".to_string()),
                ("cidade_id", "2".to_string()),
                ("cargo", "Coordenador".to_string()),
            ]
        );
    }

    #[test]
    fn payload_from_record_passes_validation() {
        let payload = ProfissionalPayload::from(&sample());
        assert!(payload.validate().is_ok());
        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(body["data_nascimento"], "1988-05-17");
    }

    #[test]
    fn empty_payload_reports_every_required_field() {
        let err = ProfissionalPayload::default().validate().unwrap_err();
        let body = err.to_json();
        let fields = body["field_errors"].as_object().unwrap();
        assert_eq!(fields.len(), 15);
        assert!(fields.contains_key("equipamento_id"));
    }
}
