use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::push_param;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditoriaEntry {
    pub id: i64,
    pub usuario_id: i64,
    pub acao: String,
    pub tabela: String,
    pub registro_id: i64,
    #[serde(default)]
    pub dados_antigos: Option<Value>,
    #[serde(default)]
    pub dados_novos: Option<Value>,
    #[serde(default)]
    pub data_hora: Option<NaiveDateTime>,
    #[serde(default)]
    pub ip_origem: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Export,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditAction::Create => "CREATE",
            AuditAction::Update => "UPDATE",
            AuditAction::Delete => "DELETE",
            AuditAction::Export => "EXPORT",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AuditAction::Create => "Criação",
            AuditAction::Update => "Atualização",
            AuditAction::Delete => "Exclusão",
            AuditAction::Export => "Exportação",
        }
    }
}

impl std::str::FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CREATE" => Ok(AuditAction::Create),
            "UPDATE" => Ok(AuditAction::Update),
            "DELETE" => Ok(AuditAction::Delete),
            "EXPORT" => Ok(AuditAction::Export),
            other => Err(format!("ação inválida: {}", other)),
        }
    }
}

/// Query filters for `GET /auditoria`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditFilter {
    pub tabela: Option<String>,
    pub acao: Option<AuditAction>,
    pub usuario_id: Option<i64>,
    pub data_inicio: Option<NaiveDate>,
    pub data_fim: Option<NaiveDate>,
}

impl AuditFilter {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_param(&mut params, "tabela", self.tabela.clone());
        push_param(&mut params, "acao", self.acao.map(|a| a.as_str().to_string()));
        push_param(&mut params, "usuario_id", self.usuario_id.map(|v| v.to_string()));
        push_param(&mut params, "data_inicio", self.data_inicio.map(|d| d.format("%Y-%m-%d").to_string()));
        push_param(&mut params, "data_fim", self.data_fim.map(|d| d.format("%Y-%m-%d").to_string()));
        params
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionCount {
    pub acao: String,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCount {
    pub tabela: String,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCount {
    pub usuario: String,
    pub total: i64,
}

/// Response of `GET /auditoria/estatisticas`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditStats {
    #[serde(default)]
    pub acoes: Vec<ActionCount>,
    #[serde(default)]
    pub tabelas: Vec<TableCount>,
    #[serde(default)]
    pub usuarios: Vec<UserCount>,
}
