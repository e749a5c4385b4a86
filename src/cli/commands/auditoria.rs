use chrono::NaiveDate;
use clap::Subcommand;
use serde::Serialize;

use crate::cli::utils::{or_dash, output_collection};
use crate::cli::{CliContext, OutputFormat};
use crate::guard::Route;
use crate::models::{AuditAction, AuditFilter};
use crate::views::{name_index, AuditoriaPage};

#[derive(Subcommand)]
pub enum AuditoriaCommands {
    #[command(about = "List audit entries")]
    List {
        #[arg(long, help = "Table: profissionais, usuarios, cidades or equipamentos")]
        tabela: Option<String>,
        #[arg(long, help = "Action: CREATE, UPDATE, DELETE or EXPORT")]
        acao: Option<AuditAction>,
        #[arg(long, help = "User id")]
        usuario: Option<i64>,
        #[arg(long, help = "From date (YYYY-MM-DD)")]
        inicio: Option<NaiveDate>,
        #[arg(long, help = "To date (YYYY-MM-DD)")]
        fim: Option<NaiveDate>,
    },

    #[command(about = "Audit statistics")]
    Stats,
}

#[derive(Serialize)]
struct AuditRow {
    id: i64,
    data_hora: String,
    usuario: String,
    acao: String,
    tabela: String,
    registro_id: i64,
    ip_origem: String,
}

pub async fn handle(
    cmd: AuditoriaCommands,
    ctx: &mut CliContext,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    ctx.enter(Route::Auditoria)?;
    let page = AuditoriaPage::new(&ctx.api);

    match cmd {
        AuditoriaCommands::List { tabela, acao, usuario, inicio, fim } => {
            let filter = AuditFilter {
                tabela,
                acao,
                usuario_id: usuario,
                data_inicio: inicio,
                data_fim: fim,
            };
            let (entries, usuarios) = page.list_with_users(&filter).await?;
            let nomes = name_index(&usuarios, |u| (u.id, u.nome_completo.clone()));

            let rows: Vec<AuditRow> = entries
                .into_iter()
                .map(|e| AuditRow {
                    id: e.id,
                    data_hora: or_dash(e.data_hora.map(|d| d.format("%d/%m/%Y %H:%M:%S"))),
                    usuario: nomes.get(&e.usuario_id).cloned().unwrap_or_else(|| "N/A".to_string()),
                    acao: e
                        .acao
                        .parse::<AuditAction>()
                        .map(|a| a.label().to_string())
                        .unwrap_or(e.acao),
                    tabela: e.tabela,
                    registro_id: e.registro_id,
                    ip_origem: or_dash(e.ip_origem),
                })
                .collect();

            output_collection(&output_format, "auditoria", &rows, "Nenhum registro de auditoria", |r| {
                format!(
                    "{:>6}  {:<19} {:<25} {:<12} {:<14} {:>6}  {}",
                    r.id, r.data_hora, r.usuario, r.acao, r.tabela, r.registro_id, r.ip_origem
                )
            })
        }
        AuditoriaCommands::Stats => {
            let stats = page.stats().await?;
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
                OutputFormat::Text => {
                    println!("Por ação:");
                    for a in &stats.acoes {
                        println!("  {:<20} {}", a.acao, a.total);
                    }
                    println!("Por tabela:");
                    for t in &stats.tabelas {
                        println!("  {:<20} {}", t.tabela, t.total);
                    }
                    println!("Por usuário:");
                    for u in &stats.usuarios {
                        println!("  {:<20} {}", u.usuario, u.total);
                    }
                }
            }
            Ok(())
        }
    }
}
