use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde_json::{json, Value};

use crate::api::relatorios::ReportFormat;
use crate::cli::utils::{or_dash, output_collection, output_record, output_success, prompt, read_json_stdin};
use crate::cli::{CliContext, OutputFormat};
use crate::guard::Route;
use crate::models::{ProfissionalFilter, ProfissionalPayload, StatusFilter};
use crate::views::ProfissionaisPage;

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(long, default_value = "ativo", help = "ativo, inativo or todos")]
    pub status: StatusFilter,
    #[arg(long, help = "City id")]
    pub cidade: Option<i64>,
    #[arg(long, help = "Equipamento id")]
    pub equipamento: Option<i64>,
    #[arg(long, help = "Profession")]
    pub profissao: Option<String>,
    #[arg(long, help = "Job title")]
    pub cargo: Option<String>,
}

impl From<FilterArgs> for ProfissionalFilter {
    fn from(args: FilterArgs) -> Self {
        ProfissionalFilter {
            status: args.status,
            cidade_id: args.cidade,
            equipamento_id: args.equipamento,
            profissao: args.profissao,
            cargo: args.cargo,
        }
    }
}

#[derive(Subcommand)]
pub enum ProfissionaisCommands {
    #[command(about = "List professionals")]
    List {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long, help = "Search name, CPF or e-mail")]
        busca: Option<String>,
    },

    #[command(about = "Show one professional")]
    Show {
        #[arg(help = "Professional id")]
        id: i64,
    },

    #[command(about = "Create professional from stdin (JSON)")]
    Create,

    #[command(about = "Update professional; stdin JSON fields override the stored ones")]
    Update {
        #[arg(help = "Professional id")]
        id: i64,
    },

    #[command(about = "Deactivate professional")]
    Inativar {
        #[arg(help = "Professional id")]
        id: i64,
        #[arg(long, help = "Reason (will prompt if not provided)")]
        motivo: Option<String>,
    },

    #[command(about = "Reactivate professional")]
    Reativar {
        #[arg(help = "Professional id")]
        id: i64,
    },

    #[command(about = "Export report as PDF or Excel")]
    Exportar {
        #[arg(long, default_value = "pdf", help = "pdf or excel")]
        formato: ReportFormat,
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long, help = "Output directory (defaults to the configured report dir)")]
        dir: Option<PathBuf>,
    },

    #[command(about = "Report statistics")]
    Estatisticas,
}

pub async fn handle(
    cmd: ProfissionaisCommands,
    ctx: &mut CliContext,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        ProfissionaisCommands::List { filter, busca } => {
            ctx.enter(Route::Profissionais)?;
            let page = ProfissionaisPage::new(&ctx.api);
            let listing = page.list(&filter.into(), busca.as_deref()).await?;

            output_collection(
                &output_format,
                "profissionais",
                &listing.profissionais,
                "Nenhum profissional encontrado",
                |p| {
                    format!(
                        "{:>5}  {:<32} {:<15} {:<20} {:<20} {}",
                        p.id,
                        p.nome_completo,
                        p.cpf,
                        listing.cidade_nome(p.cidade_id),
                        listing.equipamento_nome(p.equipamento_id),
                        if p.ativo { "ativo" } else { "inativo" }
                    )
                },
            )
        }
        ProfissionaisCommands::Show { id } => {
            ctx.enter(Route::Profissionais)?;
            let p = ProfissionaisPage::new(&ctx.api).get(id).await?;
            output_record(
                &output_format,
                &p,
                &[
                    ("ID", p.id.to_string()),
                    ("Nome", p.nome_completo.clone()),
                    ("CPF", p.cpf.clone()),
                    ("RG", p.rg.clone()),
                    ("Nascimento", or_dash(p.data_nascimento)),
                    ("Profissão", p.profissao.clone()),
                    ("Cargo", p.cargo.clone()),
                    ("Vínculo", p.vinculo_institucional.clone()),
                    ("Telefone", p.telefone.clone()),
                    ("E-mail", p.email.clone()),
                    ("Início", or_dash(p.data_inicio_trabalho)),
                    ("Cidade", p.cidade_id.to_string()),
                    ("Equipamento", p.equipamento_id.to_string()),
                    ("Status", if p.ativo { "ativo" } else { "inativo" }.to_string()),
                    ("Motivo", or_dash(p.motivo_inativacao.clone())),
                ],
            )
        }
        ProfissionaisCommands::Create => {
            ctx.enter(Route::ProfissionalNovo)?;
            let payload: ProfissionalPayload = read_json_stdin()?;
            let created = ProfissionaisPage::new(&ctx.api).create(&payload).await?;
            output_success(
                &output_format,
                &format!("Profissional {} cadastrado (id {})", created.nome_completo, created.id),
                Some(json!({ "profissional": created })),
            )
        }
        ProfissionaisCommands::Update { id } => {
            ctx.enter(Route::ProfissionalEditar(id))?;
            let page = ProfissionaisPage::new(&ctx.api);
            let changes: Value = read_json_stdin()?;

            let current = page.get(id).await?;
            let payload = merge_payload(&ProfissionalPayload::from(&current), changes)?;
            let updated = page.update(id, &payload).await?;
            output_success(
                &output_format,
                &format!("Profissional {} atualizado", updated.id),
                Some(json!({ "profissional": updated })),
            )
        }
        ProfissionaisCommands::Inativar { id, motivo } => {
            ctx.enter(Route::Profissionais)?;
            let motivo = match motivo {
                Some(motivo) => motivo,
                None => prompt("Motivo da inativação")?,
            };
            let response = ProfissionaisPage::new(&ctx.api).deactivate(id, &motivo).await?;
            output_success(&output_format, &response.message, Some(json!({ "id": id })))
        }
        ProfissionaisCommands::Reativar { id } => {
            ctx.enter(Route::Profissionais)?;
            let response = ProfissionaisPage::new(&ctx.api).reactivate(id).await?;
            output_success(&output_format, &response.message, Some(json!({ "id": id })))
        }
        ProfissionaisCommands::Exportar { formato, filter, dir } => {
            ctx.enter(Route::Profissionais)?;
            let dir = dir.unwrap_or_else(|| ctx.config.reports.output_dir.clone());
            let path = ProfissionaisPage::new(&ctx.api)
                .export(formato, &filter.into(), &dir)
                .await?;
            output_success(
                &output_format,
                &format!("Relatório salvo em {}", path.display()),
                Some(json!({ "path": path })),
            )
        }
        ProfissionaisCommands::Estatisticas => {
            ctx.enter(Route::Dashboard)?;
            let stats = ProfissionaisPage::new(&ctx.api).stats().await?;
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
                OutputFormat::Text => print_stats(&stats),
            }
            Ok(())
        }
    }
}

/// Overlay the top-level keys of `changes` onto `base`.
fn merge_payload(base: &ProfissionalPayload, changes: Value) -> anyhow::Result<ProfissionalPayload> {
    let Value::Object(changes) = changes else {
        anyhow::bail!("expected a JSON object on stdin");
    };
    let mut merged = serde_json::to_value(base)?;
    if let Value::Object(target) = &mut merged {
        target.extend(changes);
    }
    Ok(serde_json::from_value(merged)?)
}

fn print_stats(stats: &Value) {
    let Some(sections) = stats.as_object() else {
        println!("{}", stats);
        return;
    };
    for (section, value) in sections {
        match value {
            Value::Object(counts) => {
                println!("{}:", section);
                for (key, count) in counts {
                    println!("  {:<30} {}", key, count);
                }
            }
            other => println!("{:<32} {}", section, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_overrides_only_given_fields() {
        let base = ProfissionalPayload {
            nome_completo: "Ana".to_string(),
            cargo: "Técnica".to_string(),
            cidade_id: Some(1),
            ..Default::default()
        };
        let merged = merge_payload(&base, json!({ "cargo": "Coordenadora" })).unwrap();
        assert_eq!(merged.nome_completo, "Ana");
        assert_eq!(merged.cargo, "Coordenadora");
        assert_eq!(merged.cidade_id, Some(1));
    }

    #[test]
    fn merge_rejects_non_objects() {
        assert!(merge_payload(&ProfissionalPayload::default(), json!([1, 2])).is_err());
    }
}
