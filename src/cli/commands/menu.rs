use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_collection, output_record};
use crate::cli::{CliContext, OutputFormat};
use crate::guard::{GuardOutcome, Route};

#[derive(Subcommand)]
pub enum MenuCommands {
    #[command(about = "List the views available to the current session")]
    List,

    #[command(about = "Check how the guard resolves a path")]
    Open {
        #[arg(help = "Path, e.g. /cidades or /profissionais/editar/3")]
        path: String,
    },
}

pub async fn handle(cmd: MenuCommands, ctx: &mut CliContext, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        MenuCommands::List => {
            let items: Vec<_> = ctx
                .navigator
                .menu()
                .into_iter()
                .map(|item| json!({ "path": item.route.path(), "label": item.label }))
                .collect();
            output_collection(&output_format, "menu", &items, "Nenhuma tela disponível (faça login)", |item| {
                format!(
                    "{:<16} {}",
                    item["path"].as_str().unwrap_or_default(),
                    item["label"].as_str().unwrap_or_default()
                )
            })
        }
        MenuCommands::Open { path } => {
            let route: Route = path.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            let outcome = ctx.navigator.navigate(route);
            let location = ctx.navigator.location().unwrap_or(route);

            let (status, detail) = match &outcome {
                GuardOutcome::Render(rendered) => ("render", rendered.title().to_string()),
                GuardOutcome::AccessDenied { required, .. } => {
                    ("access_denied", format!("Acesso negado: requer nível {}", required))
                }
                GuardOutcome::Redirect { to, .. } => ("redirect", to.path()),
            };

            output_record(
                &output_format,
                &json!({ "status": status, "location": location.path(), "detail": detail }),
                &[
                    ("Resultado", status.to_string()),
                    ("Local", location.path()),
                    ("Tela", detail.clone()),
                ],
            )
        }
    }
}
