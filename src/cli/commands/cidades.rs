use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_collection, output_success};
use crate::cli::{CliContext, OutputFormat};
use crate::guard::Route;
use crate::models::{CidadePayload, RecordStatus};
use crate::views::CidadesPage;

#[derive(Subcommand)]
pub enum CidadesCommands {
    #[command(about = "List cities")]
    List,

    #[command(about = "Create city")]
    Create {
        #[arg(help = "City name")]
        nome: String,
        #[arg(long, default_value = "ativo", help = "ativo or inativo")]
        status: RecordStatus,
    },

    #[command(about = "Update city")]
    Update {
        #[arg(help = "City id")]
        id: i64,
        #[arg(help = "City name")]
        nome: String,
        #[arg(long, default_value = "ativo", help = "ativo or inativo")]
        status: RecordStatus,
    },

    #[command(about = "Deactivate city")]
    Inativar {
        #[arg(help = "City id")]
        id: i64,
    },
}

pub async fn handle(cmd: CidadesCommands, ctx: &mut CliContext, output_format: OutputFormat) -> anyhow::Result<()> {
    ctx.enter(Route::Cidades)?;
    let page = CidadesPage::new(&ctx.api);

    match cmd {
        CidadesCommands::List => {
            let cidades = page.list().await?;
            output_collection(&output_format, "cidades", &cidades, "Nenhuma cidade cadastrada", |c| {
                format!("{:>5}  {:<40} {}", c.id, c.nome, c.status.as_str())
            })
        }
        CidadesCommands::Create { nome, status } => {
            let cidade = page.create(&CidadePayload { nome, status }).await?;
            output_success(
                &output_format,
                &format!("Cidade {} cadastrada (id {})", cidade.nome, cidade.id),
                Some(json!({ "cidade": cidade })),
            )
        }
        CidadesCommands::Update { id, nome, status } => {
            let cidade = page.update(id, &CidadePayload { nome, status }).await?;
            output_success(
                &output_format,
                &format!("Cidade {} atualizada", cidade.id),
                Some(json!({ "cidade": cidade })),
            )
        }
        CidadesCommands::Inativar { id } => {
            let response = page.deactivate(id).await?;
            output_success(&output_format, &response.message, Some(json!({ "id": id })))
        }
    }
}
