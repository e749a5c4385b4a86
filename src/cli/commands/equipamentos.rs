use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{or_dash, output_collection, output_success};
use crate::cli::{CliContext, OutputFormat};
use crate::guard::Route;
use crate::models::{EquipamentoPayload, RecordStatus, StatusFilter};
use crate::views::EquipamentosPage;

#[derive(Subcommand)]
pub enum EquipamentosCommands {
    #[command(about = "List equipamentos")]
    List,

    #[command(about = "List the professionals of one equipamento")]
    Profissionais {
        #[arg(help = "Equipamento id")]
        id: i64,
        #[arg(long, default_value = "todos", help = "ativo, inativo or todos")]
        status: StatusFilter,
    },

    #[command(about = "Create equipamento")]
    Create {
        #[arg(help = "Name")]
        nome: String,
        #[arg(long, help = "Description")]
        descricao: Option<String>,
        #[arg(long, default_value = "ativo", help = "ativo or inativo")]
        status: RecordStatus,
    },

    #[command(about = "Update equipamento")]
    Update {
        #[arg(help = "Equipamento id")]
        id: i64,
        #[arg(help = "Name")]
        nome: String,
        #[arg(long, help = "Description")]
        descricao: Option<String>,
        #[arg(long, default_value = "ativo", help = "ativo or inativo")]
        status: RecordStatus,
    },

    #[command(about = "Deactivate equipamento")]
    Inativar {
        #[arg(help = "Equipamento id")]
        id: i64,
    },
}

pub async fn handle(
    cmd: EquipamentosCommands,
    ctx: &mut CliContext,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    ctx.enter(Route::Equipamentos)?;
    let page = EquipamentosPage::new(&ctx.api);

    match cmd {
        EquipamentosCommands::List => {
            let equipamentos = page.list().await?;
            let can_manage = page.can_manage();
            if let OutputFormat::Json = output_format {
                let body = json!({ "equipamentos": equipamentos, "can_manage": can_manage });
                println!("{}", serde_json::to_string_pretty(&body)?);
                return Ok(());
            }
            output_collection(
                &output_format,
                "equipamentos",
                &equipamentos,
                "Nenhum equipamento cadastrado",
                |e| format!("{:>5}  {:<30} {:<8} {}", e.id, e.nome, e.status.as_str(), or_dash(e.descricao.clone())),
            )?;
            if !can_manage {
                println!(
                    "Somente leitura: gerenciar equipamentos requer nível {}",
                    EquipamentosPage::MANAGE.as_u8()
                );
            }
            Ok(())
        }
        EquipamentosCommands::Profissionais { id, status } => {
            let result = page.profissionais(id, status).await?;
            if matches!(output_format, OutputFormat::Text) {
                println!("{} ({})", result.equipamento.nome, status.as_str());
            }
            output_collection(
                &output_format,
                "profissionais",
                &result.profissionais,
                "Nenhum profissional neste equipamento",
                |p| format!("{:>5}  {:<32} {:<20} {}", p.id, p.nome_completo, p.cargo, p.email),
            )
        }
        EquipamentosCommands::Create { nome, descricao, status } => {
            let equipamento = page.create(&EquipamentoPayload { nome, descricao, status }).await?;
            output_success(
                &output_format,
                &format!("Equipamento {} cadastrado (id {})", equipamento.nome, equipamento.id),
                Some(json!({ "equipamento": equipamento })),
            )
        }
        EquipamentosCommands::Update { id, nome, descricao, status } => {
            let equipamento = page.update(id, &EquipamentoPayload { nome, descricao, status }).await?;
            output_success(
                &output_format,
                &format!("Equipamento {} atualizado", equipamento.id),
                Some(json!({ "equipamento": equipamento })),
            )
        }
        EquipamentosCommands::Inativar { id } => {
            let response = page.deactivate(id).await?;
            output_success(&output_format, &response.message, Some(json!({ "id": id })))
        }
    }
}
