use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{or_dash, output_collection, output_success, prompt};
use crate::cli::{CliContext, OutputFormat};
use crate::guard::Route;
use crate::models::UsuarioPayload;
use crate::session::AccessLevel;
use crate::views::UsuariosPage;

#[derive(Subcommand)]
pub enum UsuariosCommands {
    #[command(about = "List users")]
    List,

    #[command(about = "Access levels the current session may assign")]
    Niveis,

    #[command(about = "Create user")]
    Create {
        #[arg(help = "Full name")]
        nome: String,
        #[arg(help = "E-mail")]
        email: String,
        #[arg(long, default_value_t = 1, help = "Access level (1-4)")]
        nivel: u8,
        #[arg(long, help = "City id")]
        cidade: Option<i64>,
        #[arg(long, help = "Password (will prompt if not provided)")]
        senha: Option<String>,
    },

    #[command(about = "Update user; an empty password keeps the current one")]
    Update {
        #[arg(help = "User id")]
        id: i64,
        #[arg(help = "Full name")]
        nome: String,
        #[arg(help = "E-mail")]
        email: String,
        #[arg(long, default_value_t = 1, help = "Access level (1-4)")]
        nivel: u8,
        #[arg(long, help = "City id")]
        cidade: Option<i64>,
        #[arg(long, help = "New password")]
        senha: Option<String>,
    },

    #[command(about = "Delete user")]
    Delete {
        #[arg(help = "User id")]
        id: i64,
    },
}

fn level(nivel: u8) -> anyhow::Result<AccessLevel> {
    AccessLevel::try_from(nivel).map_err(|e| anyhow::anyhow!(e))
}

pub async fn handle(cmd: UsuariosCommands, ctx: &mut CliContext, output_format: OutputFormat) -> anyhow::Result<()> {
    ctx.enter(Route::Usuarios)?;
    let page = UsuariosPage::new(&ctx.api);

    match cmd {
        UsuariosCommands::List => {
            let usuarios = page.list().await?;
            output_collection(&output_format, "usuarios", &usuarios, "Nenhum usuário cadastrado", |u| {
                format!(
                    "{:>5}  {:<30} {:<30} {:<20} {}",
                    u.id,
                    u.nome_completo,
                    u.email,
                    u.nivel_acesso.label(),
                    or_dash(u.cidade_id)
                )
            })
        }
        UsuariosCommands::Niveis => {
            let niveis: Vec<_> = page
                .assignable_levels()
                .into_iter()
                .map(|l| json!({ "nivel": l.as_u8(), "label": l.label() }))
                .collect();
            output_collection(&output_format, "niveis", &niveis, "Nenhum nível disponível", |n| {
                format!("{}  {}", n["nivel"], n["label"].as_str().unwrap_or_default())
            })
        }
        UsuariosCommands::Create { nome, email, nivel, cidade, senha } => {
            let senha = match senha {
                Some(senha) => senha,
                None => prompt("Senha")?,
            };
            let payload = UsuarioPayload {
                nome_completo: nome,
                email,
                senha: Some(senha),
                nivel_acesso: level(nivel)?,
                cidade_id: cidade,
            };
            let usuario = page.create(&payload).await?;
            output_success(
                &output_format,
                &format!("Usuário {} cadastrado (id {})", usuario.email, usuario.id),
                Some(json!({ "usuario": usuario })),
            )
        }
        UsuariosCommands::Update { id, nome, email, nivel, cidade, senha } => {
            let payload = UsuarioPayload {
                nome_completo: nome,
                email,
                senha,
                nivel_acesso: level(nivel)?,
                cidade_id: cidade,
            };
            let usuario = page.update(id, payload).await?;
            output_success(
                &output_format,
                &format!("Usuário {} atualizado", usuario.id),
                Some(json!({ "usuario": usuario })),
            )
        }
        UsuariosCommands::Delete { id } => {
            let response = page.delete(id).await?;
            output_success(&output_format, &response.message, Some(json!({ "id": id })))
        }
    }
}
