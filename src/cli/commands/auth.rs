use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{or_dash, output_record, output_success, prompt};
use crate::cli::{CliContext, OutputFormat};
use crate::guard::Route;
use crate::models::UsuarioPayload;
use crate::session::{AccessLevel, LoginOutcome};

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login with e-mail and password")]
    Login {
        #[arg(help = "E-mail")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        senha: Option<String>,
    },

    #[command(about = "Logout and remove stored credentials")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Show current user information from the server")]
    Whoami,

    #[command(about = "Register new user")]
    Register {
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
}

pub async fn handle(cmd: AuthCommands, ctx: &mut CliContext, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { email, senha } => {
            let senha = match senha {
                Some(senha) => senha,
                None => prompt("Senha")?,
            };

            match ctx.session().login(&ctx.api, &email, &senha).await {
                LoginOutcome::Success(user) => {
                    ctx.navigator.navigate(Route::Login);
                    output_success(
                        &output_format,
                        &format!("Logado como {} (nível {})", user.email, user.nivel_acesso),
                        Some(json!({ "usuario": user })),
                    )
                }
                LoginOutcome::Failure { reason } => Err(anyhow::anyhow!(reason)),
            }
        }
        AuthCommands::Logout => {
            ctx.session().logout();
            ctx.navigator.refresh();
            output_success(&output_format, "Sessão encerrada", None)
        }
        AuthCommands::Status => {
            let state = ctx.session().state();
            match state.session() {
                Some(session) => {
                    let user = session.user();
                    let menu: Vec<&str> = ctx.navigator.menu().iter().map(|m| m.label).collect();
                    let record = json!({
                        "authenticated": true,
                        "usuario": user,
                        "menu": menu,
                    });
                    output_record(
                        &output_format,
                        &record,
                        &[
                            ("Usuário", format!("{} <{}>", user.nome_completo, user.email)),
                            ("Nível", user.nivel_acesso.to_string()),
                            ("Cidade", or_dash(user.cidade_id)),
                            ("Menu", menu.join(", ")),
                        ],
                    )
                }
                None => output_record(
                    &output_format,
                    &json!({ "authenticated": false }),
                    &[("Status", "não autenticado".to_string())],
                ),
            }
        }
        AuthCommands::Whoami => {
            ctx.enter(Route::Dashboard)?;
            let user = ctx.api.auth().me().await?;
            output_record(
                &output_format,
                &user,
                &[
                    ("ID", user.id.to_string()),
                    ("Nome", user.nome_completo.clone()),
                    ("E-mail", user.email.clone()),
                    ("Nível", user.nivel_acesso.to_string()),
                    ("Cidade", or_dash(user.cidade_id)),
                ],
            )
        }
        AuthCommands::Register { nome, email, nivel, cidade, senha } => {
            let nivel_acesso = AccessLevel::try_from(nivel).map_err(|e| anyhow::anyhow!(e))?;
            let senha = match senha {
                Some(senha) => senha,
                None => prompt("Senha")?,
            };
            let payload = UsuarioPayload {
                nome_completo: nome,
                email,
                senha: Some(senha),
                nivel_acesso,
                cidade_id: cidade,
            };
            let user = ctx.api.auth().register(&payload).await?;
            output_success(
                &output_format,
                &format!("Usuário {} cadastrado", user.email),
                Some(json!({ "usuario": user })),
            )
        }
    }
}
