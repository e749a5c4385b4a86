pub mod commands;
pub mod utils;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::config::{config, AppConfig};
use crate::error::ClientError;
use crate::guard::{GuardOutcome, Navigator, Route};
use crate::session::{FileCredentialStore, SessionContext};

#[derive(Parser)]
#[command(name = "profissionais")]
#[command(about = "Painel administrativo de profissionais da assistência social")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Login, logout and session information")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Summary counts for the dashboard")]
    Dashboard,

    #[command(about = "Professionals registry")]
    Profissionais {
        #[command(subcommand)]
        cmd: commands::profissionais::ProfissionaisCommands,
    },

    #[command(about = "Facilities (equipamentos)")]
    Equipamentos {
        #[command(subcommand)]
        cmd: commands::equipamentos::EquipamentosCommands,
    },

    #[command(about = "Cities")]
    Cidades {
        #[command(subcommand)]
        cmd: commands::cidades::CidadesCommands,
    },

    #[command(about = "Dashboard user accounts")]
    Usuarios {
        #[command(subcommand)]
        cmd: commands::usuarios::UsuariosCommands,
    },

    #[command(about = "Audit trail")]
    Auditoria {
        #[command(subcommand)]
        cmd: commands::auditoria::AuditoriaCommands,
    },

    #[command(about = "Navigation menu and route checks")]
    Menu {
        #[command(subcommand)]
        cmd: commands::menu::MenuCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Everything a command needs: the gateway client, the session it shares,
/// and a navigator that routes each command through the guard.
pub struct CliContext {
    pub config: AppConfig,
    pub api: ApiClient,
    pub navigator: Navigator,
}

impl CliContext {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let store = Arc::new(FileCredentialStore::new(config.storage.config_dir.clone()));
        let session = SessionContext::bootstrap(store);
        Self::with_session(config, session)
    }

    pub fn with_session(config: AppConfig, session: SessionContext) -> anyhow::Result<Self> {
        let api = ApiClient::new(&config, session.clone())?;
        let navigator = Navigator::new(session);
        Ok(Self { config, api, navigator })
    }

    pub fn session(&self) -> &SessionContext {
        self.api.session()
    }

    /// Navigate to `route` and fail unless the guard lets it render.
    pub fn enter(&mut self, route: Route) -> anyhow::Result<()> {
        match self.navigator.navigate(route) {
            GuardOutcome::Render(Route::Login) if route != Route::Login => Err(anyhow::anyhow!(
                "Não autenticado. Execute `profissionais auth login <email>` primeiro"
            )),
            GuardOutcome::Render(_) => Ok(()),
            GuardOutcome::AccessDenied { required, .. } => Err(ClientError::permission_denied(required).into()),
            GuardOutcome::Redirect { to, .. } => Err(anyhow::anyhow!("redirecionado para {}", to)),
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let mut ctx = CliContext::new(config().clone())?;

    let result = match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &mut ctx, output_format.clone()).await,
        Commands::Dashboard => commands::dashboard::handle(&mut ctx, output_format.clone()).await,
        Commands::Profissionais { cmd } => {
            commands::profissionais::handle(cmd, &mut ctx, output_format.clone()).await
        }
        Commands::Equipamentos { cmd } => {
            commands::equipamentos::handle(cmd, &mut ctx, output_format.clone()).await
        }
        Commands::Cidades { cmd } => commands::cidades::handle(cmd, &mut ctx, output_format.clone()).await,
        Commands::Usuarios { cmd } => commands::usuarios::handle(cmd, &mut ctx, output_format.clone()).await,
        Commands::Auditoria { cmd } => commands::auditoria::handle(cmd, &mut ctx, output_format.clone()).await,
        Commands::Menu { cmd } => commands::menu::handle(cmd, &mut ctx, output_format.clone()).await,
    };

    let Err(err) = result else {
        return Ok(());
    };

    match err.downcast_ref::<ClientError>() {
        Some(client_err) => {
            if client_err.is_auth_rejected() {
                // The gateway already dropped the session; settle the route on login
                let outcome = ctx.navigator.refresh();
                tracing::debug!("after rejection: {:?}", outcome);
            }
            if matches!(output_format, OutputFormat::Json) {
                utils::output_error(
                    &output_format,
                    &client_err.message(),
                    Some(client_err.error_code()),
                    Some(client_err.to_json()),
                )?;
            }
        }
        None => {
            if matches!(output_format, OutputFormat::Json) {
                utils::output_error(&output_format, &err.to_string(), None, None)?;
            }
        }
    }
    Err(err)
}
