use crate::cli::utils::output_record;
use crate::cli::{CliContext, OutputFormat};
use crate::guard::Route;
use crate::views::DashboardPage;

pub async fn handle(ctx: &mut CliContext, output_format: OutputFormat) -> anyhow::Result<()> {
    ctx.enter(Route::Dashboard)?;
    let stats = DashboardPage::new(&ctx.api).load().await?;

    output_record(
        &output_format,
        &stats,
        &[
            ("Total de profissionais", stats.total_profissionais.to_string()),
            ("Profissionais ativos", stats.profissionais_ativos.to_string()),
            ("Profissionais inativos", stats.profissionais_inativos.to_string()),
            ("Equipamentos", stats.total_equipamentos.to_string()),
            ("Cidades", stats.total_cidades.to_string()),
        ],
    )
}
