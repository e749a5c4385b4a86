mod common;

use anyhow::Result;
use common::{FakeBackend, Harness};
use rstest::rstest;

use profissionais_admin::cli::CliContext;
use profissionais_admin::config::AppConfig;
use profissionais_admin::error::ClientError;
use profissionais_admin::guard::{GuardOutcome, Navigator, Route, RouteGuard};
use profissionais_admin::session::{AccessLevel, Session, SessionState, SessionUser};
use profissionais_admin::views::CidadesPage;

fn state(level: AccessLevel) -> SessionState {
    SessionState::Authenticated(Session::new(
        "tok",
        SessionUser {
            id: 9,
            nome_completo: "Teste".to_string(),
            email: "teste@sistema.com".to_string(),
            nivel_acesso: level,
            cidade_id: None,
            data_cadastro: None,
        },
    ))
}

#[rstest]
fn higher_levels_reach_everything_lower_levels_reach(
    #[values(
        Route::Dashboard,
        Route::Profissionais,
        Route::ProfissionalNovo,
        Route::ProfissionalEditar(4),
        Route::Equipamentos,
        Route::Cidades,
        Route::Usuarios,
        Route::Auditoria
    )]
    route: Route,
    #[values(AccessLevel::Visualizacao, AccessLevel::Editor, AccessLevel::AdminCidade)] level: AccessLevel,
) {
    let lower = RouteGuard::evaluate(&route, &state(level));
    if lower == GuardOutcome::Render(route) {
        for higher in AccessLevel::ALL.into_iter().filter(|l| *l > level) {
            assert_eq!(RouteGuard::evaluate(&route, &state(higher)), GuardOutcome::Render(route));
        }
    }
}

#[rstest]
#[case(Route::Cidades, AccessLevel::Editor, false)]
#[case(Route::Cidades, AccessLevel::AdminCidade, true)]
#[case(Route::ProfissionalNovo, AccessLevel::Visualizacao, false)]
#[case(Route::ProfissionalNovo, AccessLevel::Editor, true)]
#[case(Route::Auditoria, AccessLevel::AdminGlobal, true)]
#[case(Route::Equipamentos, AccessLevel::Visualizacao, true)]
fn route_levels(#[case] route: Route, #[case] level: AccessLevel, #[case] allowed: bool) {
    let outcome = RouteGuard::evaluate(&route, &state(level));
    assert_eq!(outcome == GuardOutcome::Render(route), allowed, "{} at {}", route, level);
}

#[tokio::test]
async fn viewer_is_denied_in_place() -> Result<()> {
    let backend = FakeBackend::start().await?;
    let h = Harness::new(&backend)?;
    assert!(h
        .session
        .login(&h.api, common::VIEWER_EMAIL, common::VIEWER_PASSWORD)
        .await
        .is_success());

    let mut navigator = Navigator::new(h.session.clone());
    navigator.navigate(Route::Dashboard);
    let outcome = navigator.navigate(Route::Cidades);

    assert_eq!(
        outcome,
        GuardOutcome::AccessDenied {
            route: Route::Cidades,
            required: AccessLevel::AdminCidade
        }
    );
    // Location is unchanged and the session survives
    assert_eq!(navigator.location(), Some(Route::Cidades));
    assert!(h.session.is_authenticated());

    // The page refuses without reaching the backend
    let before = backend.recorded.authorization_headers().len();
    let err = CidadesPage::new(&h.api).list().await.unwrap_err();
    assert!(matches!(err, ClientError::PermissionDenied { required: AccessLevel::AdminCidade }));
    assert_eq!(backend.recorded.authorization_headers().len(), before);
    Ok(())
}

#[tokio::test]
async fn logout_sends_navigator_to_login() -> Result<()> {
    let backend = FakeBackend::start().await?;
    let h = Harness::new(&backend)?;
    h.session
        .login(&h.api, common::ADMIN_EMAIL, common::ADMIN_PASSWORD)
        .await;

    let mut navigator = Navigator::new(h.session.clone());
    assert_eq!(navigator.navigate(Route::Usuarios), GuardOutcome::Render(Route::Usuarios));
    assert_eq!(navigator.menu().len(), 6);

    h.session.logout();
    assert!(navigator.session_changed());
    assert_eq!(navigator.refresh(), GuardOutcome::Render(Route::Login));
    assert!(navigator.menu().is_empty());
    Ok(())
}

#[tokio::test]
async fn cli_context_enforces_route_levels() -> Result<()> {
    let backend = FakeBackend::start().await?;
    let h = Harness::new(&backend)?;
    h.session
        .login(&h.api, common::EDITOR_EMAIL, common::EDITOR_PASSWORD)
        .await;

    let mut ctx = CliContext::with_session(AppConfig::with_base_url(&backend.api_url), h.session.clone())?;
    ctx.enter(Route::ProfissionalNovo)?;

    let err = ctx.enter(Route::Usuarios).unwrap_err();
    let client_err = err.downcast_ref::<ClientError>().expect("permission error");
    assert_eq!(client_err.error_code(), "PERMISSION_DENIED");

    h.session.logout();
    assert!(ctx.enter(Route::Dashboard).is_err());
    assert_eq!(ctx.navigator.location(), Some(Route::Login));
    Ok(())
}
