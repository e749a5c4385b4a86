//! Route guard: decides, on every navigation and every session transition,
//! whether a view renders, is denied in place, or redirects to login.

use std::fmt;
use std::str::FromStr;

use tokio::sync::watch;

use crate::session::{AccessLevel, SessionContext, SessionState};

/// Every view reachable in the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Profissionais,
    ProfissionalNovo,
    ProfissionalEditar(i64),
    Equipamentos,
    Cidades,
    Usuarios,
    Auditoria,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Dashboard => "/".to_string(),
            Route::Profissionais => "/profissionais".to_string(),
            Route::ProfissionalNovo => "/profissionais/novo".to_string(),
            Route::ProfissionalEditar(id) => format!("/profissionais/editar/{}", id),
            Route::Equipamentos => "/equipamentos".to_string(),
            Route::Cidades => "/cidades".to_string(),
            Route::Usuarios => "/usuarios".to_string(),
            Route::Auditoria => "/auditoria".to_string(),
        }
    }

    /// Minimum level to view; `None` for the public login view.
    pub fn required_level(&self) -> Option<AccessLevel> {
        match self {
            Route::Login => None,
            Route::Dashboard | Route::Profissionais | Route::Equipamentos => {
                Some(AccessLevel::Visualizacao)
            }
            Route::ProfissionalNovo | Route::ProfissionalEditar(_) => Some(AccessLevel::Editor),
            Route::Cidades | Route::Usuarios | Route::Auditoria => Some(AccessLevel::AdminCidade),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Dashboard => "Dashboard",
            Route::Profissionais => "Profissionais",
            Route::ProfissionalNovo => "Novo Profissional",
            Route::ProfissionalEditar(_) => "Editar Profissional",
            Route::Equipamentos => "Equipamentos",
            Route::Cidades => "Cidades",
            Route::Usuarios => "Usuários",
            Route::Auditoria => "Auditoria",
        }
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let trimmed = path.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Ok(Route::Dashboard),
            ["login"] => Ok(Route::Login),
            ["profissionais"] => Ok(Route::Profissionais),
            ["profissionais", "novo"] => Ok(Route::ProfissionalNovo),
            ["profissionais", "editar", id] => id
                .parse()
                .map(Route::ProfissionalEditar)
                .map_err(|_| format!("identificador inválido na rota: {}", path)),
            ["equipamentos"] => Ok(Route::Equipamentos),
            ["cidades"] => Ok(Route::Cidades),
            ["usuarios"] => Ok(Route::Usuarios),
            ["auditoria"] => Ok(Route::Auditoria),
            _ => Err(format!("rota desconhecida: {}", path)),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Decision for one evaluation of a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Render(Route),
    /// Authenticated but below the view's level: denial shown in place, URL unchanged.
    AccessDenied { route: Route, required: AccessLevel },
    /// `replace` means the current history entry is overwritten.
    Redirect { to: Route, replace: bool },
}

pub struct RouteGuard;

impl RouteGuard {
    pub fn evaluate(route: &Route, state: &SessionState) -> GuardOutcome {
        let Some(required) = route.required_level() else {
            // Visiting login while authenticated goes back to the dashboard
            return if state.is_authenticated() {
                GuardOutcome::Redirect {
                    to: Route::Dashboard,
                    replace: true,
                }
            } else {
                GuardOutcome::Render(*route)
            };
        };

        if !state.is_authenticated() {
            return GuardOutcome::Redirect {
                to: Route::Login,
                replace: true,
            };
        }

        if state.has_permission(required) {
            GuardOutcome::Render(*route)
        } else {
            GuardOutcome::AccessDenied {
                route: *route,
                required,
            }
        }
    }
}

/// Navigation history driven by the guard.
///
/// Holds a subscription to the session so that a transition (logout, or a
/// rejection seen by the gateway) is applied on the next evaluation.
pub struct Navigator {
    session: SessionContext,
    updates: watch::Receiver<SessionState>,
    history: Vec<Route>,
}

impl Navigator {
    pub fn new(session: SessionContext) -> Self {
        let updates = session.subscribe();
        Self {
            session,
            updates,
            history: Vec::new(),
        }
    }

    /// Current location, if any navigation happened.
    pub fn location(&self) -> Option<Route> {
        self.history.last().copied()
    }

    pub fn history(&self) -> &[Route] {
        &self.history
    }

    /// Push `route` and resolve it through the guard.
    pub fn navigate(&mut self, route: Route) -> GuardOutcome {
        self.history.push(route);
        self.resolve()
    }

    /// Re-evaluate the current location against the latest session state.
    pub fn refresh(&mut self) -> GuardOutcome {
        if self.history.is_empty() {
            self.history.push(Route::Dashboard);
        }
        self.resolve()
    }

    /// Menu for the session as it stands now.
    pub fn menu(&self) -> Vec<MenuItem> {
        menu(&self.session.state())
    }

    /// True when the session changed since the last evaluation.
    pub fn session_changed(&self) -> bool {
        self.updates.has_changed().unwrap_or(false)
    }

    /// Wait for the next session transition, then re-evaluate.
    pub async fn next_transition(&mut self) -> GuardOutcome {
        // The sender lives inside the session we hold, so this only ends on a change
        let _ = self.updates.changed().await;
        self.resolve()
    }

    fn resolve(&mut self) -> GuardOutcome {
        let state = self.updates.borrow_and_update().clone();

        // Two redirects at most: protected -> login, or login -> dashboard
        for _ in 0..3 {
            let Some(current) = self.history.last().copied() else {
                break;
            };
            match RouteGuard::evaluate(&current, &state) {
                GuardOutcome::Redirect { to, replace } => {
                    if replace {
                        self.history.pop();
                    }
                    tracing::debug!("redirect {} -> {}", current, to);
                    self.history.push(to);
                }
                outcome => return outcome,
            }
        }

        GuardOutcome::Render(self.location().unwrap_or(Route::Login))
    }
}

/// Navigation menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub route: Route,
    pub label: &'static str,
}

const MENU: [Route; 6] = [
    Route::Dashboard,
    Route::Profissionais,
    Route::Equipamentos,
    Route::Cidades,
    Route::Usuarios,
    Route::Auditoria,
];

/// Menu entries the session may reach.
pub fn menu(state: &SessionState) -> Vec<MenuItem> {
    MENU.iter()
        .filter(|route| route.required_level().is_some_and(|level| state.has_permission(level)))
        .map(|route| MenuItem {
            route: *route,
            label: route.title(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemoryCredentialStore, Session, SessionUser};
    use std::sync::Arc;

    fn state(level: AccessLevel) -> SessionState {
        SessionState::Authenticated(Session::new(
            "tok",
            SessionUser {
                id: 1,
                nome_completo: "Teste".to_string(),
                email: "teste@cidade.gov.br".to_string(),
                nivel_acesso: level,
                cidade_id: None,
                data_cadastro: None,
            },
        ))
    }

    #[test]
    fn parses_paths() {
        assert_eq!("/".parse::<Route>(), Ok(Route::Dashboard));
        assert_eq!("/cidades/".parse::<Route>(), Ok(Route::Cidades));
        assert_eq!(
            "/profissionais/editar/42".parse::<Route>(),
            Ok(Route::ProfissionalEditar(42))
        );
        assert!("/profissionais/editar/abc".parse::<Route>().is_err());
        assert!("/relatorios".parse::<Route>().is_err());
    }

    #[test]
    fn unauthenticated_is_redirected_with_replace() {
        let outcome = RouteGuard::evaluate(&Route::Profissionais, &SessionState::Unauthenticated);
        assert_eq!(
            outcome,
            GuardOutcome::Redirect {
                to: Route::Login,
                replace: true
            }
        );
    }

    #[test]
    fn login_view_bounces_authenticated_users() {
        let outcome = RouteGuard::evaluate(&Route::Login, &state(AccessLevel::Visualizacao));
        assert_eq!(
            outcome,
            GuardOutcome::Redirect {
                to: Route::Dashboard,
                replace: true
            }
        );
        assert_eq!(
            RouteGuard::evaluate(&Route::Login, &SessionState::Unauthenticated),
            GuardOutcome::Render(Route::Login)
        );
    }

    #[test]
    fn editor_cannot_open_cities() {
        let outcome = RouteGuard::evaluate(&Route::Cidades, &state(AccessLevel::Editor));
        assert_eq!(
            outcome,
            GuardOutcome::AccessDenied {
                route: Route::Cidades,
                required: AccessLevel::AdminCidade
            }
        );
    }

    #[test]
    fn menu_is_filtered_by_level() {
        let viewer: Vec<Route> = menu(&state(AccessLevel::Visualizacao)).iter().map(|m| m.route).collect();
        assert_eq!(viewer, vec![Route::Dashboard, Route::Profissionais, Route::Equipamentos]);

        assert_eq!(menu(&state(AccessLevel::AdminCidade)).len(), 6);
        assert!(menu(&SessionState::Unauthenticated).is_empty());
    }

    #[test]
    fn navigator_replaces_guarded_entry_with_login() {
        let session = SessionContext::bootstrap(Arc::new(MemoryCredentialStore::new()));
        let mut nav = Navigator::new(session);

        nav.navigate(Route::Dashboard);
        assert_eq!(nav.navigate(Route::Auditoria), GuardOutcome::Render(Route::Login));
        assert_eq!(nav.history(), &[Route::Login, Route::Login]);
    }
}
