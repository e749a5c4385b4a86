use std::sync::Arc;

use serde_json::Value;
use tokio::sync::watch;

use super::{AccessLevel, CredentialStore, Session, SessionUser};
use crate::api::ApiClient;
use crate::error::ClientError;

const GENERIC_LOGIN_FAILURE: &str = "Erro ao fazer login";

/// The two states a session can be in. A login in flight does not change it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated(Session),
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            SessionState::Unauthenticated => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    /// Single permission predicate; false, never an error, when unauthenticated.
    pub fn has_permission(&self, required: AccessLevel) -> bool {
        self.session().is_some_and(|s| s.has_permission(required))
    }
}

/// Result of [`SessionContext::login`]. Login never returns an `Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    Success(SessionUser),
    Failure { reason: String },
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LoginOutcome::Success(_))
    }

    fn failure(reason: impl Into<String>) -> Self {
        LoginOutcome::Failure {
            reason: reason.into(),
        }
    }
}

struct Inner {
    store: Arc<dyn CredentialStore>,
    state: watch::Sender<SessionState>,
}

/// Authoritative in-memory view of who is logged in.
///
/// Built once per process by [`SessionContext::bootstrap`] and handed to the
/// gateway client, router and pages. Cloning shares the same state. State
/// changes are published on a watch channel so observers (the router) can
/// re-evaluate without polling.
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<Inner>,
}

impl SessionContext {
    /// Read the credential store and adopt the stored pair, if complete.
    pub fn bootstrap(store: Arc<dyn CredentialStore>) -> Self {
        let initial = match store.load() {
            Some(session) => {
                tracing::debug!("restored session for user {}", session.user().id);
                SessionState::Authenticated(session)
            }
            None => SessionState::Unauthenticated,
        };
        let (state, _) = watch::channel(initial);
        Self {
            inner: Arc::new(Inner { store, state }),
        }
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.inner.store
    }

    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    pub fn current(&self) -> Option<Session> {
        self.inner.state.borrow().session().cloned()
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.inner.state.borrow().session().map(|s| s.user().clone())
    }

    pub fn token(&self) -> Option<String> {
        self.inner.state.borrow().session().map(|s| s.token().to_string())
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    pub fn has_permission(&self, required: AccessLevel) -> bool {
        self.inner.state.borrow().has_permission(required)
    }

    /// Gate for a single action: `PermissionDenied` unless the session holds `required`.
    pub fn require(&self, required: AccessLevel) -> Result<Session, ClientError> {
        match self.current() {
            Some(session) if session.has_permission(required) => Ok(session),
            _ => Err(ClientError::permission_denied(required)),
        }
    }

    /// Authenticate against `POST /auth/login`.
    ///
    /// On success the pair is persisted before the in-memory state flips to
    /// authenticated. A rejected login touches neither the store nor the state.
    pub async fn login(&self, api: &ApiClient, email: &str, senha: &str) -> LoginOutcome {
        if email.trim().is_empty() || senha.is_empty() {
            return LoginOutcome::failure("Email e senha são obrigatórios");
        }

        let response = match api.auth().login(email.trim(), senha).await {
            Ok(response) => response,
            Err(err) => {
                tracing::info!("login rejected for {}: {}", email.trim(), err.error_code());
                return LoginOutcome::failure(login_failure_reason(&err));
            }
        };

        if let Err(err) = self.establish(&response.access_token, &response.usuario) {
            tracing::error!("failed to persist session: {}", err);
            return LoginOutcome::failure(format!("{}: {}", GENERIC_LOGIN_FAILURE, err));
        }

        tracing::info!(
            "logged in as {} (nível {})",
            response.usuario.email,
            response.usuario.nivel_acesso.as_u8()
        );

        LoginOutcome::Success(response.usuario)
    }

    /// Clear credentials and drop to unauthenticated. Cannot fail.
    pub fn logout(&self) {
        self.inner.state.send_modify(|state| {
            self.inner.store.clear();
            *state = SessionState::Unauthenticated;
        });
        tracing::info!("logged out");
    }

    /// Persist a freshly issued pair and publish it.
    ///
    /// Runs under the state channel's write lock, so it cannot interleave with
    /// [`SessionContext::expire`]. If the store refuses the pair, whatever it
    /// held is gone, so the state drops to unauthenticated as well.
    pub(crate) fn establish(&self, token: &str, user: &SessionUser) -> Result<Session, ClientError> {
        let session = Session::new(token, user.clone());
        let mut saved = Ok(());
        self.inner.state.send_if_modified(|state| {
            saved = self.inner.store.save(token, user);
            if saved.is_ok() {
                *state = SessionState::Authenticated(session.clone());
                return true;
            }
            self.inner.store.clear();
            if state.is_authenticated() {
                *state = SessionState::Unauthenticated;
                true
            } else {
                false
            }
        });
        saved.map(|()| session)
    }

    /// Reaction to a backend authentication rejection for a request sent with `token_used`.
    ///
    /// Clears the store and resets state unless a session other than the one
    /// the request carried is current. A request sent without a token never
    /// ends a session established after it. The comparison and the clear run
    /// under the state channel's write lock. Safe to call any number of
    /// times; returns true only for the call that performed the transition.
    pub(crate) fn expire(&self, token_used: Option<&str>) -> bool {
        let transitioned = self.inner.state.send_if_modified(|state| {
            let superseded = match (state.session(), token_used) {
                (Some(current), Some(used)) => current.token() != used,
                (Some(_), None) => true,
                (None, _) => false,
            };
            if superseded {
                tracing::debug!("ignoring rejection for a superseded token");
                return false;
            }

            self.inner.store.clear();
            if state.is_authenticated() {
                *state = SessionState::Unauthenticated;
                true
            } else {
                false
            }
        });

        if transitioned {
            tracing::warn!("session rejected by backend; credentials cleared");
        }
        transitioned
    }
}

/// Reason string for a failed login: the backend's `error` field when present.
fn login_failure_reason(err: &ClientError) -> String {
    let from_body = match err {
        ClientError::Backend { body: Some(body), .. } => body.get("error").and_then(Value::as_str),
        _ => None,
    };
    match from_body {
        Some(reason) if !reason.trim().is_empty() => reason.to_string(),
        _ => GENERIC_LOGIN_FAILURE.to_string(),
    }
}
