use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::models::{MessageResponse, Usuario, UsuarioPayload};
use crate::session::AccessLevel;

/// User management. City-admins may manage users up to their own level;
/// granting global-admin requires being one.
pub struct UsuariosPage<'a> {
    api: &'a ApiClient,
}

impl<'a> UsuariosPage<'a> {
    pub const REQUIRED: AccessLevel = AccessLevel::AdminCidade;

    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Levels the current session may assign.
    pub fn assignable_levels(&self) -> Vec<AccessLevel> {
        AccessLevel::ALL
            .into_iter()
            .filter(|level| {
                *level < AccessLevel::AdminGlobal || self.api.session().has_permission(AccessLevel::AdminGlobal)
            })
            .collect()
    }

    fn check_assignable(&self, payload: &UsuarioPayload) -> ClientResult<()> {
        if !self.assignable_levels().contains(&payload.nivel_acesso) {
            return Err(ClientError::permission_denied(payload.nivel_acesso));
        }
        Ok(())
    }

    pub async fn list(&self) -> ClientResult<Vec<Usuario>> {
        self.api.session().require(Self::REQUIRED)?;
        self.api.usuarios().list().await
    }

    pub async fn create(&self, payload: &UsuarioPayload) -> ClientResult<Usuario> {
        self.api.session().require(Self::REQUIRED)?;
        self.check_assignable(payload)?;
        self.api.usuarios().create(payload).await
    }

    pub async fn update(&self, id: i64, payload: UsuarioPayload) -> ClientResult<Usuario> {
        self.api.session().require(Self::REQUIRED)?;
        self.check_assignable(&payload)?;
        self.api.usuarios().update(id, payload).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<MessageResponse> {
        self.api.session().require(Self::REQUIRED)?;
        self.api.usuarios().delete(id).await
    }
}
