//! One page per entity. Pages gate each action on the session's access level
//! and return errors for inline display; none of them handle `AuthRejected`,
//! which the gateway has already acted on.

pub mod auditoria;
pub mod cidades;
pub mod dashboard;
pub mod equipamentos;
pub mod profissionais;
pub mod usuarios;

pub use auditoria::AuditoriaPage;
pub use cidades::CidadesPage;
pub use dashboard::{DashboardPage, DashboardStats};
pub use equipamentos::EquipamentosPage;
pub use profissionais::{ProfissionaisListing, ProfissionaisPage};
pub use usuarios::UsuariosPage;

use std::collections::HashMap;

/// Id -> name lookup used to label foreign keys in listings.
pub(crate) fn name_index<T>(items: &[T], key: impl Fn(&T) -> (i64, String)) -> HashMap<i64, String> {
    items.iter().map(key).collect()
}
