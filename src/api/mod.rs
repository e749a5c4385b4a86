//! Typed access to the backend REST API.
//!
//! All traffic goes through [`ApiClient`], which attaches the bearer token and
//! polices authentication rejections; the endpoint groups below only build
//! paths, queries and bodies.

pub mod auditoria;
pub mod auth;
pub mod cidades;
pub mod client;
pub mod equipamentos;
pub mod profissionais;
pub mod relatorios;
pub mod usuarios;

pub use client::ApiClient;

impl ApiClient {
    pub fn auth(&self) -> auth::AuthApi<'_> {
        auth::AuthApi::new(self)
    }

    pub fn cidades(&self) -> cidades::CidadesApi<'_> {
        cidades::CidadesApi::new(self)
    }

    pub fn equipamentos(&self) -> equipamentos::EquipamentosApi<'_> {
        equipamentos::EquipamentosApi::new(self)
    }

    pub fn profissionais(&self) -> profissionais::ProfissionaisApi<'_> {
        profissionais::ProfissionaisApi::new(self)
    }

    pub fn usuarios(&self) -> usuarios::UsuariosApi<'_> {
        usuarios::UsuariosApi::new(self)
    }

    pub fn auditoria(&self) -> auditoria::AuditoriaApi<'_> {
        auditoria::AuditoriaApi::new(self)
    }

    pub fn relatorios(&self) -> relatorios::RelatoriosApi<'_> {
        relatorios::RelatoriosApi::new(self)
    }
}
