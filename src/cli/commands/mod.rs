pub mod auditoria;
pub mod auth;
pub mod cidades;
pub mod dashboard;
pub mod equipamentos;
pub mod menu;
pub mod profissionais;
pub mod usuarios;
