pub mod contacto_repository;
pub mod usuario_repository;
