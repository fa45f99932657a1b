pub mod routine;
pub mod table_repository;
