pub mod account;
pub mod profile;
pub mod resume;
pub mod sqlx_repo;
