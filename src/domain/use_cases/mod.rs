pub mod auth;
pub mod extractors;
pub mod ingestion;
pub mod profile;
pub mod resumes;
