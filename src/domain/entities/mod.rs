pub mod account;
pub mod option_fields;
pub mod profile;
pub mod resume;
pub mod token;
