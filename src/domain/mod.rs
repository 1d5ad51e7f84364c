pub mod entities;
pub mod skills;
pub mod use_cases;
