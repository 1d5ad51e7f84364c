use std::sync::Arc;

mod domain;
mod infrastructure;
mod interfaces;
pub mod constants;
pub mod errors;
pub mod graceful_shutdown;
pub mod settings;

pub use domain::{entities, skills, use_cases};
pub use infrastructure::{auth, db, parser};
pub use interfaces::{handlers, middlewares, repositories, routes};

use auth::jwt::JwtService;
use parser::client::{HttpParserClient, ResumeParserClient};
use repositories::account::AccountRepository;
use repositories::profile::ProfileRepository;
use repositories::resume::ResumeRepository;
use repositories::sqlx_repo::{SqlxAccountRepo, SqlxProfileRepo, SqlxResumeRepo};
use use_cases::auth::AuthService;
use use_cases::ingestion::IngestionService;
use use_cases::profile::ProfileService;
use use_cases::resumes::ResumeService;

pub struct AppState {
    pub auth: AuthService,
    pub profiles: ProfileService,
    pub resumes: ResumeService,
    pub ingestion: IngestionService,
    pub jwt: JwtService,
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Self {
        let accounts: Arc<dyn AccountRepository> = Arc::new(SqlxAccountRepo { pool: pool.clone() });
        let resumes: Arc<dyn ResumeRepository> = Arc::new(SqlxResumeRepo { pool: pool.clone() });
        let profiles: Arc<dyn ProfileRepository> = Arc::new(SqlxProfileRepo { pool });
        let parser: Arc<dyn ResumeParserClient> =
            Arc::new(HttpParserClient::new(&config.parser_service_url));

        Self::with_components(
            accounts,
            resumes,
            profiles,
            parser,
            JwtService::new(config),
            config.is_production(),
        )
    }

    /// Wires the services from pre-built components. Production goes
    /// through `new`; tests inject their own repositories and parser.
    pub fn with_components(
        accounts: Arc<dyn AccountRepository>,
        resumes: Arc<dyn ResumeRepository>,
        profiles: Arc<dyn ProfileRepository>,
        parser: Arc<dyn ResumeParserClient>,
        jwt: JwtService,
        cookie_secure: bool,
    ) -> Self {
        let profile_service = ProfileService::new(profiles);
        let ingestion = IngestionService::new(parser, resumes.clone(), profile_service.clone());

        AppState {
            auth: AuthService::new(accounts, jwt.clone()),
            profiles: profile_service,
            resumes: ResumeService::new(resumes),
            ingestion,
            jwt,
            cookie_secure,
        }
    }
}
