//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! Services are generic over repository and model traits, but AppState pins
//! them to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use lingo_core::chat::service::ChatService;
use lingo_core::llm::dispatch::ModelDispatcher;
use lingo_core::session::validator::SessionValidator;
use lingo_infra::config::{load_global_config, resolve_api_key, resolve_data_dir};
use lingo_infra::llm::openai_compat::OpenAiCompatClient;
use lingo_infra::sqlite::chat::SqliteChatRepository;
use lingo_infra::sqlite::pool::DatabasePool;
use lingo_infra::sqlite::session::SqliteSessionRepository;
use lingo_infra::sqlite::user::SqliteUserRepository;
use lingo_types::config::GlobalConfig;

/// Concrete chat service pinned to SQLite storage and the HTTP model client.
pub type ConcreteChatService =
    ChatService<SqliteChatRepository, SqliteSessionRepository, OpenAiCompatClient>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub user_repo: Arc<SqliteUserRepository>,
    pub session_repo: Arc<SqliteSessionRepository>,
    pub config: Arc<GlobalConfig>,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: resolve the data dir, load config,
    /// connect to DB, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let config = load_global_config(&data_dir).await;

        let db_pool = DatabasePool::open(&data_dir).await?;

        Self::from_parts(config, data_dir, db_pool)
    }

    /// Wire services over an existing pool and config.
    pub fn from_parts(
        config: GlobalConfig,
        data_dir: PathBuf,
        db_pool: DatabasePool,
    ) -> anyhow::Result<Self> {
        let api_key = resolve_api_key(&config.llm);
        let model_client = OpenAiCompatClient::new(&config.llm, api_key)?;

        // timeout_secs = 0 disables the bound
        let timeout = match config.llm.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };
        let dispatcher = ModelDispatcher::new(Arc::new(model_client), timeout);

        let validator = SessionValidator::new(SqliteSessionRepository::new(db_pool.clone()));
        let chat_service = ChatService::new(
            SqliteChatRepository::new(db_pool.clone()),
            validator,
            dispatcher,
        );

        tracing::debug!(
            base_url = %config.llm.base_url,
            model = %config.llm.model,
            "Chat service wired"
        );

        Ok(Self {
            chat_service: Arc::new(chat_service),
            user_repo: Arc::new(SqliteUserRepository::new(db_pool.clone())),
            session_repo: Arc::new(SqliteSessionRepository::new(db_pool.clone())),
            config: Arc::new(config),
            data_dir,
            db_pool,
        })
    }
}
