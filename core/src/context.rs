use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::error::StoreError;
use crate::http::{ApiClient, LogoutHandler};
use crate::registration::RegistrationDraftStore;
use crate::resource::{AuthHook, BudgetsHook, CategoriesHook, TransactionsHook};
use crate::session::{Session, SessionStore};
use crate::storage::FileStore;

/// Signs the session out when the backend reports an expired token. This is
/// the injected replacement for a process-wide logout slot: the component
/// constructing the network layer hands it the session owner.
struct SignOutOnExpiry {
    session: SessionStore,
}

#[async_trait]
impl LogoutHandler for SignOutOnExpiry {
    async fn on_session_expired(&self) {
        tracing::info!(target: "fintrack.session", "forced logout: backend rejected the token");
        if let Err(e) = self.session.sign_out().await {
            tracing::warn!(target: "fintrack.session", error = %e, "failed to persist forced logout");
        }
    }
}

/// Wiring layer: owns the config and the constructed collaborators.
#[derive(Clone)]
pub struct AppContext {
    cfg: AppConfig,
    session: SessionStore,
    api: ApiClient,
    registration: RegistrationDraftStore,
}

impl AppContext {
    pub fn new(cfg: AppConfig) -> anyhow::Result<Self> {
        let dir = match &cfg.storage.directory {
            Some(dir) if !dir.trim().is_empty() => std::path::PathBuf::from(dir),
            _ => crate::config::get_data_dir()?,
        };
        let storage = Arc::new(FileStore::new(dir));
        let session = SessionStore::new(storage);

        let api = ApiClient::new(cfg.api.base_url.clone(), cfg.api.timeout_ms)?;
        api.set_logout_handler(Arc::new(SignOutOnExpiry {
            session: session.clone(),
        }));

        Ok(Self {
            cfg,
            session,
            api,
            registration: RegistrationDraftStore::new(),
        })
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.cfg
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn registration(&self) -> &RegistrationDraftStore {
        &self.registration
    }

    /// Startup restore of the persisted session.
    pub async fn restore(&self) -> Result<Option<Session>, StoreError> {
        self.session.restore().await
    }

    pub fn auth_hook(&self) -> AuthHook {
        AuthHook::new(self.api.clone())
    }

    pub fn transactions_hook(&self) -> TransactionsHook {
        TransactionsHook::new(self.api.clone(), self.session.clone())
    }

    pub fn budgets_hook(&self) -> BudgetsHook {
        BudgetsHook::new(self.api.clone(), self.session.clone())
    }

    pub fn categories_hook(&self) -> CategoriesHook {
        CategoriesHook::new(self.api.clone())
    }
}
