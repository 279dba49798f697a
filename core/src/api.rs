//! Stable re-exports for consumers (`cli` and external crates).
//!
//! Prefer importing from `fintrack_core::api` instead of reaching into
//! internal modules.

pub use crate::config::{get_data_dir, load_default, ApiConfig, AppConfig, LoggingConfig, StorageConfig};
pub use crate::context::AppContext;
pub use crate::error::{ApiError, StoreError};
pub use crate::http::{
    ApiClient, AuthTokens, Budget, BudgetInput, BudgetPatch, Category, Credentials, LogNotice,
    LogoutHandler, NoticeSink, PeriodFilter, RegisterPayload, Summary, Transaction,
    TransactionInput, TransactionKind, TransactionPatch,
};
pub use crate::period::{
    budget_usage, classify_budget, is_in_month, month_index, month_name, transactions_of_month,
    usage_label, BudgetStatus, BudgetUsage, MONTHS,
};
pub use crate::registration::{RegistrationDraft, RegistrationDraftStore};
pub use crate::resource::{
    AuthHook, BudgetsHook, CategoriesHook, MutationState, ResourceState, ResourceStatus,
    TransactionsHook,
};
pub use crate::session::{Identity, Session, SessionEvent, SessionStore, SESSION_KEY};
pub use crate::storage::{FileStore, MemoryStore, PersistentStore};
