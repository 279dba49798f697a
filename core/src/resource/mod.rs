//! Per-resource-kind state containers ("hooks"): fetch and mutate
//! operations with independent loading/error tracking.
//!
//! Contracts shared by every hook:
//! - exactly one request per operation call, no silent retry;
//! - fetches guard against stale responses with a per-slot sequence number;
//! - mutations never refetch, callers re-invoke `fetch` after success;
//! - errors set a local display message and are returned to the caller.

pub mod auth;
pub mod budgets;
pub mod categories;
pub mod slot;
pub mod state;
pub mod transactions;

pub use auth::AuthHook;
pub use budgets::BudgetsHook;
pub use categories::CategoriesHook;
pub use slot::{FetchSlot, MutationSlot};
pub use state::{MutationState, ResourceState, ResourceStatus};
pub use transactions::TransactionsHook;
