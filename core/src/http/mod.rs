pub mod client;
pub mod models;
pub mod routes;

pub use client::{ApiClient, LogNotice, LogoutHandler, NoticeSink};
pub use models::{
    AuthTokens, Budget, BudgetInput, BudgetPatch, Category, Credentials, PeriodFilter,
    RegisterPayload, Summary, Transaction, TransactionInput, TransactionKind, TransactionPatch,
};
