//! Session lifecycle and resource-synchronization core for the fintrack
//! client: authentication state, authenticated transport, per-resource
//! fetch/mutate state containers, and period-derived views over them.

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod period;
pub mod registration;
pub mod resource;
pub mod session;
pub mod storage;
