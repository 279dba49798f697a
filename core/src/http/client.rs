//! Authenticated transport over the backend REST API.
//!
//! The client is token-agnostic: callers (the resource hooks) retrieve the
//! bearer token and pass it per call. On a 401/403 the injected logout
//! handler runs (or a user-visible notice fires when none is set), and the
//! original error still propagates to the caller.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::models::{
    AuthTokens, Budget, BudgetInput, BudgetPatch, Category, Credentials, PeriodFilter,
    RegisterPayload, Summary, Transaction, TransactionInput, TransactionPatch,
};
use super::routes;
use crate::error::ApiError;
use crate::session::Identity;

/// Reacts to a backend-reported session expiry. Injected by whoever
/// constructs the client; expected to trigger a sign-out and a UI
/// transition.
#[async_trait]
pub trait LogoutHandler: Send + Sync {
    async fn on_session_expired(&self);
}

/// User-visible notice channel, used only when no logout handler is set.
pub trait NoticeSink: Send + Sync {
    fn notify(&self, title: &str, message: &str);
}

/// Default sink: surface the notice through the log.
pub struct LogNotice;

impl NoticeSink for LogNotice {
    fn notify(&self, title: &str, message: &str) {
        tracing::warn!(target: "fintrack.http", title, message, "user notice");
    }
}

#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: String,
    /// Single replaceable slot; the most recent registration wins.
    logout: std::sync::RwLock<Option<Arc<dyn LogoutHandler>>>,
    notices: std::sync::RwLock<Arc<dyn NoticeSink>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: base_url.into(),
                logout: std::sync::RwLock::new(None),
                notices: std::sync::RwLock::new(Arc::new(LogNotice)),
            }),
        })
    }

    /// Install the session-expiry handler, replacing any previous one.
    pub fn set_logout_handler(&self, handler: Arc<dyn LogoutHandler>) {
        *self.inner.logout.write().expect("logout slot poisoned") = Some(handler);
    }

    pub fn set_notice_sink(&self, sink: Arc<dyn NoticeSink>) {
        *self.inner.notices.write().expect("notice sink poisoned") = sink;
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url.trim_end_matches('/'), path)
    }

    fn auth(&self, req: reqwest::RequestBuilder, token: Option<&str>) -> reqwest::RequestBuilder {
        match token {
            Some(t) => req.bearer_auth(t),
            None => req,
        }
    }

    // ===== auth =====

    pub async fn register(&self, payload: &RegisterPayload) -> Result<AuthTokens, ApiError> {
        let req = self.inner.http.post(self.url(routes::REGISTER)).json(payload);
        self.execute("auth.register", req).await
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<AuthTokens, ApiError> {
        let req = self.inner.http.post(self.url(routes::LOGIN)).json(credentials);
        self.execute("auth.login", req).await
    }

    pub async fn profile(&self, token: &str) -> Result<Identity, ApiError> {
        let req = self.auth(self.inner.http.get(self.url(routes::PROFILE)), Some(token));
        self.execute("auth.profile", req).await
    }

    // ===== transactions =====

    pub async fn list_transactions(
        &self,
        token: &str,
        filter: Option<&PeriodFilter>,
    ) -> Result<Vec<Transaction>, ApiError> {
        let mut req = self.auth(self.inner.http.get(self.url(routes::TRANSACTIONS)), Some(token));
        if let Some(filter) = filter {
            req = req.query(filter);
        }
        self.execute("tx.list", req).await
    }

    pub async fn transaction_by_id(&self, token: &str, id: &str) -> Result<Transaction, ApiError> {
        let req = self.auth(
            self.inner.http.get(self.url(&routes::transaction(id))),
            Some(token),
        );
        self.execute("tx.get", req).await
    }

    pub async fn create_transaction(
        &self,
        token: &str,
        input: &TransactionInput,
    ) -> Result<Transaction, ApiError> {
        let req = self.auth(
            self.inner.http.post(self.url(routes::TRANSACTIONS)).json(input),
            Some(token),
        );
        self.execute("tx.create", req).await
    }

    pub async fn update_transaction(
        &self,
        token: &str,
        id: &str,
        patch: &TransactionPatch,
    ) -> Result<Transaction, ApiError> {
        let req = self.auth(
            self.inner.http.put(self.url(&routes::transaction(id))).json(patch),
            Some(token),
        );
        self.execute("tx.update", req).await
    }

    pub async fn delete_transaction(&self, token: &str, id: &str) -> Result<(), ApiError> {
        let req = self.auth(
            self.inner.http.delete(self.url(&routes::transaction(id))),
            Some(token),
        );
        self.execute_unit("tx.delete", req).await
    }

    pub async fn transactions_summary(&self, token: &str) -> Result<Summary, ApiError> {
        let req = self.auth(
            self.inner.http.get(self.url(routes::TRANSACTIONS_SUMMARY)),
            Some(token),
        );
        self.execute("tx.summary", req).await
    }

    // ===== budgets =====

    pub async fn list_budgets(&self, token: &str) -> Result<Vec<Budget>, ApiError> {
        let req = self.auth(self.inner.http.get(self.url(routes::BUDGETS)), Some(token));
        self.execute("budget.list", req).await
    }

    pub async fn budgets_by_period(
        &self,
        token: &str,
        filter: &PeriodFilter,
    ) -> Result<Vec<Budget>, ApiError> {
        let req = self.auth(
            self.inner
                .http
                .get(self.url(routes::BUDGETS_BY_PERIOD))
                .query(filter),
            Some(token),
        );
        self.execute("budget.by_period", req).await
    }

    pub async fn create_budget(&self, token: &str, input: &BudgetInput) -> Result<Budget, ApiError> {
        let req = self.auth(
            self.inner.http.post(self.url(routes::BUDGETS)).json(input),
            Some(token),
        );
        self.execute("budget.create", req).await
    }

    pub async fn update_budget(
        &self,
        token: &str,
        id: &str,
        patch: &BudgetPatch,
    ) -> Result<Budget, ApiError> {
        let req = self.auth(
            self.inner.http.put(self.url(&routes::budget(id))).json(patch),
            Some(token),
        );
        self.execute("budget.update", req).await
    }

    pub async fn delete_budget(&self, token: &str, id: &str) -> Result<(), ApiError> {
        let req = self.auth(
            self.inner.http.delete(self.url(&routes::budget(id))),
            Some(token),
        );
        self.execute_unit("budget.delete", req).await
    }

    // ===== categories =====

    /// Category catalogue; the one unauthenticated read.
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let req = self.inner.http.get(self.url(routes::CATEGORIES));
        self.execute("category.list", req).await
    }

    // ===== plumbing =====

    async fn execute<T: DeserializeOwned>(
        &self,
        stage: &'static str,
        req: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            tracing::debug!(target: "fintrack.http", stage, status = %status);
            return Ok(resp.json::<T>().await?);
        }
        Err(self.error_for(stage, resp).await)
    }

    async fn execute_unit(
        &self,
        stage: &'static str,
        req: reqwest::RequestBuilder,
    ) -> Result<(), ApiError> {
        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            tracing::debug!(target: "fintrack.http", stage, status = %status);
            return Ok(());
        }
        Err(self.error_for(stage, resp).await)
    }

    async fn error_for(&self, stage: &'static str, resp: reqwest::Response) -> ApiError {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or_default();
        tracing::debug!(target: "fintrack.http", stage, status = %status, message = %message, "request failed");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            self.handle_session_expired().await;
            return ApiError::AuthExpired {
                status: status.as_u16(),
            };
        }
        ApiError::Request {
            status: status.as_u16(),
            message,
        }
    }

    /// Side channel on authorization failure: run the handler if one is
    /// registered, otherwise surface a notice. Either way the caller still
    /// receives the original error.
    async fn handle_session_expired(&self) {
        let handler = self
            .inner
            .logout
            .read()
            .expect("logout slot poisoned")
            .clone();
        match handler {
            Some(handler) => handler.on_session_expired().await,
            None => {
                let sink = self
                    .inner
                    .notices
                    .read()
                    .expect("notice sink poisoned")
                    .clone();
                sink.notify("Sessão expirada", "Faça login novamente.");
            }
        }
    }
}
