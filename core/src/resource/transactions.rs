//! Transactions resource: list, detail, summary, and the three mutations,
//! each tracked independently.

use std::sync::Arc;

use super::slot::{FetchSlot, MutationSlot};
use super::state::{MutationState, ResourceState};
use crate::error::ApiError;
use crate::http::models::{
    PeriodFilter, Summary, Transaction, TransactionInput, TransactionPatch,
};
use crate::http::ApiClient;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct TransactionsHook {
    inner: Arc<Inner>,
}

struct Inner {
    api: ApiClient,
    session: SessionStore,
    list: FetchSlot<Vec<Transaction>>,
    detail: FetchSlot<Option<Transaction>>,
    summary: FetchSlot<Summary>,
    create_op: MutationSlot,
    update_op: MutationSlot,
    delete_op: MutationSlot,
}

impl TransactionsHook {
    pub fn new(api: ApiClient, session: SessionStore) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                session,
                list: FetchSlot::new(),
                detail: FetchSlot::new(),
                summary: FetchSlot::new(),
                create_op: MutationSlot::new(),
                update_op: MutationSlot::new(),
                delete_op: MutationSlot::new(),
            }),
        }
    }

    fn token(&self) -> Result<String, ApiError> {
        self.inner
            .session
            .access_token()
            .ok_or_else(|| ApiError::Validation("Usuário não autenticado.".to_string()))
    }

    pub fn state(&self) -> ResourceState<Vec<Transaction>> {
        self.inner.list.snapshot()
    }

    pub fn detail_state(&self) -> ResourceState<Option<Transaction>> {
        self.inner.detail.snapshot()
    }

    pub fn summary_state(&self) -> ResourceState<Summary> {
        self.inner.summary.snapshot()
    }

    pub fn create_state(&self) -> MutationState {
        self.inner.create_op.snapshot()
    }

    pub fn update_state(&self) -> MutationState {
        self.inner.update_op.snapshot()
    }

    pub fn delete_state(&self) -> MutationState {
        self.inner.delete_op.snapshot()
    }

    /// Read the transaction list, optionally scoped to a month. Exactly one
    /// request per call; a stale response (superseded by a later fetch) is
    /// discarded.
    pub async fn fetch(
        &self,
        filter: Option<&PeriodFilter>,
    ) -> Result<Vec<Transaction>, ApiError> {
        let token = self.token()?;
        let seq = self.inner.list.begin();
        match self.inner.api.list_transactions(&token, filter).await {
            Ok(items) => {
                self.inner.list.complete(seq, items.clone());
                Ok(items)
            }
            Err(e) => {
                self.inner
                    .list
                    .fail(seq, e.display_message("Erro ao buscar transações."));
                Err(e)
            }
        }
    }

    pub async fn fetch_by_id(&self, id: &str) -> Result<Transaction, ApiError> {
        let token = self.token()?;
        let seq = self.inner.detail.begin();
        match self.inner.api.transaction_by_id(&token, id).await {
            Ok(tx) => {
                self.inner.detail.complete(seq, Some(tx.clone()));
                Ok(tx)
            }
            Err(e) => {
                self.inner
                    .detail
                    .fail(seq, e.display_message("Erro ao buscar transação."));
                Err(e)
            }
        }
    }

    pub async fn fetch_summary(&self) -> Result<Summary, ApiError> {
        let token = self.token()?;
        let seq = self.inner.summary.begin();
        match self.inner.api.transactions_summary(&token).await {
            Ok(summary) => {
                self.inner.summary.complete(seq, summary.clone());
                Ok(summary)
            }
            Err(e) => {
                self.inner
                    .summary
                    .fail(seq, e.display_message("Erro ao buscar resumo."));
                Err(e)
            }
        }
    }

    /// Mutations return the server result or the error so the caller can
    /// branch (keep a modal open, block navigation). None of them refetch;
    /// the caller re-invokes `fetch` after success to keep `data` current.
    pub async fn create(&self, input: &TransactionInput) -> Result<Transaction, ApiError> {
        let token = self.token()?;
        self.inner.create_op.begin();
        match self.inner.api.create_transaction(&token, input).await {
            Ok(tx) => {
                self.inner.create_op.succeed();
                Ok(tx)
            }
            Err(e) => {
                self.inner
                    .create_op
                    .fail(e.display_message("Erro ao criar transação."));
                Err(e)
            }
        }
    }

    pub async fn update(&self, id: &str, patch: &TransactionPatch) -> Result<Transaction, ApiError> {
        let token = self.token()?;
        self.inner.update_op.begin();
        match self.inner.api.update_transaction(&token, id, patch).await {
            Ok(tx) => {
                self.inner.update_op.succeed();
                Ok(tx)
            }
            Err(e) => {
                self.inner
                    .update_op
                    .fail(e.display_message("Erro ao atualizar transação."));
                Err(e)
            }
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let token = self.token()?;
        self.inner.delete_op.begin();
        match self.inner.api.delete_transaction(&token, id).await {
            Ok(()) => {
                self.inner.delete_op.succeed();
                Ok(())
            }
            Err(e) => {
                self.inner
                    .delete_op
                    .fail(e.display_message("Erro ao deletar transação."));
                Err(e)
            }
        }
    }
}
