//! Budgets resource. `fetch` without a filter reads the full list; with a
//! filter it goes through the by-period endpoint.

use std::sync::Arc;

use super::slot::{FetchSlot, MutationSlot};
use super::state::{MutationState, ResourceState};
use crate::error::ApiError;
use crate::http::models::{Budget, BudgetInput, BudgetPatch, PeriodFilter};
use crate::http::ApiClient;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct BudgetsHook {
    inner: Arc<Inner>,
}

struct Inner {
    api: ApiClient,
    session: SessionStore,
    list: FetchSlot<Vec<Budget>>,
    create_op: MutationSlot,
    update_op: MutationSlot,
    delete_op: MutationSlot,
}

impl BudgetsHook {
    pub fn new(api: ApiClient, session: SessionStore) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                session,
                list: FetchSlot::new(),
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

    pub fn state(&self) -> ResourceState<Vec<Budget>> {
        self.inner.list.snapshot()
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

    pub async fn fetch(&self, filter: Option<&PeriodFilter>) -> Result<Vec<Budget>, ApiError> {
        let token = self.token()?;
        let seq = self.inner.list.begin();
        let result = match filter {
            Some(filter) => self.inner.api.budgets_by_period(&token, filter).await,
            None => self.inner.api.list_budgets(&token).await,
        };
        match result {
            Ok(items) => {
                self.inner.list.complete(seq, items.clone());
                Ok(items)
            }
            Err(e) => {
                let fallback = if filter.is_some() {
                    "Erro ao buscar orçamentos por período."
                } else {
                    "Erro ao buscar orçamentos."
                };
                self.inner.list.fail(seq, e.display_message(fallback));
                Err(e)
            }
        }
    }

    pub async fn create(&self, input: &BudgetInput) -> Result<Budget, ApiError> {
        let token = self.token()?;
        self.inner.create_op.begin();
        match self.inner.api.create_budget(&token, input).await {
            Ok(budget) => {
                self.inner.create_op.succeed();
                Ok(budget)
            }
            Err(e) => {
                self.inner
                    .create_op
                    .fail(e.display_message("Erro ao criar orçamento."));
                Err(e)
            }
        }
    }

    pub async fn update(&self, id: &str, patch: &BudgetPatch) -> Result<Budget, ApiError> {
        let token = self.token()?;
        self.inner.update_op.begin();
        match self.inner.api.update_budget(&token, id, patch).await {
            Ok(budget) => {
                self.inner.update_op.succeed();
                Ok(budget)
            }
            Err(e) => {
                self.inner
                    .update_op
                    .fail(e.display_message("Erro ao atualizar orçamento."));
                Err(e)
            }
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let token = self.token()?;
        self.inner.delete_op.begin();
        match self.inner.api.delete_budget(&token, id).await {
            Ok(()) => {
                self.inner.delete_op.succeed();
                Ok(())
            }
            Err(e) => {
                self.inner
                    .delete_op
                    .fail(e.display_message("Erro ao deletar orçamento."));
                Err(e)
            }
        }
    }
}
