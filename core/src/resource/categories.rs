//! Category catalogue. Read-only and unauthenticated.

use std::sync::Arc;

use super::slot::FetchSlot;
use super::state::ResourceState;
use crate::error::ApiError;
use crate::http::models::Category;
use crate::http::ApiClient;

#[derive(Clone)]
pub struct CategoriesHook {
    inner: Arc<Inner>,
}

struct Inner {
    api: ApiClient,
    list: FetchSlot<Vec<Category>>,
}

impl CategoriesHook {
    pub fn new(api: ApiClient) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                list: FetchSlot::new(),
            }),
        }
    }

    pub fn state(&self) -> ResourceState<Vec<Category>> {
        self.inner.list.snapshot()
    }

    pub async fn fetch(&self) -> Result<Vec<Category>, ApiError> {
        let seq = self.inner.list.begin();
        match self.inner.api.list_categories().await {
            Ok(items) => {
                self.inner.list.complete(seq, items.clone());
                Ok(items)
            }
            Err(e) => {
                self.inner
                    .list
                    .fail(seq, e.display_message("Erro ao buscar categorias."));
                Err(e)
            }
        }
    }
}
