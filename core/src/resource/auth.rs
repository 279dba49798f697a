//! Authentication operations. Register and login both return a full
//! [`Session`]: the backend hands back the token pair, then the profile is
//! fetched with the fresh access token to populate the identity. Neither
//! operation touches the session store; the caller decides when to sign in.

use std::sync::Arc;

use super::slot::{FetchSlot, MutationSlot};
use super::state::{MutationState, ResourceState};
use crate::error::ApiError;
use crate::http::models::{Credentials, RegisterPayload};
use crate::http::ApiClient;
use crate::session::{Identity, Session};

#[derive(Clone)]
pub struct AuthHook {
    inner: Arc<Inner>,
}

struct Inner {
    api: ApiClient,
    register_op: MutationSlot,
    login_op: MutationSlot,
    profile: FetchSlot<Option<Identity>>,
}

impl AuthHook {
    pub fn new(api: ApiClient) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                register_op: MutationSlot::new(),
                login_op: MutationSlot::new(),
                profile: FetchSlot::new(),
            }),
        }
    }

    pub fn register_state(&self) -> MutationState {
        self.inner.register_op.snapshot()
    }

    pub fn login_state(&self) -> MutationState {
        self.inner.login_op.snapshot()
    }

    pub fn profile_state(&self) -> ResourceState<Option<Identity>> {
        self.inner.profile.snapshot()
    }

    pub async fn register(&self, payload: &RegisterPayload) -> Result<Session, ApiError> {
        self.inner.register_op.begin();
        match self.register_inner(payload).await {
            Ok(session) => {
                self.inner.register_op.succeed();
                Ok(session)
            }
            Err(e) => {
                self.inner
                    .register_op
                    .fail(e.display_message("Erro ao registrar."));
                Err(e)
            }
        }
    }

    async fn register_inner(&self, payload: &RegisterPayload) -> Result<Session, ApiError> {
        let tokens = self.inner.api.register(payload).await?;
        let identity = self.inner.api.profile(&tokens.access_token).await?;
        let mut session = Session::new(identity, tokens.access_token);
        if let Some(refresh) = tokens.refresh_token {
            session = session.with_refresh_token(refresh);
        }
        Ok(session)
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        self.inner.login_op.begin();
        match self.login_inner(credentials).await {
            Ok(session) => {
                self.inner.login_op.succeed();
                Ok(session)
            }
            Err(e) => {
                self.inner.login_op.fail(e.display_message("Erro ao logar."));
                Err(e)
            }
        }
    }

    async fn login_inner(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        let tokens = self.inner.api.login(credentials).await?;
        let identity = self.inner.api.profile(&tokens.access_token).await?;
        let mut session = Session::new(identity, tokens.access_token);
        if let Some(refresh) = tokens.refresh_token {
            session = session.with_refresh_token(refresh);
        }
        Ok(session)
    }

    /// Refresh the profile for an already-established token (profile edits,
    /// settings screen).
    pub async fn fetch_profile(&self, token: &str) -> Result<Identity, ApiError> {
        let seq = self.inner.profile.begin();
        match self.inner.api.profile(token).await {
            Ok(identity) => {
                self.inner.profile.complete(seq, Some(identity.clone()));
                Ok(identity)
            }
            Err(e) => {
                self.inner
                    .profile
                    .fail(seq, e.display_message("Erro ao buscar perfil."));
                Err(e)
            }
        }
    }
}
