//! Transient sign-up accumulator. Fields arrive one screen at a time; each
//! setter merges into the draft. The final step validates locally before
//! any network call and clears the draft once registration succeeds, so
//! stale data never leaks into the next sign-up attempt.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::models::RegisterPayload;
use crate::resource::AuthHook;
use crate::session::Session;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationDraft {
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub objectives: Option<Vec<String>>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Clone, Default)]
pub struct RegistrationDraftStore {
    draft: Arc<std::sync::RwLock<RegistrationDraft>>,
}

impl RegistrationDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> RegistrationDraft {
        self.draft.read().expect("draft lock poisoned").clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.draft.write().expect("draft lock poisoned").name = Some(name.into());
    }

    pub fn set_birth_date(&self, date: NaiveDate) {
        self.draft.write().expect("draft lock poisoned").birth_date = Some(date);
    }

    pub fn set_objectives(&self, objectives: Vec<String>) {
        self.draft.write().expect("draft lock poisoned").objectives = Some(objectives);
    }

    pub fn set_email(&self, email: impl Into<String>) {
        self.draft.write().expect("draft lock poisoned").email = Some(email.into());
    }

    pub fn set_password(&self, password: impl Into<String>) {
        self.draft.write().expect("draft lock poisoned").password = Some(password.into());
    }

    /// Reset to an empty draft. Called on flow completion, and by the
    /// navigation glue when the sign-up flow is abandoned.
    pub fn clear(&self) {
        *self.draft.write().expect("draft lock poisoned") = RegistrationDraft::default();
    }

    /// Assemble the registration payload. Name, email and password must all
    /// be present; otherwise this fails locally and nothing is sent.
    pub fn payload(&self) -> Result<RegisterPayload, ApiError> {
        fn blank(field: &Option<String>) -> bool {
            !matches!(field.as_deref(), Some(s) if !s.trim().is_empty())
        }

        let draft = self.snapshot();
        let mut missing = Vec::new();
        if blank(&draft.name) {
            missing.push("nome");
        }
        if blank(&draft.email) {
            missing.push("email");
        }
        if blank(&draft.password) {
            missing.push("senha");
        }
        if !missing.is_empty() {
            return Err(ApiError::Validation(format!(
                "Campos obrigatórios ausentes: {}.",
                missing.join(", ")
            )));
        }
        Ok(RegisterPayload {
            name: draft.name.unwrap_or_default(),
            email: draft.email.unwrap_or_default(),
            password: draft.password.unwrap_or_default(),
        })
    }

    /// Final step of the flow: validate, register, clear. The draft is only
    /// cleared on success; a failed registration keeps the accumulated
    /// fields so the user can retry.
    pub async fn finish(&self, auth: &AuthHook) -> Result<Session, ApiError> {
        let payload = self.payload()?;
        let session = auth.register(&payload).await?;
        self.clear();
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn setters_merge_instead_of_replacing() {
        let store = RegistrationDraftStore::new();
        store.set_name("Ana");
        store.set_birth_date(NaiveDate::from_ymd_opt(1995, 3, 20).unwrap());
        store.set_objectives(vec!["economizar".to_string()]);
        store.set_email("ana@example.com");

        let draft = store.snapshot();
        assert_eq!(draft.name.as_deref(), Some("Ana"));
        assert_eq!(draft.email.as_deref(), Some("ana@example.com"));
        assert_eq!(
            draft.objectives,
            Some(vec!["economizar".to_string()]),
        );
        // Unset fields stay unset.
        assert_eq!(draft.password, None);
    }

    #[test]
    fn payload_requires_name_email_password() {
        let store = RegistrationDraftStore::new();
        store.set_name("Ana");
        store.set_email("ana@example.com");

        let err = store.payload().unwrap_err();
        match err {
            ApiError::Validation(msg) => assert!(msg.contains("senha")),
            other => panic!("expected validation error, got {other:?}"),
        }

        store.set_password("s3cret");
        let payload = store.payload().unwrap();
        assert_eq!(payload.name, "Ana");
        assert_eq!(payload.email, "ana@example.com");
    }

    #[test]
    fn blank_fields_do_not_pass_validation() {
        let store = RegistrationDraftStore::new();
        store.set_name("  ");
        store.set_email("ana@example.com");
        store.set_password("s3cret");
        assert!(store.payload().is_err());
    }

    #[test]
    fn clear_resets_to_empty() {
        let store = RegistrationDraftStore::new();
        store.set_name("Ana");
        store.set_password("s3cret");
        store.clear();
        assert_eq!(store.snapshot(), RegistrationDraft::default());
    }
}
