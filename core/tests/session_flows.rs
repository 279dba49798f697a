//! End-to-end flows over the wired context: login chaining, session
//! persistence, forced logout, and hook state transitions against a mock
//! backend.

use fintrack_core::api::{
    ApiConfig, ApiError, AppConfig, AppContext, Credentials, ResourceStatus, StorageConfig,
};
use mockito::Server;

fn context_for(server: &Server, dir: &tempfile::TempDir) -> AppContext {
    let cfg = AppConfig {
        api: ApiConfig {
            base_url: server.url(),
            timeout_ms: 2_000,
        },
        storage: StorageConfig {
            directory: Some(dir.path().to_string_lossy().to_string()),
        },
        ..AppConfig::default()
    };
    AppContext::new(cfg).unwrap()
}

const TOKENS_BODY: &str = r#"{"accessToken":"tok-1","refreshToken":"ref-1"}"#;
const PROFILE_BODY: &str = r#"{"id":"u1","name":"Ana","email":"ana@example.com"}"#;

#[tokio::test]
async fn login_chains_profile_fetch_and_survives_restart() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/auth/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(TOKENS_BODY)
        .create_async()
        .await;
    let _me = server
        .mock("GET", "/auth/me")
        .match_header("authorization", "Bearer tok-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(PROFILE_BODY)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let ctx = context_for(&server, &dir);

    let session = ctx
        .auth_hook()
        .login(&Credentials {
            email: "ana@example.com".to_string(),
            password: "s3cret".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(session.identity.name, "Ana");
    assert_eq!(session.access_token, "tok-1");
    assert_eq!(session.refresh_token.as_deref(), Some("ref-1"));

    ctx.session().sign_in(session.clone()).await.unwrap();

    // Same storage directory, fresh process.
    let restarted = context_for(&server, &dir);
    let restored = restarted.restore().await.unwrap();
    assert_eq!(restored, Some(session));
}

#[tokio::test]
async fn backend_rejection_forces_logout_and_clears_persisted_session() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/auth/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(TOKENS_BODY)
        .create_async()
        .await;
    let _me = server
        .mock("GET", "/auth/me")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(PROFILE_BODY)
        .create_async()
        .await;
    let _txs = server
        .mock("GET", "/transactions")
        .with_status(401)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let ctx = context_for(&server, &dir);
    let session = ctx
        .auth_hook()
        .login(&Credentials {
            email: "ana@example.com".to_string(),
            password: "s3cret".to_string(),
        })
        .await
        .unwrap();
    ctx.session().sign_in(session).await.unwrap();

    let err = ctx.transactions_hook().fetch(None).await.unwrap_err();
    assert!(matches!(err, ApiError::AuthExpired { status: 401 }));

    // The injected handler signed the session out...
    assert!(ctx.session().current().is_none());
    // ...and the cleared state is what a restart observes.
    let restarted = context_for(&server, &dir);
    assert_eq!(restarted.restore().await.unwrap(), None);
}

#[tokio::test]
async fn failed_refetch_keeps_previous_data_visible() {
    let mut server = Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let ctx = context_for(&server, &dir);
    ctx.session()
        .sign_in(fintrack_core::api::Session::new(
            fintrack_core::api::Identity {
                id: None,
                name: "Ana".to_string(),
                email: "ana@example.com".to_string(),
            },
            "tok-1",
        ))
        .await
        .unwrap();

    let hook = ctx.transactions_hook();

    let ok = server
        .mock("GET", "/transactions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"id":"t1","title":"Mercado","amount":120.5,"type":"saida","categoryId":"c1","createdAt":"2024-06-15T12:00:00Z"}]"#,
        )
        .create_async()
        .await;
    hook.fetch(None).await.unwrap();
    ok.remove_async().await;

    let _fail = server
        .mock("GET", "/transactions")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"Banco indisponível"}"#)
        .create_async()
        .await;
    hook.fetch(None).await.unwrap_err();

    let state = hook.state();
    assert_eq!(state.status, ResourceStatus::Error);
    assert_eq!(state.error_message.as_deref(), Some("Banco indisponível"));
    // Prior data untouched.
    assert_eq!(state.data.len(), 1);
    assert_eq!(state.data[0].id, "t1");
}

#[tokio::test]
async fn unauthenticated_fetch_fails_locally_without_a_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/transactions")
        .expect(0)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let ctx = context_for(&server, &dir);

    let err = ctx.transactions_hook().fetch(None).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn registration_flow_validates_locally_then_registers_and_clears() {
    let mut server = Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let ctx = context_for(&server, &dir);
    let auth = ctx.auth_hook();
    let draft = ctx.registration();

    // Incomplete draft: local failure, nothing sent.
    let untouched = server
        .mock("POST", "/auth/register")
        .expect(0)
        .create_async()
        .await;
    draft.set_name("Ana");
    draft.set_email("ana@example.com");
    let err = draft.finish(&auth).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    untouched.assert_async().await;
    // The accumulated fields survive the failed attempt.
    assert_eq!(draft.snapshot().name.as_deref(), Some("Ana"));
    untouched.remove_async().await;

    // Complete draft: register, chain profile, clear.
    let _register = server
        .mock("POST", "/auth/register")
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(TOKENS_BODY)
        .create_async()
        .await;
    let _me = server
        .mock("GET", "/auth/me")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(PROFILE_BODY)
        .create_async()
        .await;

    draft.set_password("s3cret");
    let session = draft.finish(&auth).await.unwrap();
    assert_eq!(session.identity.email, "ana@example.com");
    assert_eq!(draft.snapshot(), fintrack_core::api::RegistrationDraft::default());
}
