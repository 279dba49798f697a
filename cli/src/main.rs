use clap::Parser;
mod app;
mod commands;
use commands::cli;
use fintrack_core::api::{ApiError, AppContext, SessionEvent, StoreError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> anyhow::Result<i32> {
    let args = cli::Args::parse();
    let mut cfg = fintrack_core::config::load_default()?;
    init_tracing(&cfg.logging).map_err(anyhow::Error::msg)?;

    if let Some(url) = &args.api_url {
        cfg.api.base_url = url.clone();
    }

    let ctx = AppContext::new(cfg)?;

    // Trace session transitions the screens would otherwise react to.
    let mut session_rx = ctx.session().subscribe();
    tokio::spawn(async move {
        while let Ok(event) = session_rx.recv().await {
            match event {
                SessionEvent::Restored { session, .. } => {
                    tracing::debug!(restored = session.is_some(), "session restored");
                }
                SessionEvent::Changed { session, .. } => match session {
                    Some(s) => tracing::debug!(user = %s.identity.email, "session established"),
                    None => tracing::info!("session cleared"),
                },
            }
        }
    });

    if let Err(e) = ctx.restore().await {
        tracing::warn!(error = %e, "could not restore persisted session");
    }

    app::dispatch(args.command, &ctx).await
}

fn exit_code_for_error(e: &anyhow::Error) -> i32 {
    // 0: success
    // 2: local validation
    // 20: transport / IO
    // 30: storage
    // 40: backend rejection, 41: expired session
    // 50: internal/uncategorized
    if let Some(api) = e.downcast_ref::<ApiError>() {
        return match api {
            ApiError::Validation(_) => 2,
            ApiError::AuthExpired { .. } => 41,
            ApiError::Request { .. } => 40,
            ApiError::Transport(_) => 20,
        };
    }
    if let Some(store) = e.downcast_ref::<StoreError>() {
        return match store {
            StoreError::Io(_) => 30,
            StoreError::Serialize(_) => 30,
            StoreError::InvalidSession(_) => 2,
        };
    }
    50
}

fn init_tracing(logging: &fintrack_core::config::LoggingConfig) -> Result<(), String> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(d),
            None => std::env::temp_dir().join("fintrack"),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let file_name = format!("fintrack.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        return Err("logging disabled for both console and file".to_string());
    }

    let console_layer = logging.console.then(|| {
        use std::io::IsTerminal;
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}
