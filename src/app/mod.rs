mod wiring;

use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;

use anyhow::{Context as AnyhowContext, Result};
use tokio_util::sync::CancellationToken;

use crate::service::MainService;
use crate::{cli, context, db, rest, startup};

pub struct App {
    pub ctx: context::Context,
    pub data_access: Arc<db::DataAccess>,
}

impl App {
    pub fn from_cli() -> Result<Self> {
        let cli = cli::parse();
        let ctx = context::Context::from_cli(&cli);

        crate::tracing::init(ctx.config.log_file.as_deref().map(Path::new));
        log::info!("🚀 Starting portier");
        log::info!("📂 Data dir: {}", ctx.config.data_dir);
        if let Some(path) = ctx.config.log_file.as_deref() {
            log::info!("📝 Log file: {}", path);
        }

        wiring::init_data_dir(&ctx).context("initializing data dir")?;
        let data_access = wiring::init_data_access(&ctx)?;

        Ok(Self { ctx, data_access })
    }
}

pub async fn run_daemon(app: App) -> Result<()> {
    // The startup sequence runs to completion before the listener opens.
    // Failures are logged and reflected in the health payload; the host keeps
    // serving diagnostics either way.
    let main_service = MainService::new(app.data_access.clone());
    let mut orchestrator = startup::Orchestrator::new();
    orchestrator.run(app.data_access.as_ref(), &main_service);
    let startup_state = orchestrator.state();

    let shutdown = CancellationToken::new();

    let api_addr = app.ctx.config.api_listen;
    let rest_state = rest::AppState {
        data_access: app.data_access.clone(),
        startup_state,
        started_at: SystemTime::now(),
    };
    let rest_shutdown = shutdown.clone();

    let mut rest_handle = tokio::spawn(async move {
        if let Err(e) = rest::serve(api_addr, rest_state, rest_shutdown).await {
            log::error!("REST server error: {}", e);
        }
    });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            log::info!("🧨 Ctrl-C received, shutting down");
        }
        _ = &mut rest_handle => {},
    }

    shutdown.cancel();
    if let Err(e) = rest_handle.await {
        log::error!("REST server error: {}", e);
        return Err(e.into());
    }

    log::info!("✅ Shutdown complete");
    Ok(())
}

pub async fn run() -> Result<()> {
    let app = App::from_cli()?;
    run_daemon(app).await
}
