use std::sync::Arc;

use anyhow::Context;

use shelflife_api::app::{build_app, build_services};
use shelflife_infra::triggers::RecurringTrigger;
use shelflife_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;
    shelflife_observability::init_with(config.log_format);

    let services = Arc::new(build_services(&config).context("failed to build services")?);

    let recurring = if config.recurring_enabled {
        let trigger = RecurringTrigger::new(&config.schedule)?;
        tracing::info!(schedule = trigger.expression(), "recurring expiry check enabled");
        Some(trigger.spawn("expiry.recurring", services.runner().clone(), services.clock().clone()))
    } else {
        tracing::info!("recurring expiry check disabled");
        None
    };

    let app = build_app(services);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(handle) = recurring {
        handle.shutdown().await;
    }
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
