use anyhow::Context;

use menuprofit_api::config::ApiConfig;
use menuprofit_inference::PipelineHandle;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env()?;
    menuprofit_observability::init_with(config.log_format);
    config.log_defaults();

    // Artifacts must load before the listener is bound: a process that cannot
    // predict must not accept requests.
    let handle = PipelineHandle::new();
    let source = config.artifact_source();
    handle
        .initialize(&source)
        .with_context(|| {
            format!(
                "failed to load inference artifacts from {}",
                config.artifact_dir.display()
            )
        })?;

    let app = menuprofit_api::app::build_app(handle);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
