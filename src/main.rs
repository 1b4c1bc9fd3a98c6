use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use vetrates::{driver, RunConfig};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 2) configure paths ──────────────────────────────────────────
    let config = RunConfig::for_root(".");

    // ─── 3) load, derive, write ──────────────────────────────────────
    let summary = driver::run(&config)
        .with_context(|| format!("rate run over {} failed", config.input.display()))?;

    if !summary.skipped.is_empty() {
        info!(skipped = ?summary.skipped, "metrics absent from input");
    }
    info!(files = summary.files_written(), "all done");
    Ok(())
}
