//! Headless preview of the DPR portal hero.
//!
//! Runs a [`HeroPresentation`] and logs every frame change as structured
//! JSON, for checking translation packs and timings without a browser.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use portal_hero::{BundleStore, HeroConfig, HeroFrame, HeroPresentation};
use tokio::sync::watch;
use tracing::{info, warn};

/// How often the preview samples the hero.
const SAMPLE_PERIOD: Duration = Duration::from_millis(50);

/// Preview run settings.
struct PreviewConfig {
    log_level: String,
    /// `None` runs until interrupted.
    run_for: Option<Duration>,
}

impl PreviewConfig {
    /// Environment variables:
    /// - `PORTAL_LOG_LEVEL`: filter when `RUST_LOG` is unset (default: `info`)
    /// - `PORTAL_PREVIEW_SECS`: how long to run, `0` for until Ctrl-C (default: `10`)
    fn from_env() -> Self {
        let log_level = std::env::var("PORTAL_LOG_LEVEL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "info".to_owned());
        let secs = std::env::var("PORTAL_PREVIEW_SECS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(10);
        Self {
            log_level,
            run_for: (secs > 0).then(|| Duration::from_secs(secs)),
        }
    }
}

fn load_store(config: &HeroConfig) -> anyhow::Result<BundleStore> {
    let Some(path) = config.translations_path.as_deref() else {
        return Ok(BundleStore::builtin());
    };
    let store = BundleStore::load(path)
        .with_context(|| format!("failed to load translation pack from {path}"))?;
    info!(path, languages = store.languages().count(), "translation pack loaded");
    Ok(store)
}

fn log_frame(frame: &HeroFrame) {
    let stats: Vec<String> = frame
        .stats
        .iter()
        .map(|s| format!("{} {}", s.number, s.label))
        .collect();
    info!(
        language = frame.language.key(),
        language_name = frame.language_name,
        headline = frame.headline.as_deref().unwrap_or_default(),
        made_simple = frame.made_simple.as_deref().unwrap_or_default(),
        subtitle = frame.subtitle.as_deref().unwrap_or_default(),
        cta = frame.cta.as_deref().unwrap_or_default(),
        stats = ?stats,
        "hero frame"
    );
}

/// Wait for Ctrl-C or the configured run time, then broadcast shutdown.
async fn shutdown_signal(run_for: Option<Duration>, shutdown_tx: watch::Sender<bool>) {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };
    let deadline = async {
        match run_for {
            Some(d) => tokio::time::sleep(d).await,
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        () = ctrl_c => info!("interrupted, stopping preview"),
        () = deadline => info!("preview time elapsed"),
    }
    let _ = shutdown_tx.send(true);
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let preview = PreviewConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&preview.log_level)),
        )
        .json()
        .init();

    let config = HeroConfig::from_env();
    let store = Arc::new(load_store(&config)?);
    for language in portal_hero::Language::ALL {
        if store.get(language).is_none() {
            warn!(language = language.key(), "language has no translations");
        }
    }

    info!(
        word_period_ms = u64::try_from(config.word_period.as_millis()).unwrap_or(u64::MAX),
        language_period_ms = u64::try_from(config.language_period.as_millis()).unwrap_or(u64::MAX),
        transition = ?config.transition,
        "portal preview starting"
    );

    let hero = HeroPresentation::spawn(store, &config);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    tokio::spawn(shutdown_signal(preview.run_for, shutdown_tx));

    let mut sample = tokio::time::interval(SAMPLE_PERIOD);
    let mut last: Option<HeroFrame> = None;
    loop {
        tokio::select! {
            _ = shutdown_rx.changed() => break,
            _ = sample.tick() => {
                let frame = hero.frame().await;
                if last.as_ref() != Some(&frame) {
                    log_frame(&frame);
                    last = Some(frame);
                }
            }
        }
    }

    hero.shutdown().await;
    info!("portal preview stopped");
    Ok(())
}
