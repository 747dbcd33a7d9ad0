//! Watch command: refresh the dashboard on a fixed interval.
//!
//! Every cycle re-runs fetch, classify, partition and render from scratch.
//! The only state carried between cycles is the last good snapshot, shown with
//! a staleness notice while the data source is failing.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ac_sheets::RowSource;
use anyhow::{Context, Result, bail};
use tokio::time::MissedTickBehavior;

use crate::Config;
use crate::commands::html::write_page;
use crate::commands::util::{dashboard, local_now};
use crate::render::html::render_page;
use crate::render::text::format_dashboard;
use crate::snapshot::Refresher;

/// Options for the refresh loop.
#[derive(Debug, Clone)]
pub struct WatchOptions {
    pub period: Duration,
    /// Rewrite this HTML file each cycle instead of printing text.
    pub output: Option<PathBuf>,
    /// Stop after this many cycles; run until interrupted when `None`.
    pub cycles: Option<u64>,
}

fn render_cycle<W: Write>(
    writer: &mut W,
    refresher: &Refresher<'_>,
    notice: Option<String>,
    title: &str,
    refresh_secs: u64,
    output: Option<&Path>,
) -> Result<()> {
    let records = refresher
        .snapshot()
        .map(|snapshot| snapshot.records.as_slice())
        .unwrap_or_default();
    let dashboard = dashboard(title, records, local_now(), notice);

    if let Some(path) = output {
        // A failed write is retried on the next cycle, like a failed fetch.
        match write_page(path, &render_page(&dashboard, refresh_secs)) {
            Ok(()) => tracing::debug!(path = %path.display(), "rewrote dashboard"),
            Err(err) => {
                let error = format!("{err:#}");
                tracing::warn!(path = %path.display(), error = %error, "failed to write dashboard");
            }
        }
    } else {
        writeln!(writer, "{}", format_dashboard(&dashboard))?;
        writer.flush()?;
    }
    Ok(())
}

/// Runs refresh cycles until `options.cycles` is reached or Ctrl-C is pressed.
pub async fn watch_loop<W: Write>(
    writer: &mut W,
    source: &dyn RowSource,
    title: &str,
    options: &WatchOptions,
) -> Result<u64> {
    let mut refresher = Refresher::new(source);
    let mut ticker = tokio::time::interval(options.period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let refresh_secs = options.period.as_secs().max(1);

    let mut completed = 0;
    while options.cycles.is_none_or(|limit| completed < limit) {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted, stopping refresh loop");
                break;
            }
        }

        let freshness = refresher.refresh().await;
        let notice = freshness.notice(refresher.snapshot());
        render_cycle(
            writer,
            &refresher,
            notice,
            title,
            refresh_secs,
            options.output.as_deref(),
        )?;
        completed += 1;
    }

    Ok(completed)
}

/// Runs the watch command.
pub fn run<W: Write>(
    writer: &mut W,
    source: &dyn RowSource,
    config: &Config,
    interval: Option<u64>,
    output: Option<PathBuf>,
    cycles: Option<u64>,
) -> Result<()> {
    let secs = interval.unwrap_or(config.refresh_secs);
    if secs == 0 {
        bail!("refresh interval must be at least one second");
    }
    let options = WatchOptions {
        period: Duration::from_secs(secs),
        output,
        cycles,
    };

    tracing::info!(source = %source.describe(), interval_secs = secs, "starting refresh loop");
    let runtime = tokio::runtime::Runtime::new().context("failed to initialize tokio runtime")?;
    let completed = runtime.block_on(watch_loop(writer, source, &config.title, &options))?;
    tracing::info!(cycles = completed, "refresh loop finished");
    Ok(())
}
