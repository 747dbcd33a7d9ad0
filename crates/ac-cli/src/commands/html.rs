//! HTML command: render the dashboard page once.

use std::fs;
use std::io::Write;
use std::path::Path;

use ac_sheets::RowSource;
use anyhow::{Context, Result};

use crate::Config;
use crate::commands::util::{dashboard, fetch_once, local_now};
use crate::render::html::render_page;

/// Writes `page` to `path` via a temporary sibling file, so readers never see
/// a partially written page.
pub fn write_page(path: &Path, page: &str) -> Result<()> {
    let temp = path.with_extension("html.tmp");
    fs::write(&temp, page).with_context(|| format!("failed to write {}", temp.display()))?;
    fs::rename(&temp, path).with_context(|| format!("failed to replace {}", path.display()))?;
    Ok(())
}

/// Runs the html command.
pub fn run<W: Write>(
    writer: &mut W,
    source: &dyn RowSource,
    config: &Config,
    output: Option<&Path>,
) -> Result<()> {
    let snapshot = fetch_once(source)?;
    let dashboard = dashboard(&config.title, &snapshot.records, local_now(), None);
    let page = render_page(&dashboard, config.refresh_secs);

    match output {
        Some(path) => {
            write_page(path, &page)?;
            tracing::info!(path = %path.display(), "wrote dashboard");
        }
        None => write!(writer, "{page}")?,
    }
    Ok(())
}
