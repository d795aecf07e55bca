//! Sequential render loop and the `badges.json` metadata file.

use std::fs;
use std::path::Path;
use url::Url;

use super::{Badge, BadgeError, BadgeRecord, Fetcher};
use crate::debug;
use crate::logger::ProgressLine;

/// Outcome of a render pass.
#[derive(Debug, Default)]
pub struct RenderReport {
    /// Successfully written badges.
    pub records: Vec<BadgeRecord>,
    /// `(badge description, error)` for every badge that failed.
    pub failures: Vec<(String, BadgeError)>,
}

impl RenderReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Render every badge in order and write it under `output`.
///
/// A failing badge does not stop the loop; its error is collected.
pub fn render_all(
    badges: &[Badge<'_>],
    fetcher: &dyn Fetcher,
    base: &Url,
    output: &Path,
) -> RenderReport {
    let progress = ProgressLine::new(&[("badges", badges.len())]);
    let mut report = RenderReport::default();

    for badge in badges {
        match render_one(badge, fetcher, base, output) {
            Ok(record) => {
                debug!("render"; "{} -> {}", badge.describe(), record.path);
                report.records.push(record);
            }
            Err(err) => report.failures.push((badge.describe(), err)),
        }
        progress.inc("badges");
    }

    progress.finish();
    report
}

fn render_one(
    badge: &Badge<'_>,
    fetcher: &dyn Fetcher,
    base: &Url,
    output: &Path,
) -> Result<BadgeRecord, BadgeError> {
    let document = badge.render(fetcher, base)?;
    document.save(&badge.output_path(output))?;
    Ok(badge.record())
}

/// Write records as pretty JSON, sorted by slug then path.
pub fn write_records(path: &Path, records: &mut [BadgeRecord]) -> Result<(), BadgeError> {
    records.sort_by(|a, b| a.slug.cmp(&b.slug).then_with(|| a.path.cmp(&b.path)));

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BadgeError::Io(parent.to_path_buf(), e))?;
    }
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json + "\n").map_err(|e| BadgeError::Io(path.to_path_buf(), e))
}
