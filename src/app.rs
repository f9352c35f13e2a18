// One report run: banner, snapshot, rendering, timing, exit code.

use crate::aggregator::SnapshotAggregator;
use crate::config::{OutputFormat, ReportConfig};
use crate::provider::MetricsProvider;
use crate::report;
use std::future::Future;
use std::io::Write;
use std::time::Instant;

/// Runs one report against `aggregator` and returns the process exit code.
///
/// The report goes to `out`, errors to `err`. In JSON mode the timing line also goes to
/// `err`, so `out` stays a single JSON document.
pub async fn run<P, F>(
    aggregator: &SnapshotAggregator<P>,
    config: &ReportConfig,
    cancel: F,
    out: &mut impl Write,
    err: &mut impl Write,
) -> u8
where
    P: MetricsProvider,
    F: Future<Output = ()>,
{
    let style = config.style();
    if config.format == OutputFormat::Box
        && let Err(e) = writeln!(out, "{}", report::render_banner(&style))
    {
        tracing::warn!(error = %e, "writing banner failed");
    }

    let started = Instant::now();
    let snapshot = match aggregator.build_snapshot_until(cancel).await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "snapshot failed");
            let _ = writeln!(err, "{}", report::render_error(&e, &style));
            return e.exit_code();
        }
    };

    let rendered = match config.format {
        OutputFormat::Box => report::render_box(&snapshot, &style),
        OutputFormat::Json => match report::render_json(&snapshot) {
            Ok(json) => json,
            Err(e) => {
                let e = anyhow::Error::new(e).context("rendering JSON");
                tracing::error!(error = %e, "render failed");
                let _ = writeln!(err, "{}", report::render_error(&format!("{:#}", e), &style));
                return 1;
            }
        },
    };
    let timing = report::render_timing(started.elapsed(), &style);

    let written = match config.format {
        OutputFormat::Box => writeln!(out, "{}\n{}", rendered, timing),
        OutputFormat::Json => writeln!(out, "{}", rendered).and_then(|_| writeln!(err, "{}", timing)),
    };
    if let Err(e) = written {
        tracing::error!(error = %e, "writing report failed");
        return 1;
    }
    0
}
