// Whole report runs against a scripted provider: output streams and exit codes

mod common;

use common::FakeProvider;
use cpureport::aggregator::SnapshotAggregator;
use cpureport::app::run;
use cpureport::config::{OutputFormat, ReportConfig};
use cpureport::error::ProviderError;

fn config(format: OutputFormat) -> ReportConfig {
    ReportConfig {
        format,
        width: 80,
        color: false,
    }
}

async fn run_with(
    provider: FakeProvider,
    format: OutputFormat,
) -> (u8, String, String) {
    let aggregator = SnapshotAggregator::new(provider);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(
        &aggregator,
        &config(format),
        std::future::pending(),
        &mut out,
        &mut err,
    )
    .await;
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[tokio::test(start_paused = true)]
async fn box_run_prints_banner_report_and_timing() {
    let (code, out, err) =
        run_with(FakeProvider::new().with_loads(&[10.0, 10.0]), OutputFormat::Box).await;
    assert_eq!(code, 0);
    assert!(err.is_empty());
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "CPU information retrieval now started...");
    assert!(out.contains("CPU Average: 100%"));
    let timing = lines.last().unwrap();
    assert!(timing.starts_with("CPU information retrieval took "));
    assert!(timing.ends_with(" ms"));
}

#[tokio::test(start_paused = true)]
async fn json_run_keeps_stdout_parseable_and_times_on_stderr() {
    let (code, out, err) =
        run_with(FakeProvider::new().with_loads(&[10.0, 10.0]), OutputFormat::Json).await;
    assert_eq!(code, 0);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["freePercent"], 90.0);
    assert!(err.starts_with("CPU information retrieval took "));
    assert!(err.trim_end().ends_with(" ms"));
}

#[tokio::test(start_paused = true)]
async fn static_failure_prints_error_and_exits_non_zero() {
    let provider =
        FakeProvider::new().failing_static(ProviderError::Backend("cpuinfo unreadable".into()));
    let (code, out, err) = run_with(provider, OutputFormat::Box).await;
    assert_eq!(code, 1);
    assert!(err.starts_with("An error occurred: "));
    assert!(err.contains("cpuinfo unreadable"));
    assert!(!out.contains('╭'));
    assert!(!out.contains("retrieval took"));
}

#[tokio::test(start_paused = true)]
async fn cancelled_run_exits_130() {
    let aggregator = SnapshotAggregator::new(FakeProvider::new().with_loads(&[10.0, 20.0]));
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(
        &aggregator,
        &config(OutputFormat::Box),
        async {},
        &mut out,
        &mut err,
    )
    .await;
    assert_eq!(code, 130);
    assert!(String::from_utf8(err).unwrap().contains("snapshot cancelled"));
}
