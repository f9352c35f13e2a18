use cpureport::aggregator::SnapshotAggregator;
use cpureport::app;
use cpureport::config::AppConfig;
use cpureport::provider::SysinfoProvider;
use cpureport::report::{self, ReportStyle};
use cpureport::version;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let app_config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", report::render_error(&e, &ReportStyle::default()));
            return ExitCode::from(1);
        }
    };
    init_tracing(&app_config.logging.level);
    tracing::info!("{} starting", version::banner());

    let aggregator = SnapshotAggregator::new(SysinfoProvider::new());
    let interrupted = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
        tracing::info!("Received interrupt");
    };
    let code = app::run(
        &aggregator,
        &app_config.report,
        interrupted,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )
    .await;
    ExitCode::from(code)
}
