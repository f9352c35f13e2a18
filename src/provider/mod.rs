// Metrics provider seam and the sysinfo-backed implementation

pub mod linux;

use crate::error::ProviderError;
use crate::models::{CpuDescriptor, CpuTemperature, LoadSample};
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use sysinfo::{Components, System};
use tracing::instrument;

/// Point-in-time CPU reads. Implementations are read-only from the caller's view.
pub trait MetricsProvider: Send + Sync {
    /// Aggregate load since the previous call.
    fn current_load(&self) -> impl Future<Output = Result<LoadSample, ProviderError>> + Send;

    fn cpu_descriptor(&self) -> impl Future<Output = Result<CpuDescriptor, ProviderError>> + Send;

    fn cpu_temperature(
        &self,
    ) -> impl Future<Output = Result<CpuTemperature, ProviderError>> + Send;
}

impl<P: MetricsProvider> MetricsProvider for Arc<P> {
    fn current_load(&self) -> impl Future<Output = Result<LoadSample, ProviderError>> + Send {
        (**self).current_load()
    }

    fn cpu_descriptor(&self) -> impl Future<Output = Result<CpuDescriptor, ProviderError>> + Send {
        (**self).cpu_descriptor()
    }

    fn cpu_temperature(
        &self,
    ) -> impl Future<Output = Result<CpuTemperature, ProviderError>> + Send {
        (**self).cpu_temperature()
    }
}

/// Static CPU identity; read once when the provider is built.
#[derive(Debug, Clone)]
struct CpuIdentity {
    model: String,
    vendor: String,
    base_speed_ghz: Option<f64>,
    physical_cores: Option<u32>,
}

pub struct SysinfoProvider {
    sys: Arc<Mutex<System>>,
    components: Arc<Mutex<Components>>,
    last_cpu_refresh: Arc<Mutex<Instant>>,
    identity: CpuIdentity,
}

impl Default for SysinfoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoProvider {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_all();
        let components = Components::new_with_refreshed_list();
        let identity = read_identity(&sys);
        tracing::debug!(
            model = %identity.model,
            vendor = %identity.vendor,
            base_speed_ghz = ?identity.base_speed_ghz,
            "CPU identity read"
        );
        Self {
            sys: Arc::new(Mutex::new(sys)),
            components: Arc::new(Mutex::new(components)),
            last_cpu_refresh: Arc::new(Mutex::new(Instant::now())),
            identity,
        }
    }

    /// Time still to wait before a CPU refresh yields a meaningful usage value.
    fn refresh_backoff(&self) -> std::time::Duration {
        match self.last_cpu_refresh.lock() {
            Ok(last) => sysinfo::MINIMUM_CPU_UPDATE_INTERVAL.saturating_sub(last.elapsed()),
            Err(_) => sysinfo::MINIMUM_CPU_UPDATE_INTERVAL,
        }
    }
}

fn read_identity(sys: &System) -> CpuIdentity {
    let first = sys.cpus().first();
    let model = linux::read_cpu_model()
        .or_else(|| {
            first
                .map(|c| c.brand().trim().to_string())
                .filter(|s| !s.is_empty())
        })
        .or_else(|| {
            first
                .map(|c| c.name().to_string())
                .filter(|s| !s.is_empty() && s != "cpu0")
        })
        .unwrap_or_else(|| "Unknown".into());
    let vendor = first
        .map(|c| c.vendor_id().trim().to_string())
        .unwrap_or_default();
    let base_speed_ghz = linux::read_base_speed_ghz()
        .or_else(|| {
            first
                .map(|c| c.frequency())
                .filter(|&mhz| mhz > 0)
                .map(mhz_to_ghz)
        });
    CpuIdentity {
        model,
        vendor,
        base_speed_ghz,
        physical_cores: System::physical_core_count().map(|n| n as u32),
    }
}

fn mhz_to_ghz(mhz: u64) -> f64 {
    mhz as f64 / 1000.0
}

fn is_core_sensor(label: &str) -> bool {
    label.to_lowercase().contains("core")
}

fn is_package_sensor(label: &str) -> bool {
    let label = label.to_lowercase();
    ["package", "tctl", "tdie", "cpu"]
        .iter()
        .any(|k| label.contains(k))
}

/// Split raw `(label, reading)` pairs into a per-core list and a package reading.
/// Without any per-core sensor the package reading stands in as the only core.
pub fn classify_sensors<'a>(
    readings: impl IntoIterator<Item = (&'a str, Option<f32>)>,
) -> CpuTemperature {
    let mut main = None;
    let mut cores = Vec::new();
    for (label, temp) in readings {
        let temp = temp.map(f64::from).filter(|t| t.is_finite());
        if is_core_sensor(label) {
            cores.push(temp);
        } else if main.is_none() && is_package_sensor(label) {
            main = temp;
        }
    }
    if cores.is_empty()
        && let Some(t) = main
    {
        cores.push(Some(t));
    }
    CpuTemperature { main, cores }
}

impl MetricsProvider for SysinfoProvider {
    #[instrument(skip(self), fields(provider = "sysinfo", operation = "current_load"))]
    async fn current_load(&self) -> Result<LoadSample, ProviderError> {
        let wait = self.refresh_backoff();
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
        let sys = self.sys.clone();
        let last_cpu_refresh = self.last_cpu_refresh.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| ProviderError::Backend(format!("sysinfo lock poisoned: {}", e)))?;
            let mut last = last_cpu_refresh
                .lock()
                .map_err(|e| ProviderError::Backend(format!("refresh clock poisoned: {}", e)))?;
            sys.refresh_cpu_usage();
            let now = Instant::now();
            let elapsed_ms = now.duration_since(*last).as_millis() as u64;
            *last = now;
            let percent = (sys.global_cpu_usage() as f64).clamp(0.0, 100.0);
            Ok(LoadSample {
                percent,
                elapsed_ms,
            })
        })
        .await
        .map_err(|e| ProviderError::Backend(format!("sysinfo task join: {}", e)))?
    }

    #[instrument(skip(self), fields(provider = "sysinfo", operation = "cpu_descriptor"))]
    async fn cpu_descriptor(&self) -> Result<CpuDescriptor, ProviderError> {
        let sys = self.sys.clone();
        let identity = self.identity.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| ProviderError::Backend(format!("sysinfo lock poisoned: {}", e)))?;
            sys.refresh_cpu_frequency();
            let per_core_speed_ghz: Vec<f64> =
                sys.cpus().iter().map(|c| mhz_to_ghz(c.frequency())).collect();
            if per_core_speed_ghz.is_empty() {
                return Err(ProviderError::Unsupported("logical CPU list"));
            }
            Ok(CpuDescriptor {
                model: identity.model,
                vendor: identity.vendor,
                base_speed_ghz: identity.base_speed_ghz,
                physical_cores: identity.physical_cores,
                core_count: per_core_speed_ghz.len() as u32,
                per_core_speed_ghz,
            })
        })
        .await
        .map_err(|e| ProviderError::Backend(format!("sysinfo task join: {}", e)))?
    }

    #[instrument(skip(self), fields(provider = "sysinfo", operation = "cpu_temperature"))]
    async fn cpu_temperature(&self) -> Result<CpuTemperature, ProviderError> {
        let components = self.components.clone();
        tokio::task::spawn_blocking(move || {
            let mut components = components.lock().map_err(|e| {
                ProviderError::Backend(format!("sysinfo components lock poisoned: {}", e))
            })?;
            components.refresh(false);
            let readings = components.list().iter().map(|c| (c.label(), c.temperature()));
            Ok(classify_sensors(readings))
        })
        .await
        .map_err(|e| ProviderError::Backend(format!("sysinfo task join: {}", e)))?
    }
}
