// Snapshot aggregation: a fixed set of provider reads folded into one CpuSnapshot.

use crate::error::SnapshotError;
use crate::models::{CpuDescriptor, CpuSnapshot, LoadSample, Metric};
use crate::provider::MetricsProvider;
use std::future::Future;
use tokio::time::Duration;
use tracing::{debug, instrument};

/// Wall-clock gap between the two load samples of the average.
pub const AVERAGE_WINDOW: Duration = Duration::from_millis(1000);

/// Static part of a snapshot, as returned by [`SnapshotAggregator::read_static`].
#[derive(Debug, Clone, PartialEq)]
pub struct StaticInfo {
    pub model: String,
    pub vendor: String,
    pub base_speed_ghz: Metric<f64>,
    pub core_count: u32,
    pub physical_cores: Metric<u32>,
    pub per_core_speed_ghz: Vec<Metric<f64>>,
}

/// `100 - floor(t1 - t0)`. Kept bit-for-bit with the historical report output.
pub fn average_load_percent(t0: f64, t1: f64) -> i64 {
    (100.0 - (t1 - t0).floor()) as i64
}

/// A clock reading in GHz; zero, negative and non-finite readings mean the host does not know it.
pub fn speed_metric(ghz: Option<f64>) -> Metric<f64> {
    ghz.filter(|v| v.is_finite() && *v > 0.0).into()
}

/// Free share of a load sample.
pub fn free_percent(load_percent: f64) -> f64 {
    100.0 - load_percent
}

pub struct SnapshotAggregator<P> {
    provider: P,
}

impl<P: MetricsProvider> SnapshotAggregator<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub async fn read_load(&self) -> Result<f64, SnapshotError> {
        Ok(self.sample_load().await?.percent)
    }

    /// Same sample semantics as [`read_load`](Self::read_load).
    pub async fn read_full_load(&self) -> Result<f64, SnapshotError> {
        self.read_load().await
    }

    pub async fn read_free(&self) -> Result<f64, SnapshotError> {
        Ok(free_percent(self.read_load().await?))
    }

    /// Sample, wait [`AVERAGE_WINDOW`], sample again; see [`average_load_percent`].
    pub async fn read_average_load(&self) -> Result<i64, SnapshotError> {
        let (_, average) = self.measure_window(std::future::pending()).await?;
        Ok(average)
    }

    /// First core's temperature. Never fails; anything missing is `Unavailable`.
    #[instrument(skip(self))]
    pub async fn read_temperature(&self) -> Metric<f64> {
        match self.provider.cpu_temperature().await {
            Ok(t) => t
                .cores
                .first()
                .copied()
                .flatten()
                .filter(|c| c.is_finite())
                .into(),
            Err(e) => {
                debug!(error = %e, "temperature read failed; reporting unavailable");
                Metric::Unavailable
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn read_static(&self) -> Result<StaticInfo, SnapshotError> {
        let descriptor = self
            .provider
            .cpu_descriptor()
            .await
            .map_err(SnapshotError::Static)?;
        static_info(descriptor)
    }

    pub async fn build_snapshot(&self) -> Result<CpuSnapshot, SnapshotError> {
        self.build_snapshot_until(std::future::pending()).await
    }

    /// Like [`build_snapshot`](Self::build_snapshot), but fails with
    /// [`SnapshotError::Cancelled`] if `cancel` resolves during the averaging window.
    #[instrument(skip_all)]
    pub async fn build_snapshot_until<F>(&self, cancel: F) -> Result<CpuSnapshot, SnapshotError>
    where
        F: Future<Output = ()>,
    {
        let (static_info, temperature) = tokio::join!(self.read_static(), self.read_temperature());
        let static_info = static_info?;
        debug!(
            model = %static_info.model,
            core_count = static_info.core_count,
            temperature_available = temperature.is_available(),
            "static reads done"
        );

        let (sample, average_load_percent) = self.measure_window(cancel).await?;
        debug!(
            load_percent = sample.percent,
            average_load_percent, "load window measured"
        );

        Ok(CpuSnapshot {
            model: static_info.model,
            vendor: static_info.vendor,
            base_speed_ghz: static_info.base_speed_ghz,
            core_count: static_info.core_count,
            physical_cores: static_info.physical_cores,
            current_load_percent: sample.percent,
            average_load_percent,
            temperature_celsius: temperature,
            free_percent: free_percent(sample.percent),
            per_core_speed_ghz: static_info.per_core_speed_ghz,
            full_load_percent: sample.percent,
            usage: sample,
        })
    }

    async fn sample_load(&self) -> Result<LoadSample, SnapshotError> {
        self.provider
            .current_load()
            .await
            .map_err(SnapshotError::Load)
    }

    /// Returns the baseline sample and the average over the window.
    async fn measure_window<F>(&self, cancel: F) -> Result<(LoadSample, i64), SnapshotError>
    where
        F: Future<Output = ()>,
    {
        let start = self.sample_load().await?;
        tokio::select! {
            _ = tokio::time::sleep(AVERAGE_WINDOW) => {}
            _ = cancel => return Err(SnapshotError::Cancelled),
        }
        let end = self.sample_load().await?;
        Ok((start, average_load_percent(start.percent, end.percent)))
    }
}

fn static_info(descriptor: CpuDescriptor) -> Result<StaticInfo, SnapshotError> {
    if descriptor.model.trim().is_empty() {
        return Err(SnapshotError::InvalidDescriptor("empty CPU model".into()));
    }
    if descriptor.core_count == 0 {
        return Err(SnapshotError::InvalidDescriptor(
            "host reports zero logical cores".into(),
        ));
    }
    let speeds = descriptor.per_core_speed_ghz.len();
    if speeds != 0 && speeds != descriptor.core_count as usize {
        tracing::warn!(
            core_count = descriptor.core_count,
            speeds,
            "per-core speed list does not match core count; reporting unavailable"
        );
    }
    let per_core_speed_ghz = if speeds != descriptor.core_count as usize {
        vec![Metric::Unavailable]
    } else {
        descriptor
            .per_core_speed_ghz
            .into_iter()
            .map(|v| speed_metric(Some(v)))
            .collect()
    };
    Ok(StaticInfo {
        model: descriptor.model,
        vendor: descriptor.vendor,
        base_speed_ghz: speed_metric(descriptor.base_speed_ghz),
        core_count: descriptor.core_count,
        physical_cores: descriptor.physical_cores.into(),
        per_core_speed_ghz,
    })
}
