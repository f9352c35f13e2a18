// The assembled report snapshot

use serde::{Deserialize, Serialize};

use super::{LoadSample, Metric};

/// One fully assembled set of CPU metrics for a single report.
///
/// `free_percent` and `full_load_percent` are derived from the same sample as
/// `current_load_percent`, so `free_percent + current_load_percent == 100`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuSnapshot {
    pub model: String,
    pub vendor: String,
    #[serde(rename = "baseSpeedGHz")]
    pub base_speed_ghz: Metric<f64>,
    pub core_count: u32,
    pub physical_cores: Metric<u32>,
    pub current_load_percent: f64,
    pub average_load_percent: i64,
    pub temperature_celsius: Metric<f64>,
    pub free_percent: f64,
    #[serde(rename = "perCoreSpeedGHz")]
    pub per_core_speed_ghz: Vec<Metric<f64>>,
    pub full_load_percent: f64,
    /// The baseline load sample with its window.
    pub usage: LoadSample,
}
