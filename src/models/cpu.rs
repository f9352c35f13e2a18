// Provider read results

use serde::{Deserialize, Serialize};

/// One aggregate load reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadSample {
    /// Load in percent, [0, 100].
    pub percent: f64,
    /// Length of the window the reading covers (since the previous sample).
    pub elapsed_ms: u64,
}

/// Static CPU identity plus per-core clocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuDescriptor {
    pub model: String,
    pub vendor: String,
    /// `None` when the host does not report a base clock.
    pub base_speed_ghz: Option<f64>,
    pub physical_cores: Option<u32>,
    /// Logical processor count.
    pub core_count: u32,
    /// Current clock per logical CPU; 0.0 where the host reports none.
    pub per_core_speed_ghz: Vec<f64>,
}

/// Sensor readings in degrees Celsius. `None` means the sensor omitted the field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuTemperature {
    pub main: Option<f64>,
    pub cores: Vec<Option<f64>>,
}
