// Domain models: provider reads and the report snapshot

mod cpu;
mod metric;
mod snapshot;

pub use cpu::{CpuDescriptor, CpuTemperature, LoadSample};
pub use metric::{Metric, UNAVAILABLE};
pub use snapshot::CpuSnapshot;
