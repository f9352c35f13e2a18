// Shared test helpers: a scripted MetricsProvider

#![allow(dead_code)]

use cpureport::error::ProviderError;
use cpureport::models::{CpuDescriptor, CpuTemperature, LoadSample};
use cpureport::provider::MetricsProvider;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn test_descriptor() -> CpuDescriptor {
    CpuDescriptor {
        model: "Test CPU".into(),
        vendor: "TestVendor".into(),
        base_speed_ghz: Some(3.2),
        physical_cores: Some(2),
        core_count: 4,
        per_core_speed_ghz: vec![3.2, 3.2, 3.4, 3.6],
    }
}

/// Returns queued load values in order; the last one repeats once the queue is drained.
pub struct FakeProvider {
    loads: Mutex<VecDeque<f64>>,
    last_load: Mutex<f64>,
    load_error: Option<ProviderError>,
    descriptor: Result<CpuDescriptor, ProviderError>,
    temperature: Result<CpuTemperature, ProviderError>,
    load_calls: AtomicUsize,
    descriptor_calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self {
            loads: Mutex::new(VecDeque::new()),
            last_load: Mutex::new(0.0),
            load_error: None,
            descriptor: Ok(test_descriptor()),
            temperature: Ok(CpuTemperature {
                main: Some(48.0),
                cores: vec![Some(45.5), Some(47.0)],
            }),
            load_calls: AtomicUsize::new(0),
            descriptor_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_loads(self, loads: &[f64]) -> Self {
        *self.loads.lock().unwrap() = loads.iter().copied().collect();
        self
    }

    pub fn with_descriptor(mut self, descriptor: CpuDescriptor) -> Self {
        self.descriptor = Ok(descriptor);
        self
    }

    pub fn with_temperature(mut self, temperature: CpuTemperature) -> Self {
        self.temperature = Ok(temperature);
        self
    }

    pub fn failing_static(mut self, err: ProviderError) -> Self {
        self.descriptor = Err(err);
        self
    }

    pub fn failing_temperature(mut self, err: ProviderError) -> Self {
        self.temperature = Err(err);
        self
    }

    pub fn failing_load(mut self, err: ProviderError) -> Self {
        self.load_error = Some(err);
        self
    }

    pub fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }

    pub fn descriptor_calls(&self) -> usize {
        self.descriptor_calls.load(Ordering::SeqCst)
    }
}

impl MetricsProvider for FakeProvider {
    async fn current_load(&self) -> Result<LoadSample, ProviderError> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(e) = &self.load_error {
            return Err(e.clone());
        }
        let mut last = self.last_load.lock().unwrap();
        if let Some(next) = self.loads.lock().unwrap().pop_front() {
            *last = next;
        }
        Ok(LoadSample {
            percent: *last,
            elapsed_ms: 1000,
        })
    }

    async fn cpu_descriptor(&self) -> Result<CpuDescriptor, ProviderError> {
        self.descriptor_calls.fetch_add(1, Ordering::SeqCst);
        self.descriptor.clone()
    }

    async fn cpu_temperature(&self) -> Result<CpuTemperature, ProviderError> {
        self.temperature.clone()
    }
}
