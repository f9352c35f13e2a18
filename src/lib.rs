// Library for tests to access modules

pub mod aggregator;
pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod provider;
pub mod report;
pub mod version;
