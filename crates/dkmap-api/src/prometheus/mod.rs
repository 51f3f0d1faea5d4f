// Prometheus HTTP API client
//
// Only instant queries are needed: the export asks for the `up` metric once
// per run to learn which scrape jobs are currently reporting.

pub mod client;
pub mod models;

pub use client::PrometheusClient;
