// NetBox REST API client modules
//
// Hand-written client for the handful of `dcim/` endpoints the export needs.
// List endpoints are wrapped in NetBox's `{ count, next, previous, results }`
// page envelope and are walked with offset/limit pagination.

pub mod client;
pub mod dcim;
pub mod models;

pub use client::NetboxClient;
