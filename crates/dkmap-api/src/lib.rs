// dkmap-api: Async clients for the NetBox inventory and Prometheus monitoring APIs

pub mod error;
pub mod netbox;
pub mod prometheus;
pub mod transport;

pub use error::Error;
pub use netbox::NetboxClient;
pub use prometheus::PrometheusClient;
pub use transport::TransportConfig;
