// Prometheus query API response types

use std::collections::HashMap;

use serde::Deserialize;

/// Envelope for `GET /api/v1/query`.
///
/// ```json
/// { "status": "success", "data": { "resultType": "vector", "result": [...] } }
/// { "status": "error", "errorType": "bad_data", "error": "parse error ..." }
/// ```
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub status: String,
    #[serde(default)]
    pub data: Option<QueryData>,
    #[serde(default, rename = "errorType")]
    pub error_type: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QueryData {
    #[serde(rename = "resultType")]
    pub result_type: String,
    #[serde(default)]
    pub result: Vec<Sample>,
}

/// One instant-vector sample: label set plus `[unix_seconds, "value"]`.
#[derive(Debug, Clone, Deserialize)]
pub struct Sample {
    #[serde(default)]
    pub metric: HashMap<String, String>,
    pub value: (f64, String),
}

impl Sample {
    pub fn label(&self, name: &str) -> Option<&str> {
        self.metric.get(name).map(String::as_str)
    }

    pub fn timestamp(&self) -> f64 {
        self.value.0
    }

    pub fn raw_value(&self) -> &str {
        &self.value.1
    }
}
