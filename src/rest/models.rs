use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub startup_state: &'static str,
    pub uptime_secs: u64,
    pub schema_version: Option<i64>,
}
