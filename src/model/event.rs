/// One access-control event recorded against an endpoint.
///
/// `id` is `None` until the store assigns an identity on insert; it is never
/// reassigned afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: Option<i64>,
    pub endpoint_id: i64,
    /// Unix seconds.
    pub timestamp: i64,
    pub event_type: String,
    /// Opaque driver payload, typically JSON.
    pub data: String,
}

impl Event {
    pub fn new(endpoint_id: i64, timestamp: i64, event_type: &str, data: &str) -> Self {
        Self {
            id: None,
            endpoint_id,
            timestamp,
            event_type: event_type.to_string(),
            data: data.to_string(),
        }
    }
}
