/// A physical access point (door controller, reader) events are logged
/// against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub id: Option<i64>,
    pub name: String,
    pub address: String,
}

impl Endpoint {
    pub fn new(name: &str, address: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            address: address.to_string(),
        }
    }
}
