use std::net::SocketAddr;

#[derive(Clone)]
pub struct Configuration {
    pub data_dir: String,
    pub api_listen: SocketAddr,
    pub log_file: Option<String>,
    pub reset: bool,
}
