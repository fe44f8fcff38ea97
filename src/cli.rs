use std::net::SocketAddr;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Access-control event logging backend",
    long_about = "Records access-control events against configured endpoints in a local SQLite database.\n\nEnvironment:\n  PORTIER_DATA_DIR      Directory holding the database (default ./data)\n"
)]
pub struct Cli {
    #[arg(
        long,
        default_value = "./data",
        value_name = "DIR",
        env = "PORTIER_DATA_DIR",
        help = "Directory holding the SQLite database"
    )]
    pub data_dir: String,

    #[arg(
        long,
        default_value = "127.0.0.1:3000",
        value_name = "ADDR",
        help = "Listen address for the diagnostics API"
    )]
    pub api_listen: SocketAddr,

    #[arg(long, value_name = "FILE", help = "Mirror logs to FILE in addition to stderr")]
    pub log_file: Option<String>,

    #[arg(
        long,
        default_value_t = false,
        help = "Delete the database before starting for a clean slate"
    )]
    pub reset: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}
