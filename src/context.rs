use crate::configuration::Configuration;

pub struct Context {
    pub config: Configuration,
}

impl Context {
    pub fn from_cli(cli: &crate::cli::Cli) -> Self {
        let cfg = Configuration {
            data_dir: cli.data_dir.clone(),
            api_listen: cli.api_listen,
            log_file: cli.log_file.clone(),
            reset: cli.reset,
        };
        Self { config: cfg }
    }
}
