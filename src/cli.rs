//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{self, validate_config, Config, ConfigError};

#[derive(Parser, Debug)]
#[command(name = "maple", version, about = "Maple CLI", long_about = None)]
#[command(subcommand_required = true, arg_required_else_help = true)]
pub struct Cli {
    /// The Maple data directory
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    /// Enable dev mode, aka. printing debug logs to the console
    #[arg(long, global = true)]
    pub dev: bool,

    /// Optional TOML config file; flags override its values
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Starts the web server (default to 127.0.0.1:8090 if no domain is specified)
    Serve(ServeArgs),
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Domain(s) to serve; switches the default listen address to 0.0.0.0:80
    pub domains: Vec<String>,

    /// TCP address to listen for the HTTP server
    #[arg(long = "http")]
    pub http_addr: Option<String>,

    /// CORS allowed domain origins list
    #[arg(long, value_delimiter = ',')]
    pub origins: Vec<String>,
}

impl Cli {
    /// Resolve the effective configuration and the command to run.
    pub fn into_parts(self) -> Result<(Config, Command), ConfigError> {
        let mut config = match &self.config {
            Some(path) => config::load_config(path)?,
            None => Config::default(),
        };

        if let Some(dir) = self.dir {
            config.data_dir = dir;
        }
        if self.dev {
            config.is_dev = true;
        }

        match &self.command {
            Command::Serve(args) => {
                if let Some(addr) = &args.http_addr {
                    config.serve.http_addr = Some(addr.clone());
                }
                if !args.origins.is_empty() {
                    config.serve.allowed_origins = args.origins.clone();
                }
            }
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok((config, self.command))
    }
}
