//! Maple application binary.
//!
//! ```text
//! parse flags → resolve Config → App::new → bootstrap → on_start
//!     → serve ──┐
//!               ├─ first to finish ends the process → on_terminate
//!     signal ───┘
//! ```

use clap::Parser;

use maple::cli::Cli;
use maple::App;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let (config, command) = cli.into_parts()?;

    let app = App::new(config);
    app.start(command).await?;

    Ok(())
}
