//! Shared utilities for integration tests.

use std::path::Path;
use std::time::Duration;

use maple::{App, Config, ServeConfig};
use tokio::net::TcpStream;

/// Build an app rooted in `dir` that serves on `addr`.
pub fn app_listening_on(dir: &Path, addr: &str) -> App {
    App::new(Config {
        data_dir: dir.join("data"),
        shutdown_timeout_secs: 2,
        serve: ServeConfig {
            http_addr: Some(addr.to_string()),
            ..Default::default()
        },
        ..Default::default()
    })
}

/// Poll until something accepts connections on `addr`.
pub async fn wait_for_listener(addr: &str) -> bool {
    for _ in 0..50 {
        if TcpStream::connect(addr).await.is_ok() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    false
}
