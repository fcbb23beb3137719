use std::net::{SocketAddr, SocketAddrV4};
use std::path::PathBuf;

use clap::Parser;

/// Car Photo Generator Server
#[derive(Debug, Parser)]
#[command(name = "carphoto", about = "Relay image generation requests to the OpenAI Images API")]
pub struct Args {
    /// Path to configuration file (defaults to ./carphoto.toml when present)
    #[arg(short, long, env = "CARPHOTO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Port to listen on, bound on all interfaces
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Override the full listen address; takes precedence over --port
    #[arg(long, env = "CARPHOTO_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Log filter directive
    #[arg(long, default_value = "info", env = "CARPHOTO_LOG")]
    pub log_level: String,
}

impl Args {
    /// Listen address requested on the command line or environment
    pub fn listen_override(&self) -> Option<SocketAddr> {
        self.listen
            .or_else(|| self.port.map(|port| SocketAddr::V4(SocketAddrV4::new([0, 0, 0, 0].into(), port))))
    }
}
