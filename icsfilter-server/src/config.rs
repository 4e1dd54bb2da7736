//! Command-line configuration

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "icsfilter-server")]
#[command(about = "Serve remote calendars with unwanted events removed", version)]
pub struct Config {
    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Timeout for fetching a remote calendar, in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}
