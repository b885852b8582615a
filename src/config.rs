use crate::fetch::FetchSettings;
use crate::session::SESSION_TTL;
use crate::thumbnail::THUMBNAIL_SIZE;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the web server listens on.
    pub bind_addr: SocketAddr,
    pub fetch: FetchSettings,
    /// Edge of the square box thumbnails are shrunk into.
    pub thumbnail_size: u32,
    /// Largest accepted upload body, in bytes.
    pub upload_limit: usize,
    /// Idle time after which a session and its cached images are dropped.
    pub session_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
            fetch: FetchSettings::default(),
            thumbnail_size: THUMBNAIL_SIZE,
            upload_limit: 16 * 1024 * 1024,
            session_ttl: SESSION_TTL,
        }
    }
}

impl Config {
    /// Build a config from positional command-line arguments.
    ///
    /// The only recognised argument is an optional bind address
    /// (`website 0.0.0.0:8080`). An unparsable address falls back to the
    /// default with a warning.
    pub fn from_args(args: &[String]) -> Self {
        let mut config = Config::default();

        if let Some(addr) = args.get(1) {
            match addr.parse() {
                Ok(addr) => config.bind_addr = addr,
                Err(_) => log::warn!(
                    "Ignoring invalid bind address '{}', using {}",
                    addr,
                    config.bind_addr
                ),
            }
        }

        config
    }
}
