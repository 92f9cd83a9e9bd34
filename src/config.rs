//! Service configuration read from the environment

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::bus::DEFAULT_CAPACITY;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8088;

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "rocket_telemetry=info,tower_http=info";

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Event bus buffer size
    pub bus_capacity: usize,
    pub log_filter: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            bus_capacity: DEFAULT_CAPACITY,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Read `BIND_HOST`, `PORT`, `BUS_CAPACITY` and `RUST_LOG`
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = parse_or(lookup("BIND_HOST"), "BIND_HOST", defaults.host);
        let port = parse_or(lookup("PORT"), "PORT", defaults.port);
        let bus_capacity = match parse_or(
            lookup("BUS_CAPACITY"),
            "BUS_CAPACITY",
            defaults.bus_capacity,
        ) {
            0 => {
                eprintln!(
                    "BUS_CAPACITY must be at least 1, using {}",
                    defaults.bus_capacity
                );
                defaults.bus_capacity
            }
            n => n,
        };
        let log_filter = lookup("RUST_LOG")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.log_filter);

        Self {
            host,
            port,
            bus_capacity,
            log_filter,
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// Tracing is not initialised yet while the config is read, so warnings go to stderr
fn parse_or<T: std::str::FromStr>(raw: Option<String>, key: &str, default: T) -> T {
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            eprintln!("Ignoring invalid {}={:?}, using default", key, value);
            default
        }),
        None => default,
    }
}
