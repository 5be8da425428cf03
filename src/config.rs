use anyhow::{Context, Result};
use std::net::{Ipv4Addr, SocketAddr};

/// Port used when `PORT` is unset or empty.
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to listen on. The server always binds every interface.
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from environment variables (populated by dotenvy before this is called).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("PORT").filter(|p| !p.trim().is_empty()) {
            Some(p) => p
                .trim()
                .parse::<u16>()
                .with_context(|| format!("invalid PORT '{p}', expected 1-65535"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self { port })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(port: Option<&str>) -> Result<AppConfig> {
        AppConfig::from_lookup(|key| match key {
            "PORT" => port.map(str::to_owned),
            _ => None,
        })
    }

    #[test]
    fn defaults_to_8080() {
        assert_eq!(load(None).unwrap().port, 8080);
    }

    #[test]
    fn empty_port_falls_back_to_default() {
        assert_eq!(load(Some("")).unwrap().port, 8080);
    }

    #[test]
    fn port_override() {
        let config = load(Some("9090")).unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:9090");
    }

    #[test]
    fn invalid_port_is_an_error() {
        assert!(load(Some("http")).is_err());
        assert!(load(Some("70000")).is_err());
    }
}
