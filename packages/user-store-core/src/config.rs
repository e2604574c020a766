//! Server configuration.

use std::net::{AddrParseError, IpAddr, SocketAddr};

/// Default TCP port when none is supplied.
pub const DEFAULT_PORT: u16 = 4000;

/// Default bind address.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on (0 = ephemeral)
    pub port: u16,
}

impl ServerConfig {
    /// Resolves host and port into a socket address.
    ///
    /// # Returns
    /// `Result<SocketAddr, AddrParseError>`, failing if the host is not an IP literal.
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let ip: IpAddr = self.host.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 4000);
        assert_eq!(
            config.socket_addr().unwrap(),
            "127.0.0.1:4000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_socket_addr_ip_literals_only() {
        let config = ServerConfig {
            host: "localhost".to_string(),
            ..Default::default()
        };
        assert!(config.socket_addr().is_err());

        let config = ServerConfig {
            host: "::1".to_string(),
            port: 8080,
        };
        assert_eq!(
            config.socket_addr().unwrap(),
            "[::1]:8080".parse::<SocketAddr>().unwrap()
        );
    }
}
