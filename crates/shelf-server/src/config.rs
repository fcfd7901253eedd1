use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings every worker needs to serve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address shared by all workers.
    pub bind_addr: SocketAddr,
    /// Catalog database file, seeded by the coordinator.
    pub db_path: PathBuf,
    /// Listen backlog per worker socket.
    pub backlog: i32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            db_path: PathBuf::from("books.db"),
            backlog: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(c.db_path, PathBuf::from("books.db"));
        assert_eq!(c.backlog, 1024);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let c: ServerConfig = serde_json::from_str(r#"{"db_path":"/tmp/x.db"}"#).unwrap();
        assert_eq!(c.db_path, PathBuf::from("/tmp/x.db"));
        assert_eq!(c.bind_addr.port(), 8080);
    }
}
