//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Settings the HTTP server is started with.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
}
