use duplex_core::IceServerConfig;
use std::net::SocketAddr;

pub const DEFAULT_PORT: u16 = 9000;

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub bind: SocketAddr,
    /// Handed to every endpoint in its `welcome` frame.
    pub ice_servers: Vec<IceServerConfig>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            ice_servers: IceServerConfig::default_stun(),
        }
    }
}
