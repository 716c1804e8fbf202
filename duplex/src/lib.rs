//! One-to-one WebRTC calls over a websocket signaling relay.
//!
//! [`model`] is the wire schema shared by both sides and is always present.
//! The `server` feature adds the relay (`duplex::server`), the `client`
//! feature adds the call engine (`duplex::client`), and `full` enables both.
//!
//! ```
//! use duplex::model::ConnectionId;
//!
//! let id = ConnectionId::new();
//! assert_eq!(ConnectionId::parse(id.as_str()), Ok(id));
//! ```

pub use duplex_core::model::ConnectionId;

pub mod model {
    pub use duplex_core::model::*;
}

#[cfg(feature = "server")]
pub mod server {
    pub use duplex_server::*;
}

#[cfg(feature = "client")]
pub mod client {
    pub use duplex_client::*;
}
