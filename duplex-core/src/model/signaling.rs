use crate::model::connection::ConnectionId;
use crate::model::ice::{IceCandidate, IceServerConfig};
use crate::model::session::SessionDescription;
use serde::{Deserialize, Serialize};

/// Frames an endpoint sends to the relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum ClientMessage {
    CallUser {
        offer: SessionDescription,
        target: ConnectionId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caller: Option<ConnectionId>,
    },
    AnswerCall {
        answer: SessionDescription,
        target: ConnectionId,
    },
    IceCandidate {
        candidate: IceCandidate,
        target: ConnectionId,
    },
}

impl ClientMessage {
    pub fn target(&self) -> &ConnectionId {
        match self {
            Self::CallUser { target, .. }
            | Self::AnswerCall { target, .. }
            | Self::IceCandidate { target, .. } => target,
        }
    }

    /// Attaches transport-level sender information. A candidate's sender is
    /// always the connection it arrived on; an offer without an explicit
    /// caller is attributed to that connection too.
    pub fn into_envelope(self, sender: &ConnectionId) -> SignalingEnvelope {
        match self {
            Self::CallUser {
                offer,
                target,
                caller,
            } => SignalingEnvelope::CallOffer {
                offer,
                target,
                caller: caller.unwrap_or_else(|| sender.clone()),
            },
            Self::AnswerCall { answer, target } => SignalingEnvelope::CallAnswer { answer, target },
            Self::IceCandidate { candidate, target } => SignalingEnvelope::IceCandidate {
                candidate,
                target,
                sender: sender.clone(),
            },
        }
    }
}

/// Frames the relay sends to an endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum ServerMessage {
    Welcome {
        id: ConnectionId,
        #[serde(default)]
        ice_servers: Vec<IceServerConfig>,
    },
    IncomingCall {
        offer: SessionDescription,
        caller: ConnectionId,
    },
    CallAnswered {
        answer: SessionDescription,
    },
    IceCandidate {
        candidate: IceCandidate,
        from: ConnectionId,
    },
}

/// A routed signaling message. Every envelope names exactly one target.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalingEnvelope {
    CallOffer {
        offer: SessionDescription,
        target: ConnectionId,
        caller: ConnectionId,
    },
    CallAnswer {
        answer: SessionDescription,
        target: ConnectionId,
    },
    IceCandidate {
        candidate: IceCandidate,
        target: ConnectionId,
        sender: ConnectionId,
    },
}

impl SignalingEnvelope {
    pub fn target(&self) -> &ConnectionId {
        match self {
            Self::CallOffer { target, .. }
            | Self::CallAnswer { target, .. }
            | Self::IceCandidate { target, .. } => target,
        }
    }

    pub fn into_server_message(self) -> ServerMessage {
        match self {
            Self::CallOffer { offer, caller, .. } => ServerMessage::IncomingCall { offer, caller },
            Self::CallAnswer { answer, .. } => ServerMessage::CallAnswered { answer },
            Self::IceCandidate {
                candidate, sender, ..
            } => ServerMessage::IceCandidate {
                candidate,
                from: sender,
            },
        }
    }
}
