use duplex_core::IceServerConfig;

/// What to do with a remote ICE candidate that arrives before the remote
/// description it belongs to has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CandidatePolicy {
    /// Queue it and apply it right after the remote description is set.
    #[default]
    Buffer,
    /// Try to apply it immediately; log and discard on failure.
    Drop,
}

/// Upper bound on early remote candidates held under [`CandidatePolicy::Buffer`].
pub const DEFAULT_MAX_BUFFERED_CANDIDATES: usize = 256;

#[derive(Debug, Clone)]
pub struct CallConfig {
    pub candidate_policy: CandidatePolicy,
    /// Early candidates past this many are discarded.
    pub max_buffered_candidates: usize,
    /// Used for peer connections until the relay's welcome frame says
    /// otherwise.
    pub ice_servers: Vec<IceServerConfig>,
}

impl Default for CallConfig {
    fn default() -> Self {
        Self {
            candidate_policy: CandidatePolicy::default(),
            max_buffered_candidates: DEFAULT_MAX_BUFFERED_CANDIDATES,
            ice_servers: IceServerConfig::default_stun(),
        }
    }
}
