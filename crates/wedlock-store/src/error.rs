//! Error types for store operations

use thiserror::Error;

/// Why the store refused a state transition
///
/// None of these change state, except that an accept which finds either party
/// already married drops the stale proposal.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// A player tried to propose to or marry themselves
    #[error("a player cannot marry themselves")]
    SelfTarget,

    /// The proposing (or first) player already has a partner
    #[error("requester is already married")]
    RequesterAlreadyMarried,

    /// The proposed-to (or second) player already has a partner
    #[error("target is already married")]
    TargetAlreadyMarried,

    /// No proposal from that requester is waiting for that target
    #[error("no pending proposal from that player")]
    NoPendingProposal,

    /// The two players are not married to each other
    #[error("players are not married to each other")]
    NotMarried,
}

/// Errors writing or reading the snapshot
#[derive(Error, Debug)]
pub enum PersistError {
    /// File system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a valid snapshot document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The background writer has shut down
    #[error("snapshot writer is closed")]
    Closed,
}
