//! Counters for store operations

/// Operation counters kept alongside the store state
///
/// Read them with [`RelationshipStore::metrics`](crate::RelationshipStore::metrics);
/// the returned value is a copy taken under the store lock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreMetrics {
    /// Proposals recorded
    pub proposals: usize,

    /// Proposals that replaced an unanswered one to the same target
    pub proposals_overwritten: usize,

    /// Proposals accepted
    pub accepted: usize,

    /// Proposals denied
    pub denied: usize,

    /// Marriages created (through accept or directly)
    pub marriages: usize,

    /// Marriages dissolved
    pub divorces: usize,

    /// Operations refused with a [`Rejection`](crate::Rejection)
    pub rejections: usize,

    /// Snapshots handed to the sink successfully
    pub flushes: usize,

    /// Snapshots the sink failed to persist
    pub flush_failures: usize,
}

impl StoreMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let lines = [
            "Relationship Store Metrics".to_string(),
            format!(
                "  Proposals: {} ({} overwritten)",
                self.proposals, self.proposals_overwritten
            ),
            format!("  Accepted: {}, denied: {}", self.accepted, self.denied),
            format!("  Marriages: {}, divorces: {}", self.marriages, self.divorces),
            format!("  Rejections: {}", self.rejections),
            format!(
                "  Flushes: {} ok, {} failed",
                self.flushes, self.flush_failures
            ),
        ];
        lines.join("\n")
    }
}
