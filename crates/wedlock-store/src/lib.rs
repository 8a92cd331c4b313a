//! Wedlock Storage Layer
//!
//! The in-memory authority over marriages, pending proposals and couple colors,
//! plus the JSON snapshot file that makes marriages survive a restart.
//!
//! # Architecture
//!
//! - [`RelationshipStore`] owns every collection behind one lock and performs
//!   all state transitions
//! - Every successful mutation that changes durable state is flushed through a
//!   [`SnapshotSink`] before the call returns
//! - [`JsonSnapshotFile`] is the sink that writes the snapshot file; its
//!   `load` never fails, a missing or corrupt file yields an empty snapshot
//!
//! # Examples
//!
//! ```
//! use wedlock_domain::PlayerId;
//! use wedlock_store::RelationshipStore;
//!
//! let store = RelationshipStore::in_memory();
//! let (alice, bob) = (PlayerId::new(), PlayerId::new());
//!
//! store.propose(alice, bob).unwrap();
//! store.accept(bob, alice).unwrap();
//!
//! assert!(store.are_married(alice, bob));
//! assert_eq!(store.couple_color(alice), store.couple_color(bob));
//! ```

#![warn(missing_docs)]

pub mod codec;
mod error;
mod metrics;
mod sink;
mod store;

pub use codec::JsonSnapshotFile;
pub use error::{PersistError, Rejection};
pub use metrics::StoreMetrics;
pub use sink::{NullSink, SnapshotSink};
pub use store::RelationshipStore;
