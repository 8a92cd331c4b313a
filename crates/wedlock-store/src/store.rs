//! The relationship state machine

use crate::codec;
use crate::{NullSink, Rejection, SnapshotSink, StoreMetrics};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use wedlock_domain::{ChatColor, ColorAllocator, Couple, Palette, PlayerId, Snapshot};

/// Everything guarded by the store lock
///
/// Statements that mutate more than one collection are never separated by an
/// early return, so the state is consistent whenever the lock is released.
#[derive(Debug)]
struct State {
    /// Partner lookup, both directions present for every couple
    partners: HashMap<PlayerId, PlayerId>,

    /// target -> requester, at most one live proposal per target
    proposals: HashMap<PlayerId, PlayerId>,

    /// Couple color keyed by canonical couple id
    colors: HashMap<PlayerId, ChatColor>,

    allocator: ColorAllocator,
    metrics: StoreMetrics,
}

impl State {
    fn new(palette: Palette) -> Self {
        Self {
            partners: HashMap::new(),
            proposals: HashMap::new(),
            colors: HashMap::new(),
            allocator: ColorAllocator::new(palette),
            metrics: StoreMetrics::new(),
        }
    }

    fn is_married(&self, player: PlayerId) -> bool {
        self.partners.contains_key(&player)
    }

    fn are_married(&self, a: PlayerId, b: PlayerId) -> bool {
        a != b && self.partners.get(&a) == Some(&b) && self.partners.get(&b) == Some(&a)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            marriages: self.partners.iter().map(|(k, v)| (*k, *v)).collect(),
            colors: self.colors.iter().map(|(k, v)| (*k, *v)).collect(),
        }
    }

    fn reject(&mut self, rejection: Rejection) -> Rejection {
        self.metrics.rejections += 1;
        rejection
    }
}

/// Authoritative in-memory state of marriages, proposals and couple colors
///
/// All operations take `&self` and run under a single mutex covering every
/// collection, so the store can be shared across threads behind an `Arc`.
/// Readers always observe a state from entirely before or entirely after a
/// concurrent mutation.
///
/// Mutations that change marriages or colors flush a snapshot through the
/// configured [`SnapshotSink`] before returning. A failed flush is logged and
/// counted but never fails the mutation: memory is the source of truth.
///
/// # Examples
///
/// ```
/// use wedlock_domain::PlayerId;
/// use wedlock_store::{RelationshipStore, Rejection};
///
/// let store = RelationshipStore::in_memory();
/// let (alice, bob) = (PlayerId::new(), PlayerId::new());
///
/// assert_eq!(store.propose(alice, alice), Err(Rejection::SelfTarget));
///
/// store.propose(alice, bob).unwrap();
/// assert!(store.has_pending_proposal(bob, alice));
///
/// let couple = store.accept(bob, alice).unwrap();
/// assert_eq!(store.partner(alice), Some(bob));
///
/// store.divorce(alice, bob).unwrap();
/// assert!(!store.is_married(alice));
/// # let _ = couple;
/// ```
pub struct RelationshipStore {
    state: Mutex<State>,
    sink: Arc<dyn SnapshotSink>,
}

impl RelationshipStore {
    /// Create an empty store that flushes to `sink` and colors couples from `palette`
    pub fn new(palette: Palette, sink: Arc<dyn SnapshotSink>) -> Self {
        Self {
            state: Mutex::new(State::new(palette)),
            sink,
        }
    }

    /// Create an empty store with the default palette and no persistence
    pub fn in_memory() -> Self {
        Self::new(Palette::default(), Arc::new(NullSink))
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // Every mutation leaves the state consistent, so a panic elsewhere
        // while holding the lock does not invalidate it.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Hand the current state to the sink; called with the lock held
    fn flush_locked(&self, state: &mut State) {
        match self.sink.flush(&state.snapshot()) {
            Ok(()) => state.metrics.flushes += 1,
            Err(e) => {
                state.metrics.flush_failures += 1;
                tracing::error!("Could not save marriage data: {}", e);
            }
        }
    }

    /// Record that `requester` proposed to `target`
    ///
    /// Replaces any unanswered proposal `target` was holding and returns that
    /// earlier requester so the host can tell them. The replacement itself is
    /// silent as far as the store is concerned.
    ///
    /// Proposals are not part of the snapshot, so nothing is flushed.
    ///
    /// # Errors
    ///
    /// [`Rejection::SelfTarget`], [`Rejection::RequesterAlreadyMarried`] or
    /// [`Rejection::TargetAlreadyMarried`].
    pub fn propose(
        &self,
        requester: PlayerId,
        target: PlayerId,
    ) -> Result<Option<PlayerId>, Rejection> {
        let mut state = self.lock();

        if requester == target {
            return Err(state.reject(Rejection::SelfTarget));
        }
        if state.is_married(requester) {
            return Err(state.reject(Rejection::RequesterAlreadyMarried));
        }
        if state.is_married(target) {
            return Err(state.reject(Rejection::TargetAlreadyMarried));
        }

        let previous = state
            .proposals
            .insert(target, requester)
            .filter(|earlier| *earlier != requester);

        state.metrics.proposals += 1;
        if let Some(earlier) = previous {
            state.metrics.proposals_overwritten += 1;
            tracing::debug!(
                "Proposal from {} to {} replaced one from {}",
                requester,
                target,
                earlier
            );
        } else {
            tracing::debug!("Proposal from {} to {}", requester, target);
        }

        Ok(previous)
    }

    /// True iff `target` holds a proposal from exactly `requester`
    pub fn has_pending_proposal(&self, target: PlayerId, requester: PlayerId) -> bool {
        self.lock().proposals.get(&target) == Some(&requester)
    }

    /// The requester of the proposal `target` is holding, if any
    pub fn pending_proposal_for(&self, target: PlayerId) -> Option<PlayerId> {
        self.lock().proposals.get(&target).copied()
    }

    /// `target` accepts the proposal from `requester`
    ///
    /// Marries the two, assigns the couple a color, drops the proposal and
    /// flushes.
    ///
    /// # Errors
    ///
    /// [`Rejection::NoPendingProposal`] when `target` holds no proposal from
    /// `requester` (nothing changes). [`Rejection::RequesterAlreadyMarried`] or
    /// [`Rejection::TargetAlreadyMarried`] when either married someone else
    /// since the proposal was made; the stale proposal is dropped.
    pub fn accept(&self, target: PlayerId, requester: PlayerId) -> Result<Couple, Rejection> {
        let mut state = self.lock();

        if state.proposals.get(&target) != Some(&requester) {
            return Err(state.reject(Rejection::NoPendingProposal));
        }
        if state.is_married(requester) {
            state.proposals.remove(&target);
            return Err(state.reject(Rejection::RequesterAlreadyMarried));
        }
        if state.is_married(target) {
            state.proposals.remove(&target);
            return Err(state.reject(Rejection::TargetAlreadyMarried));
        }

        let couple = self.marry_locked(&mut state, requester, target)?;
        state.metrics.accepted += 1;
        Ok(couple)
    }

    /// `target` turns down the proposal from `requester`
    ///
    /// Returns whether a matching proposal was removed. Calling it again is a
    /// no-op that returns `false`.
    pub fn deny(&self, target: PlayerId, requester: PlayerId) -> bool {
        let mut state = self.lock();

        if state.proposals.get(&target) != Some(&requester) {
            return false;
        }
        state.proposals.remove(&target);
        state.metrics.denied += 1;
        tracing::debug!("{} denied the proposal from {}", target, requester);
        true
    }

    /// Marry two players directly, without a proposal
    ///
    /// This is the step `accept` performs once a proposal matches; hosts may
    /// also use it for administrative marriages. Any proposals held by or sent
    /// by either partner are dropped.
    ///
    /// # Errors
    ///
    /// [`Rejection::SelfTarget`], [`Rejection::RequesterAlreadyMarried`] if `a`
    /// is married, [`Rejection::TargetAlreadyMarried`] if `b` is married.
    pub fn marry(&self, a: PlayerId, b: PlayerId) -> Result<Couple, Rejection> {
        let mut state = self.lock();
        self.marry_locked(&mut state, a, b)
    }

    fn marry_locked(
        &self,
        state: &mut State,
        a: PlayerId,
        b: PlayerId,
    ) -> Result<Couple, Rejection> {
        let couple = match Couple::new(a, b) {
            Some(couple) => couple,
            None => return Err(state.reject(Rejection::SelfTarget)),
        };
        if state.is_married(a) {
            return Err(state.reject(Rejection::RequesterAlreadyMarried));
        }
        if state.is_married(b) {
            return Err(state.reject(Rejection::TargetAlreadyMarried));
        }

        let color = state.allocator.next_color();
        state.partners.insert(a, b);
        state.partners.insert(b, a);
        state.colors.insert(couple.canonical_id(), color);
        state
            .proposals
            .retain(|target, requester| !couple.contains(*target) && !couple.contains(*requester));
        state.metrics.marriages += 1;

        tracing::debug!("{} and {} married (color {})", a, b, color);
        self.flush_locked(state);
        Ok(couple)
    }

    /// True iff `a` and `b` are each other's partner
    pub fn are_married(&self, a: PlayerId, b: PlayerId) -> bool {
        self.lock().are_married(a, b)
    }

    /// True iff `player` has any partner
    pub fn is_married(&self, player: PlayerId) -> bool {
        self.lock().is_married(player)
    }

    /// The partner of `player`, if married
    pub fn partner(&self, player: PlayerId) -> Option<PlayerId> {
        self.lock().partners.get(&player).copied()
    }

    /// The color of the couple `player` belongs to
    ///
    /// `None` when unmarried or when the couple never had a color assigned
    /// (possible for marriages restored from a file without one).
    pub fn couple_color(&self, player: PlayerId) -> Option<ChatColor> {
        let state = self.lock();
        let partner = state.partners.get(&player)?;
        let couple = Couple::new(player, *partner)?;
        state.colors.get(&couple.canonical_id()).copied()
    }

    /// Dissolve the marriage between `a` and `b`
    ///
    /// Removes both partner entries and the couple color, then flushes. The
    /// color allocator keeps its position.
    ///
    /// # Errors
    ///
    /// [`Rejection::NotMarried`] unless `a` and `b` are married to each other;
    /// nothing changes in that case.
    pub fn divorce(&self, a: PlayerId, b: PlayerId) -> Result<Couple, Rejection> {
        let mut state = self.lock();

        let couple = match Couple::new(a, b) {
            Some(couple) if state.are_married(a, b) => couple,
            _ => return Err(state.reject(Rejection::NotMarried)),
        };

        state.partners.remove(&a);
        state.partners.remove(&b);
        state.colors.remove(&couple.canonical_id());
        state.metrics.divorces += 1;

        tracing::debug!("{} and {} divorced", a, b);
        self.flush_locked(&mut state);
        Ok(couple)
    }

    /// Every couple with its color, ordered by canonical id
    pub fn couples(&self) -> Vec<(Couple, Option<ChatColor>)> {
        let state = self.lock();
        let mut couples: Vec<_> = state
            .partners
            .iter()
            .filter(|&(player, partner)| player < partner)
            .filter_map(|(player, partner)| Couple::new(*player, *partner))
            .map(|couple| (couple, state.colors.get(&couple.canonical_id()).copied()))
            .collect();
        couples.sort_by_key(|(couple, _)| *couple);
        couples
    }

    /// Copy of the durable part of the state
    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    /// Replace marriages and colors wholesale with those in `snapshot`
    ///
    /// Meant to run once at startup, before any other operation. Pending
    /// proposals are cleared. The snapshot is repaired first: one-sided
    /// marriage entries and colors that belong to no couple are dropped and
    /// logged. Nothing is flushed.
    pub fn adopt(&self, snapshot: Snapshot) {
        let (snapshot, repairs) = codec::sanitize(snapshot);
        for repair in &repairs {
            tracing::warn!("Repaired marriage data: {}", repair);
        }

        let mut state = self.lock();
        state.partners = snapshot.marriages.into_iter().collect();
        state.colors = snapshot.colors.into_iter().collect();
        state.proposals.clear();
    }

    /// Flush the current state through the sink, e.g. on shutdown
    pub fn flush(&self) {
        let mut state = self.lock();
        self.flush_locked(&mut state);
    }

    /// Copy of the operation counters
    pub fn metrics(&self) -> StoreMetrics {
        self.lock().metrics.clone()
    }

    /// Index of the palette color the next marriage will receive
    pub fn allocator_cursor(&self) -> usize {
        self.lock().allocator.cursor()
    }
}

impl std::fmt::Debug for RelationshipStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("RelationshipStore")
            .field("married_players", &state.partners.len())
            .field("pending_proposals", &state.proposals.len())
            .field("allocator_cursor", &state.allocator.cursor())
            .finish()
    }
}
