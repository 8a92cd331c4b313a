//! Integration tests for wedlock-store
//!
//! These tests drive the store through the proposal and marriage lifecycles.

use proptest::prelude::*;
use std::sync::Arc;
use std::thread;
use wedlock_domain::{ChatColor, Palette, PlayerId};
use wedlock_store::{NullSink, Rejection, RelationshipStore};

fn wed(store: &RelationshipStore, a: PlayerId, b: PlayerId) {
    store.propose(a, b).unwrap();
    store.accept(b, a).unwrap();
}

#[test]
fn test_propose_accept_divorce_scenario() {
    let store = RelationshipStore::in_memory();
    let alice = PlayerId::new();
    let bob = PlayerId::new();

    wed(&store, alice, bob);
    assert!(store.are_married(alice, bob));
    assert!(store.are_married(bob, alice));
    let cursor = store.allocator_cursor();

    store.divorce(alice, bob).unwrap();
    assert!(!store.is_married(alice));
    assert!(!store.is_married(bob));
    assert_eq!(store.couple_color(alice), None);
    assert_eq!(store.couple_color(bob), None);
    assert_eq!(store.allocator_cursor(), cursor, "divorce must not rewind the cursor");
}

#[test]
fn test_overwritten_proposal_is_gone_after_deny() {
    let store = RelationshipStore::in_memory();
    let (a, b, c) = (PlayerId::new(), PlayerId::new(), PlayerId::new());

    store.propose(a, b).unwrap();
    store.propose(c, b).unwrap();
    assert!(store.deny(b, c));

    assert!(!store.has_pending_proposal(b, a));
    assert!(!store.has_pending_proposal(b, c));
    assert_eq!(store.accept(b, a), Err(Rejection::NoPendingProposal));
}

#[test]
fn test_color_rotation_wraps_after_palette() {
    let store = RelationshipStore::in_memory();
    let palette = Palette::default();
    let mut colors = Vec::new();

    for _ in 0..=palette.len() {
        let (a, b) = (PlayerId::new(), PlayerId::new());
        wed(&store, a, b);
        colors.push(store.couple_color(a).unwrap());
    }

    assert_eq!(&colors[..palette.len()], palette.colors());
    assert_eq!(colors[palette.len()], colors[0]);
}

#[test]
fn test_custom_palette() {
    let palette = Palette::new(vec![ChatColor::Red, ChatColor::Blue]).unwrap();
    let store = RelationshipStore::new(palette, Arc::new(NullSink));
    let players: Vec<PlayerId> = (0..6).map(|_| PlayerId::new()).collect();

    for pair in players.chunks(2) {
        wed(&store, pair[0], pair[1]);
    }

    assert_eq!(store.couple_color(players[0]), Some(ChatColor::Red));
    assert_eq!(store.couple_color(players[2]), Some(ChatColor::Blue));
    assert_eq!(store.couple_color(players[5]), Some(ChatColor::Red));
}

#[test]
fn test_monogamy_holds_without_caller_checks() {
    let store = RelationshipStore::in_memory();
    let (a, b, c) = (PlayerId::new(), PlayerId::new(), PlayerId::new());

    // c proposes to a before a marries b
    store.propose(c, a).unwrap();
    wed(&store, a, b);

    assert_eq!(store.accept(a, c), Err(Rejection::NoPendingProposal));
    assert_eq!(store.marry(c, a), Err(Rejection::TargetAlreadyMarried));
    assert_eq!(store.partner(a), Some(b));
    assert_eq!(store.partner(c), None);
}

#[test]
fn test_concurrent_readers_see_consistent_state() {
    let store = Arc::new(RelationshipStore::in_memory());
    let couples: Vec<(PlayerId, PlayerId)> =
        (0..32).map(|_| (PlayerId::new(), PlayerId::new())).collect();

    let writer = {
        let store = Arc::clone(&store);
        let couples = couples.clone();
        thread::spawn(move || {
            for _ in 0..20 {
                for &(a, b) in &couples {
                    store.marry(a, b).unwrap();
                }
                for &(a, b) in &couples {
                    store.divorce(a, b).unwrap();
                }
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            let couples = couples.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    let snapshot = store.snapshot();
                    for &(a, b) in &couples {
                        let married = snapshot.marriages.get(&a) == Some(&b);
                        assert_eq!(married, snapshot.marriages.get(&b) == Some(&a));
                        assert_eq!(married, snapshot.color_of(a).is_some());
                    }
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    assert!(store.couples().is_empty());
    assert_eq!(store.metrics().marriages, 20 * 32);
}

#[derive(Debug, Clone)]
enum Op {
    Propose(usize, usize),
    Accept(usize, usize),
    Deny(usize, usize),
    Divorce(usize, usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    (0..4u8, 0..6usize, 0..6usize).prop_map(|(kind, x, y)| match kind {
        0 => Op::Propose(x, y),
        1 => Op::Accept(x, y),
        2 => Op::Deny(x, y),
        _ => Op::Divorce(x, y),
    })
}

proptest! {
    /// Any sequence of operations keeps marriages symmetric, monogamous and colored
    #[test]
    fn test_invariants_hold_for_any_sequence(ops in prop::collection::vec(op_strategy(), 0..80)) {
        let store = RelationshipStore::in_memory();
        let players: Vec<PlayerId> = (0..6u128).map(|n| PlayerId::from_value(n + 1)).collect();

        for op in ops {
            match op {
                Op::Propose(x, y) => { let _ = store.propose(players[x], players[y]); }
                Op::Accept(x, y) => { let _ = store.accept(players[x], players[y]); }
                Op::Deny(x, y) => { store.deny(players[x], players[y]); }
                Op::Divorce(x, y) => { let _ = store.divorce(players[x], players[y]); }
            }

            let snapshot = store.snapshot();
            for (player, partner) in &snapshot.marriages {
                prop_assert_ne!(player, partner);
                prop_assert_eq!(snapshot.marriages.get(partner), Some(player));
                prop_assert!(snapshot.color_of(*player).is_some());
            }
            prop_assert_eq!(snapshot.colors.len() * 2, snapshot.marriages.len());
        }
    }

    /// Denying twice has the same effect as denying once
    #[test]
    fn test_deny_idempotence(requester in 1u128..50, target in 51u128..100) {
        let (requester, target) = (PlayerId::from_value(requester), PlayerId::from_value(target));

        let once = RelationshipStore::in_memory();
        once.propose(requester, target).unwrap();
        once.deny(target, requester);

        let twice = RelationshipStore::in_memory();
        twice.propose(requester, target).unwrap();
        twice.deny(target, requester);
        twice.deny(target, requester);

        prop_assert_eq!(once.snapshot(), twice.snapshot());
        prop_assert_eq!(once.pending_proposal_for(target), twice.pending_proposal_for(target));
    }
}
