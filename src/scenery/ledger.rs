// src/scenery/ledger.rs
//! Ordered ledger of live trees. Insertion order is spawn order; the front is
//! always the oldest instance, which is what cap eviction relies on.

use bevy::prelude::*;
use std::collections::VecDeque;

use super::core::SpawnSeq;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedgerEntry {
    pub entity: Entity,
    pub seq: SpawnSeq,
}

#[derive(Resource, Default)]
pub struct SceneryLedger {
    entries: VecDeque<LedgerEntry>,
    next_seq: u64,
}

impl SceneryLedger {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a fresh spawn at the back; returns its sequence number.
    pub fn push(&mut self, entity: Entity) -> SpawnSeq {
        let seq = SpawnSeq(self.next_seq);
        self.next_seq += 1;
        self.entries.push_back(LedgerEntry { entity, seq });
        seq
    }

    /// Pop the oldest entry while over `cap`; returns the evicted entities,
    /// oldest first. A loop rather than a single pop, so it converges even
    /// after `cap` was lowered externally between ticks.
    pub fn evict_over_cap(&mut self, cap: usize) -> Vec<Entity> {
        let mut evicted = Vec::new();
        while self.entries.len() > cap {
            if let Some(front) = self.entries.pop_front() {
                evicted.push(front.entity);
            }
        }
        evicted
    }

    /// Entry at `index` (0 = oldest).
    pub fn get(&self, index: usize) -> Option<LedgerEntry> {
        self.entries.get(index).copied()
    }

    /// Remove the entry at `index`, preserving the order of the rest.
    pub fn remove(&mut self, index: usize) -> Option<LedgerEntry> {
        self.entries.remove(index)
    }

    /// Take every entry, oldest first, leaving the ledger empty.
    pub fn drain_all(&mut self) -> Vec<LedgerEntry> {
        self.entries.drain(..).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(n: usize) -> (World, Vec<Entity>) {
        let mut world = World::new();
        let ids = (0..n).map(|_| world.spawn_empty().id()).collect();
        (world, ids)
    }

    #[test]
    fn push_preserves_spawn_order() {
        let (_world, ids) = entities(3);
        let mut ledger = SceneryLedger::default();
        for &e in &ids {
            ledger.push(e);
        }
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.get(0).unwrap().entity, ids[0]);
        assert_eq!(ledger.get(2).unwrap().entity, ids[2]);
        assert!(ledger.get(0).unwrap().seq < ledger.get(1).unwrap().seq);
    }

    #[test]
    fn eviction_removes_oldest_first() {
        let (_world, ids) = entities(3);
        let mut ledger = SceneryLedger::default();
        for &e in &ids {
            ledger.push(e);
        }
        let evicted = ledger.evict_over_cap(2);
        assert_eq!(evicted, vec![ids[0]]);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get(0).unwrap().entity, ids[1]);
    }

    #[test]
    fn eviction_converges_after_cap_lowered() {
        let (_world, ids) = entities(5);
        let mut ledger = SceneryLedger::default();
        for &e in &ids {
            ledger.push(e);
        }
        // Cap dropped from 5 to 1 between ticks: one call must converge.
        let evicted = ledger.evict_over_cap(1);
        assert_eq!(evicted, vec![ids[0], ids[1], ids[2], ids[3]]);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(0).unwrap().entity, ids[4]);
    }

    #[test]
    fn eviction_at_or_under_cap_is_a_no_op() {
        let (_world, ids) = entities(2);
        let mut ledger = SceneryLedger::default();
        for &e in &ids {
            ledger.push(e);
        }
        assert!(ledger.evict_over_cap(2).is_empty());
        assert!(ledger.evict_over_cap(10).is_empty());
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn remove_by_index_keeps_order() {
        let (_world, ids) = entities(3);
        let mut ledger = SceneryLedger::default();
        for &e in &ids {
            ledger.push(e);
        }
        let removed = ledger.remove(1).unwrap();
        assert_eq!(removed.entity, ids[1]);
        assert_eq!(ledger.get(0).unwrap().entity, ids[0]);
        assert_eq!(ledger.get(1).unwrap().entity, ids[2]);
    }

    #[test]
    fn drain_all_empties_oldest_first() {
        let (_world, ids) = entities(3);
        let mut ledger = SceneryLedger::default();
        for &e in &ids {
            ledger.push(e);
        }
        let drained: Vec<Entity> = ledger.drain_all().into_iter().map(|en| en.entity).collect();
        assert_eq!(drained, ids);
        assert!(ledger.is_empty());
    }

    #[test]
    fn sequence_numbers_survive_drain() {
        let (mut world, _) = entities(0);
        let mut ledger = SceneryLedger::default();
        let a = world.spawn_empty().id();
        ledger.push(a);
        ledger.drain_all();
        let b = world.spawn_empty().id();
        let seq = ledger.push(b);
        assert_eq!(seq, SpawnSeq(1));
    }
}
