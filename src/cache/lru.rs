//! Arena-backed least-recently-used list.
//!
//! Entries live in a slot vector and link to each other by index, so touching,
//! inserting and removing are O(1) without per-node allocation. Freed slots are
//! reused. Each entry carries a weight (bytes, or 1 for count-bounded caches);
//! eviction policy belongs to the caller.
//!
//! # Example
//!
//! ```
//! use colorcard::cache::LruList;
//!
//! let mut lru = LruList::new();
//! lru.insert("a", 1, 1);
//! lru.insert("b", 2, 1);
//! lru.get(&"a");
//! assert_eq!(lru.pop_lru(), Some(("b", 2)));
//! ```

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    weight: usize,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Recency-ordered map with per-entry weights.
#[derive(Debug, Clone)]
pub struct LruList<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
    index: HashMap<K, usize>,
    /// Least recently used.
    head: Option<usize>,
    /// Most recently used.
    tail: Option<usize>,
    total_weight: usize,
}

impl<K: Hash + Eq + Clone, V> Default for LruList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + Clone, V> LruList<K, V> {
    /// Empty list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            head: None,
            tail: None,
            total_weight: 0,
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True when empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Sum of entry weights.
    #[must_use]
    pub const fn total_weight(&self) -> usize {
        self.total_weight
    }

    /// Whether `key` is present. Does not change recency.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Value for `key`, marking it most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let idx = *self.index.get(key)?;
        self.move_to_back(idx);
        self.node(idx).map(|n| &n.value)
    }

    /// Value for `key` without touching recency.
    #[must_use]
    pub fn peek(&self, key: &K) -> Option<&V> {
        let idx = *self.index.get(key)?;
        self.node(idx).map(|n| &n.value)
    }

    /// Insert or replace `key` as most recently used. Returns the replaced value.
    pub fn insert(&mut self, key: K, value: V, weight: usize) -> Option<V> {
        let old = self.remove(&key);

        let node = Node { key: key.clone(), value, weight, prev: self.tail, next: None };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        match self.tail.and_then(|t| self.slots[t].as_mut()) {
            Some(tail) => tail.next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
        self.index.insert(key, idx);
        self.total_weight += weight;
        old
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.index.remove(key)?;
        self.unlink(idx);
        let node = self.slots[idx].take()?;
        self.free.push(idx);
        self.total_weight -= node.weight;
        Some(node.value)
    }

    /// Remove and return the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let key = self.head.and_then(|h| self.node(h)).map(|n| n.key.clone())?;
        let value = self.remove(&key)?;
        Some((key, value))
    }

    /// Key and weight of the least recently used entry.
    #[must_use]
    pub fn peek_lru(&self) -> Option<(&K, usize)> {
        self.head.and_then(|h| self.node(h)).map(|n| (&n.key, n.weight))
    }

    /// Remove every entry whose key fails `keep`. Returns how many were removed.
    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) -> usize {
        let doomed: Vec<K> = self.index.keys().filter(|k| !keep(*k)).cloned().collect();
        for key in &doomed {
            self.remove(key);
        }
        doomed.len()
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.index.clear();
        self.head = None;
        self.tail = None;
        self.total_weight = 0;
    }

    /// Keys from least to most recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        std::iter::successors(self.head.and_then(|h| self.node(h)), move |n| {
            n.next.and_then(|i| self.node(i))
        })
        .map(|n| &n.key)
    }

    fn node(&self, idx: usize) -> Option<&Node<K, V>> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    fn unlink(&mut self, idx: usize) {
        let Some((prev, next)) = self.node(idx).map(|n| (n.prev, n.next)) else {
            return;
        };
        match prev.and_then(|p| self.slots[p].as_mut()) {
            Some(p) => p.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.slots[n].as_mut()) {
            Some(n) => n.prev = prev,
            None => self.tail = prev,
        }
        if let Some(node) = self.slots[idx].as_mut() {
            node.prev = None;
            node.next = None;
        }
    }

    fn move_to_back(&mut self, idx: usize) {
        if self.tail == Some(idx) {
            return;
        }
        self.unlink(idx);
        let old_tail = self.tail;
        if let Some(node) = self.slots[idx].as_mut() {
            node.prev = old_tail;
        }
        match old_tail.and_then(|t| self.slots[t].as_mut()) {
            Some(t) => t.next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Insert(u8, usize),
        Get(u8),
        Remove(u8),
        Pop,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..16, 1usize..100).prop_map(|(k, w)| Op::Insert(k, w)),
            (0u8..16).prop_map(Op::Get),
            (0u8..16).prop_map(Op::Remove),
            Just(Op::Pop),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        /// Recency order and weights match a naive Vec model
        #[test]
        fn prop_matches_vec_model(ops in prop::collection::vec(op(), 0..200)) {
            let mut lru = LruList::new();
            let mut model: Vec<(u8, usize)> = Vec::new();

            for op in ops {
                match op {
                    Op::Insert(k, w) => {
                        model.retain(|&(mk, _)| mk != k);
                        model.push((k, w));
                        lru.insert(k, w, w);
                    }
                    Op::Get(k) => {
                        if let Some(pos) = model.iter().position(|&(mk, _)| mk == k) {
                            let e = model.remove(pos);
                            model.push(e);
                        }
                        lru.get(&k);
                    }
                    Op::Remove(k) => {
                        model.retain(|&(mk, _)| mk != k);
                        lru.remove(&k);
                    }
                    Op::Pop => {
                        let expected = (!model.is_empty()).then(|| model.remove(0));
                        prop_assert_eq!(lru.pop_lru(), expected);
                    }
                }
                let keys: Vec<u8> = lru.keys().copied().collect();
                let model_keys: Vec<u8> = model.iter().map(|&(k, _)| k).collect();
                prop_assert_eq!(keys, model_keys);
                prop_assert_eq!(lru.total_weight(), model.iter().map(|&(_, w)| w).sum::<usize>());
            }
        }
    }
}
