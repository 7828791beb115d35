//! A map partitioned into independently locked shards.
//!
//! Each key is assigned to shard `shard_hash(key) % shard_count`. Accessing a
//! key locks only its shard, so workers touching keys in different shards
//! never block each other. The shard count is fixed at construction.
//!
//! # Examples
//!
//! ```
//! use halberd::util::ShardedMap;
//!
//! let map: ShardedMap<i64, f64> = ShardedMap::new(4);
//! *map.access(7) += 0.5;
//! *map.access(7) += 0.25;
//! *map.access(2) += 1.0;
//!
//! let merged = map.build_ordinary_map();
//! assert_eq!(merged.get(&7), Some(&0.75));
//! assert_eq!(merged.keys().copied().collect::<Vec<_>>(), vec![2, 7]);
//! ```

use std::borrow::Borrow;
use std::collections::BTreeMap;

use ahash::RandomState;
use parking_lot::{
    MappedRwLockReadGuard, MappedRwLockWriteGuard, RwLock, RwLockReadGuard, RwLockWriteGuard,
};

/// Scoped exclusive access to one value. The shard stays locked until the
/// guard is dropped.
pub type Access<'a, V> = MappedRwLockWriteGuard<'a, V>;

/// Scoped shared access to one value.
pub type ReadAccess<'a, V> = MappedRwLockReadGuard<'a, V>;

/// Stable mapping of a key onto the unsigned domain used to pick a shard.
///
/// Implementations for owned and borrowed forms of a key must agree, so a
/// `String` key and its `&str` lookup land in the same shard.
pub trait ShardHash {
    fn shard_hash(&self) -> u64;
}

macro_rules! impl_shard_hash_for_int {
    ($($t:ty),*) => {
        $(
            impl ShardHash for $t {
                #[inline]
                fn shard_hash(&self) -> u64 {
                    *self as u64
                }
            }
        )*
    };
}

impl_shard_hash_for_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

// Fixed seeds keep the term-to-shard assignment stable across runs.
const TERM_SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

impl ShardHash for str {
    #[inline]
    fn shard_hash(&self) -> u64 {
        RandomState::with_seeds(TERM_SEEDS[0], TERM_SEEDS[1], TERM_SEEDS[2], TERM_SEEDS[3])
            .hash_one(self)
    }
}

impl ShardHash for String {
    #[inline]
    fn shard_hash(&self) -> u64 {
        self.as_str().shard_hash()
    }
}

/// A map split into a fixed number of `RwLock`-protected ordered shards.
#[derive(Debug)]
pub struct ShardedMap<K, V> {
    shards: Vec<RwLock<BTreeMap<K, V>>>,
}

impl<K, V> ShardedMap<K, V>
where
    K: Ord + ShardHash,
{
    /// Create a map with `shard_count` shards (at least one).
    pub fn new(shard_count: usize) -> Self {
        let shards = (0..shard_count.max(1))
            .map(|_| RwLock::new(BTreeMap::new()))
            .collect();
        ShardedMap { shards }
    }

    /// Number of shards.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Index of the shard that owns `key`.
    pub fn shard_index<Q>(&self, key: &Q) -> usize
    where
        Q: ShardHash + ?Sized,
    {
        (key.shard_hash() % self.shards.len() as u64) as usize
    }

    fn shard<Q>(&self, key: &Q) -> &RwLock<BTreeMap<K, V>>
    where
        Q: ShardHash + ?Sized,
    {
        &self.shards[self.shard_index(key)]
    }

    /// Exclusive access to the value for `key`, inserting `V::default()`
    /// when absent. Only the key's shard is locked.
    pub fn access(&self, key: K) -> Access<'_, V>
    where
        V: Default,
    {
        let guard = self.shard(&key).write();
        RwLockWriteGuard::map(guard, move |map| map.entry(key).or_default())
    }

    /// Shared access to the value for `key`, if present.
    pub fn get<Q>(&self, key: &Q) -> Option<ReadAccess<'_, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ShardHash + ?Sized,
    {
        let guard = self.shard(key).read();
        RwLockReadGuard::try_map(guard, |map| map.get(key)).ok()
    }

    /// Whether `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ShardHash + ?Sized,
    {
        self.shard(key).read().contains_key(key)
    }

    /// Run `f` on the value for `key` under the shard lock, removing the entry
    /// when `f` returns `false`.
    ///
    /// Returns `None` if the key is absent, otherwise whether it was kept.
    pub fn update_or_remove<Q, F>(&self, key: &Q, f: F) -> Option<bool>
    where
        K: Borrow<Q>,
        Q: Ord + ShardHash + ?Sized,
        F: FnOnce(&mut V) -> bool,
    {
        let mut shard = self.shard(key).write();
        let keep = f(shard.get_mut(key)?);
        if !keep {
            shard.remove(key);
        }
        Some(keep)
    }

    /// Remove `key`, locking only its shard.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ShardHash + ?Sized,
    {
        self.shard(key).write().remove(key)
    }

    /// Lock-free mutable access through an exclusive borrow, inserting
    /// `V::default()` when absent.
    pub fn entry_mut(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let index = self.shard_index(&key);
        self.shards[index].get_mut().entry(key).or_default()
    }

    /// Total number of entries. Shards are visited one at a time, so the
    /// count is only exact when no writer runs concurrently.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.read().len()).sum()
    }

    /// Whether every shard is empty.
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.read().is_empty())
    }

    /// Consolidate all shards into one ordered map, locking the shards in
    /// ascending index order.
    pub fn build_ordinary_map(&self) -> BTreeMap<K, V>
    where
        K: Clone,
        V: Clone,
    {
        let mut result = BTreeMap::new();
        for shard in &self.shards {
            let guard = shard.read();
            result.extend(guard.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        result
    }

    /// Consume the map and merge the shards without locking.
    pub fn into_ordinary_map(self) -> BTreeMap<K, V> {
        let mut result = BTreeMap::new();
        for shard in self.shards {
            result.append(&mut shard.into_inner());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Barrier;
    use std::thread;

    use super::*;

    #[test]
    fn test_access_and_merge() {
        let map: ShardedMap<i32, i32> = ShardedMap::new(3);
        for key in 0..10 {
            *map.access(key) += key * 2;
        }

        let merged = map.build_ordinary_map();
        assert_eq!(merged.len(), 10);
        assert_eq!(merged.get(&4), Some(&8));
        assert_eq!(map.len(), 10);
    }

    #[test]
    fn test_zero_shards_is_clamped() {
        let map: ShardedMap<u64, u64> = ShardedMap::new(0);
        assert_eq!(map.shard_count(), 1);
        *map.access(5) = 1;
        assert_eq!(*map.get(&5).unwrap(), 1);
    }

    #[test]
    fn test_negative_keys() {
        let map: ShardedMap<i64, u8> = ShardedMap::new(7);
        *map.access(-3) = 1;
        *map.access(3) = 2;
        let merged = map.into_ordinary_map();
        assert_eq!(merged.keys().copied().collect::<Vec<_>>(), vec![-3, 3]);
    }

    #[test]
    fn test_string_keys_with_str_lookup() {
        let map: ShardedMap<String, usize> = ShardedMap::new(8);
        *map.access("cat".to_string()) += 1;
        *map.access("dog".to_string()) += 2;

        assert_eq!(map.shard_index("cat"), map.shard_index(&"cat".to_string()));
        assert!(map.contains_key("cat"));
        assert_eq!(*map.get("dog").unwrap(), 2);
        assert!(map.get("bird").is_none());
    }

    #[test]
    fn test_remove_and_update_or_remove() {
        let map: ShardedMap<String, Vec<u32>> = ShardedMap::new(4);
        map.access("a".to_string()).extend([1, 2]);
        map.access("b".to_string()).push(3);

        assert_eq!(map.update_or_remove("a", |v| {
            v.retain(|&x| x != 1);
            !v.is_empty()
        }), Some(true));
        assert_eq!(map.update_or_remove("b", |v| {
            v.clear();
            !v.is_empty()
        }), Some(false));
        assert_eq!(map.update_or_remove("c", |_| true), None);

        assert!(!map.contains_key("b"));
        assert_eq!(map.remove("a"), Some(vec![2]));
        assert!(map.is_empty());
    }

    #[test]
    fn test_entry_mut() {
        let mut map: ShardedMap<u32, Vec<u32>> = ShardedMap::new(2);
        map.entry_mut(1).push(10);
        map.entry_mut(1).push(11);
        assert_eq!(map.build_ordinary_map()[&1], vec![10, 11]);
    }

    #[test]
    fn test_concurrent_accumulation() {
        const THREADS: usize = 8;
        const KEYS: i64 = 100;

        let map: ShardedMap<i64, i64> = ShardedMap::new(5);
        let barrier = Barrier::new(THREADS);

        thread::scope(|scope| {
            for _ in 0..THREADS {
                scope.spawn(|| {
                    barrier.wait();
                    for key in 0..KEYS {
                        *map.access(key) += 1;
                    }
                });
            }
        });

        let merged = map.into_ordinary_map();
        assert_eq!(merged.len(), KEYS as usize);
        assert!(merged.values().all(|&v| v == THREADS as i64));
    }
}
