//! ChainMap: separately-chained hash table over a generational entry arena.

use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::mem;
use hashbrown::hash_map::DefaultHashBuilder;
use slotmap::{DefaultKey, SlotMap};

/// Bucket count every map starts with. Growth doubles it and never shrinks.
const INITIAL_CAPACITY: usize = 100;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    /// Cached at insertion; indexing always uses the stored hash, so
    /// `K: Hash` is never re-invoked on rehash.
    hash: u64,
    /// Next node in the same chain.
    next: Option<DefaultKey>,
}

/// A mutable key-value map built on separate chaining.
///
/// Entries live in a `SlotMap` arena and chains are generational arena keys,
/// not node pointers; `buckets[i]` holds the head of chain `i`. The bucket
/// index is `hash mod capacity`, so every entry is relinked when the table
/// grows. Chains are LIFO: a fresh entry becomes the new head.
///
/// The map owns its key copies (`put` clones the key exactly once, on first
/// insertion) and stores values without ever cloning them. Replacing a value
/// hands the old one back; removing an entry hands its value back and drops
/// the owned key.
#[derive(Debug)]
pub struct ChainMap<K, V, S = DefaultHashBuilder> {
    hasher: S,
    buckets: Vec<Option<DefaultKey>>,
    slots: SlotMap<DefaultKey, Entry<K, V>>,
}

fn bucket_of(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

impl<K, V> ChainMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<K, V> Default for ChainMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> ChainMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            hasher,
            buckets: vec![None; INITIAL_CAPACITY],
            slots: SlotMap::with_key(),
        }
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current bucket count. Starts at 100 and doubles whenever an insertion
    /// finds `len() == capacity()`.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Scan the chain owning `hash` for a key equal to `key`.
    fn find_hashed<Q>(&self, hash: u64, key: &Q) -> Option<DefaultKey>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let mut cur = self.buckets[bucket_of(hash, self.buckets.len())];
        while let Some(k) = cur {
            let entry = &self.slots[k];
            if entry.hash == hash && entry.key.borrow() == key {
                return Some(k);
            }
            cur = entry.next;
        }
        None
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let k = self.find_hashed(self.make_hash(key), key)?;
        Some(&self.slots[k].value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let k = self.find_hashed(self.make_hash(key), key)?;
        Some(&mut self.slots[k].value)
    }

    /// Presence is existence of the entry node; a stored value is never
    /// inspected. Shares the chain search with `get`, so the two agree.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find_hashed(self.make_hash(key), key).is_some()
    }

    /// Map `key` to `value`.
    ///
    /// If the key is already present the stored value is replaced in place
    /// and the old value returned; the owned key copy is reused and the map
    /// does not grow. Otherwise the key is cloned via `to_owned`, the table
    /// grows first if `len() == capacity()`, and the fresh entry is linked
    /// at the head of its chain.
    pub fn put<Q>(&mut self, key: &Q, value: V) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + ToOwned<Owned = K>,
    {
        let hash = self.make_hash(key);
        if let Some(k) = self.find_hashed(hash, key) {
            return Some(mem::replace(&mut self.slots[k].value, value));
        }
        // Grow before linking so the load factor never exceeds 1.0.
        if self.slots.len() >= self.buckets.len() {
            let doubled = self.buckets.len() * 2;
            self.grow(doubled);
        }
        let idx = bucket_of(hash, self.buckets.len());
        let entry = Entry {
            key: key.to_owned(),
            value,
            hash,
            next: self.buckets[idx],
        };
        self.buckets[idx] = Some(self.slots.insert(entry));
        None
    }

    /// Unlink and return the value stored under `key`, dropping the owned
    /// key copy. Absent keys are a silent no-op.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(key);
        let idx = bucket_of(hash, self.buckets.len());
        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.buckets[idx];
        while let Some(k) = cur {
            let entry = &self.slots[k];
            if entry.hash == hash && entry.key.borrow() == key {
                let next = entry.next;
                match prev {
                    Some(p) => self.slots[p].next = next,
                    None => self.buckets[idx] = next,
                }
                return self.slots.remove(k).map(|e| e.value);
            }
            prev = Some(k);
            cur = entry.next;
        }
        None
    }

    /// Relink every entry into a fresh bucket vector of `new_capacity`
    /// chains. Stored hashes make this a pure pointer shuffle.
    fn grow(&mut self, new_capacity: usize) {
        let old = mem::replace(&mut self.buckets, vec![None; new_capacity]);
        for head in old {
            let mut cur = head;
            while let Some(k) = cur {
                let entry = &mut self.slots[k];
                cur = entry.next.take();
                let idx = bucket_of(entry.hash, new_capacity);
                entry.next = self.buckets[idx];
                self.buckets[idx] = Some(k);
            }
        }
    }

    /// Visit every entry exactly once: bucket index ascending, then chain
    /// order. The order is an implementation artifact, not a contract.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: &self.buckets,
            slots: &self.slots,
            bucket: 0,
            cur: None,
        }
    }

    /// Export references to every live key, in one full traversal. The
    /// references alias the map's owned key storage.
    pub fn keys(&self) -> Vec<&K> {
        let mut out = Vec::with_capacity(self.len());
        out.extend(self.iter().map(|(k, _)| k));
        out
    }
}

/// Iterator over `(&K, &V)` pairs in bucket-then-chain order.
pub struct Iter<'a, K, V> {
    buckets: &'a [Option<DefaultKey>],
    slots: &'a SlotMap<DefaultKey, Entry<K, V>>,
    bucket: usize,
    cur: Option<DefaultKey>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(k) = self.cur {
                let entry = &self.slots[k];
                self.cur = entry.next;
                return Some((&entry.key, &entry.value));
            }
            if self.bucket == self.buckets.len() {
                return None;
            }
            self.cur = self.buckets[self.bucket];
            self.bucket += 1;
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
