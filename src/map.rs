use core::borrow::Borrow;
use core::hash::Hash;

use hashbrown::HashMap;

/// Sparse map keyed by two keys, stored as a map of maps so that every entry
/// of the first key can be visited without scanning the whole table.
#[derive(Clone, Debug)]
pub struct HashMap2<K1, K2, V> {
    map: HashMap<K1, HashMap<K2, V>>,
}

impl<K1, K2, V> HashMap2<K1, K2, V>
where
    K1: Hash + Eq,
    K2: Hash + Eq,
{
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn insert(&mut self, key1: K1, key2: K2, value: V) {
        self.map
            .raw_entry_mut()
            .from_key(&key1)
            .or_insert_with(|| (key1, HashMap::new()))
            .1
            .insert(key2, value);
    }

    /// Returns the value for the two keys, inserting `default` first if the
    /// entry is missing.
    pub fn get_or_insert(&mut self, key1: K1, key2: K2, default: V) -> &mut V {
        self.map
            .raw_entry_mut()
            .from_key(&key1)
            .or_insert_with(|| (key1, HashMap::new()))
            .1
            .entry(key2)
            .or_insert(default)
    }

    pub fn get<Q1: ?Sized, Q2: ?Sized>(&self, key1: &Q1, key2: &Q2) -> Option<&V>
    where
        K1: Borrow<Q1>,
        K2: Borrow<Q2>,
        Q1: Hash + Eq,
        Q2: Hash + Eq,
    {
        self.map.get(key1).and_then(|map| map.get(key2))
    }

    /// All entries sharing the first key.
    pub fn row<Q1: ?Sized>(&self, key1: &Q1) -> Option<&HashMap<K2, V>>
    where
        K1: Borrow<Q1>,
        Q1: Hash + Eq,
    {
        self.map.get(key1)
    }

    pub fn len(&self) -> usize {
        self.map.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.map.values().all(HashMap::is_empty)
    }

    pub fn for_each<'a, F>(&'a self, mut f: F)
    where
        F: FnMut((&'a K1, &'a K2, &'a V)),
    {
        for (k1, map) in &self.map {
            for (k2, v) in map {
                f((k1, k2, v));
            }
        }
    }
}

impl<K1, K2, V> Default for HashMap2<K1, K2, V>
where
    K1: Hash + Eq,
    K2: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}
