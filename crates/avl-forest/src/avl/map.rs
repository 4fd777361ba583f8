use std::borrow::Borrow;
use std::fmt::{self, Debug};
use std::iter::FusedIterator;

use crate::arena::Arena;
use crate::bst;
use crate::error::{AvlError, KeyError};
use crate::types::KvNode;

use super::types::AvlNode;
use super::util::{assert_avl_tree, insert, predecessor, print, remove};

/// Ordered map on an AVL tree.
///
/// Nodes live in an [`Arena`] and refer to each other through `u32` handles.
/// A node keeps its handle for as long as its key is in the map; handles are
/// exposed for inspection through [`find`](AvlMap::find) and
/// [`node`](AvlMap::node).
#[derive(Clone)]
pub struct AvlMap<K, V> {
    root: Option<u32>,
    arena: Arena<AvlNode<K, V>>,
}

impl<K, V> AvlMap<K, V> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            root: None,
            arena: Arena::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.arena.clear();
    }

    /// Nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        bst::height(&self.arena, self.root)
    }

    /// Recomputes subtree heights and checks the AVL bound on each node.
    pub fn is_balanced(&self) -> bool {
        bst::is_balanced(&self.arena, self.root)
    }

    pub fn root(&self) -> Option<u32> {
        self.root
    }

    pub fn node(&self, idx: u32) -> Option<&AvlNode<K, V>> {
        self.arena.get(idx)
    }

    pub fn predecessor(&self, idx: u32) -> Option<u32> {
        predecessor(&self.arena, idx)
    }

    pub fn successor(&self, idx: u32) -> Option<u32> {
        bst::next(&self.arena, idx)
    }

    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        bst::first(&self.arena, self.root).map(|i| self.entry(i))
    }

    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        bst::last(&self.arena, self.root).map(|i| self.entry(i))
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            arena: &self.arena,
            front: bst::first(&self.arena, self.root),
            back: bst::last(&self.arena, self.root),
            remaining: self.len(),
        }
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Visits entries in key order with mutable access to each value.
    pub fn for_each_mut<F: FnMut(&K, &mut V)>(&mut self, mut f: F) {
        let mut curr = bst::first(&self.arena, self.root);
        while let Some(i) = curr {
            let node = &mut self.arena[i];
            f(&node.k, &mut node.v);
            curr = bst::next(&self.arena, i);
        }
    }

    fn entry(&self, idx: u32) -> (&K, &V) {
        let node = &self.arena[idx];
        (&node.k, &node.v)
    }
}

impl<K: Ord, V> AvlMap<K, V> {
    /// Inserts or overwrites; returns the previous value for an existing key.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        insert(&mut self.arena, &mut self.root, key, value).1
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.find(key)?;
        Some(remove(&mut self.arena, &mut self.root, node).into_entry())
    }

    /// Handle of the node holding `key`.
    pub fn find<Q>(&self, key: &Q) -> Option<u32>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        bst::find(&self.arena, self.root, key)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|i| &self.arena[i].v)
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|i| self.entry(i))
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|i| &mut self.arena[i].v)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Strict lookup: the key must be present.
    pub fn at<Q>(&self, key: &Q) -> Result<&V, KeyError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).ok_or(KeyError)
    }

    pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut V, KeyError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_mut(key).ok_or(KeyError)
    }

    pub fn assert_valid(&self) -> Result<(), AvlError> {
        assert_avl_tree(&self.arena, self.root)
    }
}

impl<K: Debug, V: Debug> AvlMap<K, V> {
    /// Indented dump of the tree shape with balance factors.
    pub fn print(&self) -> String {
        format!("AvlMap\n{}", print(&self.arena, self.root, ""))
    }
}

impl<K, V> Default for AvlMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Debug, V: Debug> Debug for AvlMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for AvlMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for AvlMap<K, V> {}

impl<K: Ord, V> FromIterator<(K, V)> for AvlMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for AvlMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a AvlMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over an [`AvlMap`].
pub struct Iter<'a, K, V> {
    arena: &'a Arena<AvlNode<K, V>>,
    front: Option<u32>,
    back: Option<u32>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let i = self.front?;
        self.front = bst::next(self.arena, i);
        self.remaining -= 1;
        let node = &self.arena[i];
        Some((&node.k, &node.v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let i = self.back?;
        self.back = bst::prev(self.arena, i);
        self.remaining -= 1;
        let node = &self.arena[i];
        Some((&node.k, &node.v))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

#[cfg(feature = "serde")]
impl<K, V> serde::ser::Serialize for AvlMap<K, V>
where
    K: serde::ser::Serialize,
    V: serde::ser::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Deserialize<'de> for AvlMap<K, V>
where
    K: Ord + serde::de::Deserialize<'de>,
    V: serde::de::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        struct MapVisitor<K, V>(std::marker::PhantomData<(K, V)>);

        impl<'de, K, V> serde::de::Visitor<'de> for MapVisitor<K, V>
        where
            K: Ord + serde::de::Deserialize<'de>,
            V: serde::de::Deserialize<'de>,
        {
            type Value = AvlMap<K, V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut map = AvlMap::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((k, v)) = access.next_entry()? {
                    map.insert(k, v);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(MapVisitor(std::marker::PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterates_from_both_ends() {
        let map: AvlMap<i32, char> = [(2, 'b'), (1, 'a'), (3, 'c'), (4, 'd')]
            .into_iter()
            .collect();
        let mut it = map.iter();
        assert_eq!(it.len(), 4);
        assert_eq!(it.next(), Some((&1, &'a')));
        assert_eq!(it.next_back(), Some((&4, &'d')));
        assert_eq!(it.next(), Some((&2, &'b')));
        assert_eq!(it.next_back(), Some((&3, &'c')));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
    }

    #[test]
    fn for_each_mut_sees_keys_in_order() {
        let mut map: AvlMap<i32, i32> = (0..10).map(|i| (9 - i, 0)).collect();
        let mut seen = Vec::new();
        map.for_each_mut(|k, v| {
            seen.push(*k);
            *v = k * 2;
        });
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
        assert_eq!(map.get(&7), Some(&14));
    }

    #[test]
    fn debug_formats_as_map() {
        let map: AvlMap<&str, i32> = [("b", 2), ("a", 1)].into_iter().collect();
        assert_eq!(format!("{map:?}"), r#"{"a": 1, "b": 2}"#);
    }
}
