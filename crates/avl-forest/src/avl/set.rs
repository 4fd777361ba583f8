use std::borrow::Borrow;
use std::fmt::{self, Debug};

use crate::error::AvlError;

use super::map::AvlMap;

/// AVL tree set backed by [`AvlMap<K, ()>`].
#[derive(Clone, PartialEq, Eq)]
pub struct AvlSet<K> {
    inner: AvlMap<K, ()>,
}

impl<K> AvlSet<K> {
    pub fn new() -> Self {
        Self {
            inner: AvlMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&mut self) {
        self.inner.clear()
    }

    pub fn first(&self) -> Option<&K> {
        self.inner.first_key_value().map(|(k, _)| k)
    }

    pub fn last(&self) -> Option<&K> {
        self.inner.last_key_value().map(|(k, _)| k)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &K> + '_ {
        self.inner.keys()
    }
}

impl<K: Ord> AvlSet<K> {
    /// Returns `false` if the value was already present.
    pub fn insert(&mut self, value: K) -> bool {
        self.inner.insert(value, ()).is_none()
    }

    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.remove(value).is_some()
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.contains_key(value)
    }

    pub fn assert_valid(&self) -> Result<(), AvlError> {
        self.inner.assert_valid()
    }
}

impl<K> Default for AvlSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Debug> Debug for AvlSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: Ord> FromIterator<K> for AvlSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<K: Ord> Extend<K> for AvlSet<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for k in iter {
            self.insert(k);
        }
    }
}

#[cfg(feature = "serde")]
impl<K: serde::ser::Serialize> serde::ser::Serialize for AvlSet<K> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, K> serde::de::Deserialize<'de> for AvlSet<K>
where
    K: Ord + serde::de::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        let items = Vec::<K>::deserialize(deserializer)?;
        Ok(items.into_iter().collect())
    }
}
