//! Open-addressing byte tables backing the dictionary nodes.
//!
//! Every trie node stores its children in a power-of-two slot table probed
//! linearly from `key & (len - 1)`. Tables start at 8 slots and never exceed
//! 256: the key alphabet is a single byte, so no node can have more distinct
//! children than that.
//!
//! Emptiness is an explicit `Option` per slot. No key byte is reserved as an
//! in-band marker, which keeps `0x00` a legal content byte for callers.

pub(crate) const MIN_SLOT_COUNT: usize = 8;
pub(crate) const MAX_SLOT_COUNT: usize = 256;

/// Implemented by entries stored in a slot table. An entry is addressed by
/// the single byte it reports as its key.
pub(crate) trait SlotEntry {
    fn key(&self) -> u8;
}

/// Outcome of walking a key's probe path.
pub(crate) enum Probe {
    /// The key is present at this index.
    Occupied(usize),
    /// The key is absent; this is the first free slot on its probe path.
    Vacant(usize),
    /// The key is absent and the probe cycled through a table with no free
    /// slot left.
    Full,
}

pub(crate) trait SlotTable<T: SlotEntry> {
    fn probe(&self, key: u8) -> Probe;
    fn find(&self, key: u8) -> Option<usize>;
    fn place(&mut self, entry: T) -> Result<usize, T>;
    fn remove(&mut self, key: u8) -> Option<T>;
    fn rehash_into(&mut self, target: &mut Self);
}

impl<T: SlotEntry> SlotTable<T> for [Option<T>] {
    /// Probe from the key's home index with wraparound, stopping on an exact
    /// hit, on the first empty slot, or on completing a full cycle.
    fn probe(&self, key: u8) -> Probe {
        let mask = self.len() - 1;
        let start = key as usize & mask;
        let mut index = start;
        loop {
            match &self[index] {
                Some(entry) if entry.key() == key => return Probe::Occupied(index),
                None => return Probe::Vacant(index),
                Some(_) => {}
            }
            index = (index + 1) & mask;
            if index == start {
                return Probe::Full;
            }
        }
    }

    fn find(&self, key: u8) -> Option<usize> {
        match self.probe(key) {
            Probe::Occupied(index) => Some(index),
            _ => None,
        }
    }

    /// Move `entry` into the first free slot on its probe path and return the
    /// claimed index. The entry is handed back if the table has no room left;
    /// the caller grows and retries. The key must not be present yet.
    fn place(&mut self, entry: T) -> Result<usize, T> {
        match self.probe(entry.key()) {
            Probe::Vacant(index) => {
                self[index] = Some(entry);
                Ok(index)
            }
            Probe::Full => Err(entry),
            Probe::Occupied(_) => unreachable!("slot table already holds this key byte"),
        }
    }

    /// Take the entry for `key` out of the table, then close the probe chain
    /// behind the hole so every remaining entry stays reachable from its home
    /// index. No tombstone state is left behind.
    fn remove(&mut self, key: u8) -> Option<T> {
        let mask = self.len() - 1;
        let mut hole = self.find(key)?;
        let removed = self[hole].take();
        let mut index = hole;
        loop {
            index = (index + 1) & mask;
            let home = match &self[index] {
                Some(entry) => entry.key() as usize & mask,
                None => break,
            };
            // The entry may back-fill the hole only if its home index lies
            // outside the cyclic range (hole, index].
            if (index.wrapping_sub(home) & mask) >= (index.wrapping_sub(hole) & mask) {
                self[hole] = self[index].take();
                hole = index;
            }
        }
        removed
    }

    /// Move every occupied slot into `target`, re-probing each key from its
    /// home index in the new table. The target must be empty and sized to
    /// take every entry; resizing builds it completely before it replaces
    /// this table.
    fn rehash_into(&mut self, target: &mut Self) {
        for entry in self.iter_mut().filter_map(Option::take) {
            if target.place(entry).is_err() {
                unreachable!("rehash target cannot hold all entries");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Copy, Clone, Debug, PartialEq)]
    struct DummyEntry {
        value: u8,
    }

    impl DummyEntry {
        fn new(key: u8) -> Self {
            DummyEntry { value: key }
        }
    }

    impl SlotEntry for DummyEntry {
        fn key(&self) -> u8 {
            self.value
        }
    }

    fn table(len: usize) -> Box<[Option<DummyEntry>]> {
        std::iter::repeat_with(|| None).take(len).collect()
    }

    #[test]
    fn place_reports_full_table() {
        let mut slots = table(8);
        for key in 0..8 {
            assert!(slots.place(DummyEntry::new(key)).is_ok());
        }
        assert_eq!(slots.place(DummyEntry::new(200)), Err(DummyEntry::new(200)));
    }

    #[test]
    fn remove_closes_probe_chains() {
        let mut slots = table(8);
        // All five keys share home index 2 and chain linearly behind it.
        for key in [2, 10, 18, 26, 34] {
            assert!(slots.place(DummyEntry::new(key)).is_ok());
        }
        assert!(slots.remove(2).is_some());
        for key in [10, 18, 26, 34] {
            assert!(slots.find(key).is_some(), "key {} lost its probe path", key);
        }
        assert!(slots.remove(2).is_none());
    }

    proptest! {
        #[test]
        fn empty_table_then_empty_find(key in 0u8..=255) {
            let slots = table(MIN_SLOT_COUNT);
            prop_assert!(slots.find(key).is_none());
        }

        #[test]
        fn placed_keys_are_found(keys in prop::collection::hash_set(0u8..=255, 1..=255)) {
            let mut slots = table(MAX_SLOT_COUNT);
            for &key in &keys {
                prop_assert!(slots.place(DummyEntry::new(key)).is_ok());
            }
            for &key in &keys {
                prop_assert!(slots.find(key).is_some(), "missing key {}", key);
            }
        }

        #[test]
        fn removal_preserves_the_rest(
            keys in prop::collection::hash_set(0u8..=255, 2..=64),
            selector in any::<prop::sample::Index>(),
        ) {
            let mut slots = table(64);
            let keys: Vec<u8> = keys.into_iter().collect();
            for &key in &keys {
                prop_assert!(slots.place(DummyEntry::new(key)).is_ok());
            }
            let removed = keys[selector.index(keys.len())];
            prop_assert_eq!(slots.remove(removed), Some(DummyEntry::new(removed)));
            prop_assert!(slots.find(removed).is_none());
            for &key in &keys {
                if key != removed {
                    prop_assert!(slots.find(key).is_some(), "missing key {}", key);
                }
            }
        }

        #[test]
        fn rehash_preserves_content(keys in prop::collection::hash_set(0u8..=255, 1..=8)) {
            let mut slots = table(8);
            for &key in &keys {
                prop_assert!(slots.place(DummyEntry::new(key)).is_ok());
            }
            let mut grown = table(16);
            slots.rehash_into(&mut grown);
            for slot in slots.iter() {
                prop_assert!(slot.is_none());
            }
            for &key in &keys {
                prop_assert!(grown.find(key).is_some(), "missing key {}", key);
            }
        }
    }
}
