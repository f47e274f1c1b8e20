/// Frequency tally that remembers the order keys were first seen in.
///
/// Iteration follows first-seen order, so a max-scan over it resolves ties in
/// favour of the key encountered first.
#[derive(Debug, Clone)]
pub struct OrderedTally<K> {
    entries: Vec<(K, u64)>,
}

impl<K> Default for OrderedTally<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq> OrderedTally<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to the bucket for `key`, creating it on first sight.
    pub fn add(&mut self, key: K, amount: u64) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, count)) => *count += amount,
            None => self.entries.push((key, amount)),
        }
    }

    pub fn get(&self, key: &K) -> Option<u64> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, count)| *count)
    }

    /// Returns the key with the strictly largest count.
    ///
    /// Keys whose count is zero never win.
    pub fn leader(&self) -> Option<&K> {
        let mut best: Option<(&K, u64)> = None;
        for (key, count) in &self.entries {
            let current = best.map_or(0, |(_, c)| c);
            if *count > current {
                best = Some((key, *count));
            }
        }
        best.map(|(key, _)| key)
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.entries.iter().map(|(k, c)| (k, *c))
    }
}
