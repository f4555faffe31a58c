use indexmap::IndexMap;

/// Running sums keyed by a grouping value, iterated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedTotals {
    buckets: IndexMap<String, f64>,
}

impl GroupedTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the bucket at zero on first sight, then adds `amount`.
    pub fn add(&mut self, key: &str, amount: f64) {
        if let Some(total) = self.buckets.get_mut(key) {
            *total += amount;
            return;
        }
        self.buckets.insert(key.to_string(), amount);
    }

    /// Registers a key without contributing a value.
    pub fn touch(&mut self, key: &str) {
        if !self.buckets.contains_key(key) {
            self.buckets.insert(key.to_string(), 0.0);
        }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.buckets.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.buckets.iter().map(|(key, total)| (key.as_str(), *total))
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn into_map(self) -> IndexMap<String, f64> {
        self.buckets
    }
}
