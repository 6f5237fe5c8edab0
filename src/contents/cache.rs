//! Per-container memo table of applied operations.

use super::options::JoinOptions;
use super::sort::SortKey;

/// Bit pattern of a float with `-0.0` folded into `0.0`.
fn float_key(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

/// An applied operation together with its normalized parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum CacheKey {
    Sort(Vec<SortKey>),
    Join {
        max_gap: u64,
        yo_tolerance: u64,
        separator: String,
        respect_buckets: bool,
        match_style: bool,
    },
    Buckets(Vec<u64>),
}

impl CacheKey {
    pub(crate) fn sort(keys: &[SortKey]) -> Self {
        CacheKey::Sort(keys.to_vec())
    }

    pub(crate) fn join(options: &JoinOptions) -> Self {
        CacheKey::Join {
            max_gap: float_key(options.max_gap),
            yo_tolerance: float_key(options.yo_tolerance),
            separator: options.separator.clone(),
            respect_buckets: options.respect_buckets,
            match_style: options.match_style,
        }
    }

    pub(crate) fn buckets(delimiters: &[f64]) -> Self {
        CacheKey::Buckets(delimiters.iter().copied().map(float_key).collect())
    }

    fn name(&self) -> &'static str {
        match self {
            CacheKey::Sort(_) => "sort",
            CacheKey::Join { .. } => "join",
            CacheKey::Buckets(_) => "assign_horizontal_end_on_page",
        }
    }
}

/// Operations applied since the sequence last changed, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct OperationCache {
    entries: Vec<CacheKey>,
}

impl OperationCache {
    /// Whether an identical call is already reflected in the current state.
    pub(crate) fn contains(&self, key: &CacheKey) -> bool {
        let hit = self.entries.contains(key);
        if hit {
            log::trace!("cache hit for {}", key.name());
        }
        hit
    }

    /// Record an applied operation.
    ///
    /// When the operation changed the sequence, everything recorded before it
    /// is stale and dropped.
    pub(crate) fn record(&mut self, key: CacheKey, changed: bool) {
        if changed {
            if !self.entries.is_empty() {
                log::trace!("invalidating {} cached operation(s)", self.entries.len());
            }
            self.entries.clear();
        }
        self.entries.retain(|entry| entry != &key);
        self.entries.push(key);
    }

    /// Keys of the most recent sort still valid for the current order.
    pub(crate) fn last_sort(&self) -> Option<&[SortKey]> {
        self.entries.iter().rev().find_map(|entry| match entry {
            CacheKey::Sort(keys) => Some(keys.as_slice()),
            _ => None,
        })
    }

    /// Whether a join is reflected in the current sequence.
    pub(crate) fn has_join(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| matches!(entry, CacheKey::Join { .. }))
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
