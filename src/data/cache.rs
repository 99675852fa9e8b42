use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::loader::{LabelOutcome, load_labels};

/// Memoizes label loading per literal path argument.
///
/// Entries live until [`LabelCache::invalidate`] or [`LabelCache::clear`]
/// is called; there is no time-based expiry.
#[derive(Debug, Default)]
pub struct LabelCache {
    entries: HashMap<PathBuf, LabelOutcome>,
}

impl LabelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached outcome for `path`, loading it on first use.
    pub fn get_or_load(&mut self, path: &Path) -> &LabelOutcome {
        self.get_or_load_with(path, load_labels)
    }

    fn get_or_load_with(
        &mut self,
        path: &Path,
        load: impl FnOnce(&Path) -> LabelOutcome,
    ) -> &LabelOutcome {
        self.entries
            .entry(path.to_path_buf())
            .or_insert_with(|| load(path))
    }

    /// Drop the entry for one path so the next lookup reads the file again.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(path).is_some()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::data::model::WavelengthLabels;

    fn placeholder(_: &Path) -> LabelOutcome {
        LabelOutcome::Loaded(WavelengthLabels::placeholder())
    }

    #[test]
    fn second_lookup_does_not_reload() {
        let mut cache = LabelCache::new();
        let calls = Cell::new(0);
        let path = Path::new("labels.txt");
        for _ in 0..3 {
            cache.get_or_load_with(path, |p| {
                calls.set(calls.get() + 1);
                placeholder(p)
            });
        }
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn entries_are_keyed_by_literal_path() {
        let mut cache = LabelCache::new();
        cache.get_or_load_with(Path::new("a/labels.txt"), placeholder);
        cache.get_or_load_with(Path::new("./a/labels.txt"), placeholder);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn invalidate_forces_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.txt");

        let mut cache = LabelCache::new();
        assert!(matches!(cache.get_or_load(&path), LabelOutcome::Fallback { .. }));

        std::fs::write(&path, "x 1 2 3 4 5 6 7 8 9 10 11\n").unwrap();
        // Still the cached fallback.
        assert!(matches!(cache.get_or_load(&path), LabelOutcome::Fallback { .. }));

        assert!(cache.invalidate(&path));
        assert!(matches!(cache.get_or_load(&path), LabelOutcome::Loaded(_)));
        assert!(!cache.invalidate(Path::new("never-loaded.txt")));
    }

    #[test]
    fn clear_empties_the_cache() {
        let mut cache = LabelCache::new();
        cache.get_or_load_with(Path::new("a"), placeholder);
        cache.get_or_load_with(Path::new("b"), placeholder);
        cache.clear();
        assert_eq!(cache.len(), 0);
    }
}
