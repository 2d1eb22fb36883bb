use arc_swap::ArcSwap;
use dockdns_domain::Entry;
use std::sync::Arc;
use tracing::debug;

/// Name to record-set store shared by the resolver and the container watcher.
///
/// The static partition is fixed at construction. The dynamic partition is
/// replaced wholesale on every mutation, so a lookup always scans one
/// complete snapshot and never waits on a writer.
pub struct Registry {
    static_entries: Arc<[Entry]>,
    dynamic_entries: ArcSwap<Vec<Entry>>,
}

impl Registry {
    pub fn new(static_entries: Vec<Entry>) -> Self {
        Self {
            static_entries: static_entries.into(),
            dynamic_entries: ArcSwap::from_pointee(Vec::new()),
        }
    }

    pub fn lookup_static(&self, name: &str) -> Option<Entry> {
        self.static_entries
            .iter()
            .find(|entry| entry.matches(name))
            .cloned()
    }

    pub fn lookup_dynamic(&self, name: &str) -> Option<Entry> {
        self.dynamic_entries
            .load()
            .iter()
            .find(|entry| entry.matches(name))
            .cloned()
    }

    /// First match wins, static entries before dynamic ones.
    pub fn lookup(&self, name: &str) -> Option<Entry> {
        self.lookup_static(name).or_else(|| self.lookup_dynamic(name))
    }

    pub fn add_dynamic(&self, entry: Entry) {
        self.extend_dynamic(vec![entry]);
    }

    pub fn extend_dynamic(&self, entries: Vec<Entry>) {
        if entries.is_empty() {
            return;
        }
        self.dynamic_entries.rcu(|current| {
            let mut next = Vec::with_capacity(current.len() + entries.len());
            next.extend(current.iter().cloned());
            next.extend(entries.iter().cloned());
            next
        });
    }

    /// Removes the first dynamic entry owned by `container_id`.
    pub fn remove_dynamic(&self, container_id: &str) -> Option<Entry> {
        let mut removed = None;
        self.dynamic_entries.rcu(|current| {
            let mut next = Vec::clone(current);
            removed = next
                .iter()
                .position(|entry| &*entry.id == container_id)
                .map(|index| next.remove(index));
            next
        });
        removed
    }

    /// Removes every dynamic entry owned by `container_id` in one swap.
    pub fn remove_container(&self, container_id: &str) -> usize {
        let mut removed = 0;
        self.dynamic_entries.rcu(|current| {
            let next: Vec<Entry> = current
                .iter()
                .filter(|entry| &*entry.id != container_id)
                .cloned()
                .collect();
            removed = current.len() - next.len();
            next
        });
        removed
    }

    /// Swaps the entries of `container_id` for `entries`, returning how many
    /// stale entries were dropped.
    pub fn replace_container(&self, container_id: &str, entries: Vec<Entry>) -> usize {
        let mut removed = 0;
        self.dynamic_entries.rcu(|current| {
            let mut next: Vec<Entry> = current
                .iter()
                .filter(|entry| &*entry.id != container_id)
                .cloned()
                .collect();
            removed = current.len() - next.len();
            next.extend(entries.iter().cloned());
            next
        });
        debug!(
            container = container_id,
            removed,
            added = entries.len(),
            "Container entries replaced"
        );
        removed
    }

    pub fn static_len(&self) -> usize {
        self.static_entries.len()
    }

    pub fn dynamic_len(&self) -> usize {
        self.dynamic_entries.load().len()
    }

    pub fn dynamic_snapshot(&self) -> Arc<Vec<Entry>> {
        self.dynamic_entries.load_full()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
