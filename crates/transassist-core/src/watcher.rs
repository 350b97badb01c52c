//! Mutation watcher: decides when page changes warrant a rescan.
//!
//! Time is passed in by the caller so the debounce and throttle can be
//! driven by a real clock or stepped in tests.

use std::time::{Duration, Instant};

use tracing::debug;
use transassist_config::WatcherConfig;
use transassist_dom::{Document, MutationRecord, NodeId, SelectorList};

use crate::injector::{OWN_CONTAINER_CLASS, is_own_ui};
use crate::registry::SiteConfig;

/// Filters mutation records and schedules at most one rescan per window.
#[derive(Debug)]
pub struct MutationWatcher {
    markers: Vec<SelectorList>,
    debounce: Duration,
    min_interval: Duration,
    deadline: Option<Instant>,
    last_rescan: Option<Instant>,
}

impl MutationWatcher {
    pub fn new(markers: Vec<SelectorList>, debounce: Duration, min_interval: Duration) -> Self {
        Self {
            markers,
            debounce,
            min_interval,
            deadline: None,
            last_rescan: None,
        }
    }

    /// Watch the site's mutation markers with the configured timings.
    pub fn for_site(config: &SiteConfig, timing: &WatcherConfig) -> Self {
        Self::new(
            config.profile().mutation_markers.clone(),
            Duration::from_millis(timing.debounce_ms),
            Duration::from_millis(timing.min_rescan_interval_ms),
        )
    }

    /// Feed a batch of records. Any relevant record (re)starts the quiet
    /// window. Returns whether the batch was relevant.
    pub fn observe(&mut self, doc: &Document, records: &[MutationRecord], now: Instant) -> bool {
        if !records.iter().any(|r| self.is_relevant(doc, r)) {
            return false;
        }
        self.deadline = Some(now + self.debounce);
        debug!("Relevant mutations, rescan scheduled");
        true
    }

    /// Whether a rescan is due at `now`. A due rescan that would come too
    /// soon after the previous one is pushed back to the end of the
    /// throttle window instead.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }
        if let Some(last) = self.last_rescan {
            let earliest = last + self.min_interval;
            if now < earliest {
                debug!("Rescan throttled");
                self.deadline = Some(earliest);
                return false;
            }
        }
        self.deadline = None;
        self.last_rescan = Some(now);
        true
    }

    /// When [`poll`](Self::poll) should next be called.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Note a scan that happened outside the watcher (the initial one).
    pub fn mark_rescanned(&mut self, now: Instant) {
        self.last_rescan = Some(now);
    }

    pub fn is_relevant(&self, doc: &Document, record: &MutationRecord) -> bool {
        if is_own_ui(doc, record.target()) {
            return false;
        }
        match record {
            MutationRecord::ChildList { added, removed, .. } => added
                .iter()
                .chain(removed)
                .any(|&node| self.is_or_contains_marker(doc, node)),
            MutationRecord::Attributes { target, name } => {
                name == "class" && self.markers.iter().any(|m| doc.matches(*target, m))
            }
        }
    }

    fn is_or_contains_marker(&self, doc: &Document, node: NodeId) -> bool {
        doc.is_element(node)
            && !doc.has_class(node, OWN_CONTAINER_CLASS)
            && self.markers.iter().any(|m| doc.is_or_contains(node, m))
    }
}
