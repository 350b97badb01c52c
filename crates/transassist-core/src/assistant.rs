//! The page controller.
//!
//! One [`TranslationAssistant`] is owned per page. It is handed the
//! document on every call rather than holding it, so a translation request
//! can be awaited without keeping the page borrowed.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};
use transassist_config::{UiStrings, WatcherConfig};
use transassist_dom::{Document, NodeId};
use transassist_protocols::{ErrorKind, TranslateError, TranslationBridge};

use crate::discovery::{discover_targets, is_valid_target};
use crate::injector::{ControlState, Injector};
use crate::locator::find_source_text;
use crate::notifier::Notifier;
use crate::registry::SiteConfig;
use crate::watcher::MutationWatcher;

const DEFAULT_AUTO_TRANSLATE_DELAY: Duration = Duration::from_millis(100);

/// What one discovery and injection pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Inputs matched by the site's target selectors.
    pub candidates: Vec<NodeId>,
    /// Inputs that gained a control in this pass.
    pub attached: Vec<NodeId>,
    /// Newly attached inputs to translate automatically.
    pub auto_translate: Vec<NodeId>,
    /// Controls dropped because their input left the page.
    pub pruned: usize,
}

/// Result of a translate click.
#[derive(Debug)]
pub enum TranslateOutcome {
    Translated(String),
    /// No source text; the user was alerted and nothing was sent.
    NoSourceText,
    Failed(TranslateError),
    /// No control on this input, or a request for it is already running.
    Skipped,
}

pub struct TranslationAssistant {
    config: SiteConfig,
    injector: Injector,
    watcher: MutationWatcher,
    bridge: Arc<dyn TranslationBridge>,
    notifier: Arc<dyn Notifier>,
    auto_translate: bool,
    auto_translate_delay: Duration,
}

impl TranslationAssistant {
    pub fn new(
        config: SiteConfig,
        bridge: Arc<dyn TranslationBridge>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let watcher = MutationWatcher::for_site(&config, &WatcherConfig::default());
        Self {
            config,
            injector: Injector::new(UiStrings::default()),
            watcher,
            bridge,
            notifier,
            auto_translate: false,
            auto_translate_delay: DEFAULT_AUTO_TRANSLATE_DELAY,
        }
    }

    pub fn with_strings(mut self, strings: UiStrings) -> Self {
        self.injector = Injector::new(strings);
        self
    }

    pub fn with_watcher(mut self, timing: &WatcherConfig) -> Self {
        self.watcher = MutationWatcher::for_site(&self.config, timing);
        self
    }

    pub fn with_auto_translate(mut self, enabled: bool, delay: Duration) -> Self {
        self.auto_translate = enabled;
        self.auto_translate_delay = delay;
        self
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn injector(&self) -> &Injector {
        &self.injector
    }

    pub fn bridge(&self) -> Arc<dyn TranslationBridge> {
        self.bridge.clone()
    }

    /// Start observing the page and run the first scan.
    pub fn start(&mut self, doc: &mut Document, now: Instant) -> ScanReport {
        doc.start_observing();
        let report = self.scan(doc);
        self.watcher.mark_rescanned(now);
        info!(
            "Translation assistant started on {} ({} controls)",
            self.config.name(),
            report.attached.len()
        );
        report
    }

    /// Discover, validate and decorate target inputs. Inputs that already
    /// carry a control are left alone, so repeated scans are harmless.
    pub fn scan(&mut self, doc: &mut Document) -> ScanReport {
        let pruned = self.injector.prune_orphans(doc);
        let candidates = discover_targets(doc, &self.config);
        if candidates.is_empty() {
            debug!("No translation inputs found on {}", self.config.name());
        }

        let mut attached = Vec::new();
        for (index, &target) in candidates.iter().enumerate() {
            if Injector::is_attached(doc, target) || !is_valid_target(doc, target, &self.config) {
                continue;
            }
            if self.injector.attach(doc, target, index, &self.config) {
                attached.push(target);
            }
        }

        let auto_translate = if self.auto_translate {
            attached.clone()
        } else {
            Vec::new()
        };
        ScanReport {
            candidates,
            attached,
            auto_translate,
            pruned,
        }
    }

    /// Drain the page's mutation records into the watcher.
    pub fn on_mutations(&mut self, doc: &mut Document, now: Instant) -> bool {
        let records = doc.take_records();
        if records.is_empty() {
            return false;
        }
        self.watcher.observe(doc, &records, now)
    }

    /// Run the rescan if one is due.
    pub fn poll(&mut self, doc: &mut Document, now: Instant) -> Option<ScanReport> {
        self.watcher.poll(now).then(|| self.scan(doc))
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.watcher.next_deadline()
    }

    /// First half of a translate click: locate the source text and put the
    /// control into its requesting state. On `Ok` the caller sends the
    /// returned text and reports back through
    /// [`complete_translate`](Self::complete_translate).
    pub fn begin_translate(
        &mut self,
        doc: &mut Document,
        target: NodeId,
    ) -> Result<String, TranslateOutcome> {
        match self.injector.control_for(target) {
            Some(control) if control.state != ControlState::Requesting => {}
            _ => return Err(TranslateOutcome::Skipped),
        }

        let source_text = find_source_text(doc, target, &self.config);
        if source_text.is_empty() {
            self.notifier.alert(&self.injector.strings().no_source_text);
            return Err(TranslateOutcome::NoSourceText);
        }
        if !self.injector.begin_request(doc, target, &source_text) {
            return Err(TranslateOutcome::Skipped);
        }
        Ok(source_text)
    }

    /// Second half of a translate click. The button is restored whatever
    /// the result.
    pub fn complete_translate(
        &mut self,
        doc: &mut Document,
        target: NodeId,
        result: Result<String, TranslateError>,
    ) -> TranslateOutcome {
        match result {
            Ok(translation) => {
                self.injector
                    .finish_request(doc, target, Some(&translation));
                TranslateOutcome::Translated(translation)
            }
            Err(err) => {
                self.injector.finish_request(doc, target, None);
                warn!("Translation failed: {}", err);
                let strings = self.injector.strings();
                if err.kind() == ErrorKind::Configuration {
                    self.notifier.alert(&strings.configure_api);
                    self.notifier.open_options();
                } else {
                    self.notifier
                        .alert(&format!("{}{}", strings.translation_error, err));
                }
                TranslateOutcome::Failed(err)
            }
        }
    }

    /// A whole translate click, awaiting the bridge in between.
    pub async fn click_translate(&mut self, doc: &mut Document, target: NodeId) -> TranslateOutcome {
        let source_text = match self.begin_translate(doc, target) {
            Ok(text) => text,
            Err(outcome) => return outcome,
        };
        let result = self.bridge.translate(&source_text).await;
        self.complete_translate(doc, target, result)
    }

    /// Click each target's translate button after the layout delay.
    ///
    /// The delay is a fixed guess at when the page has settled; the host
    /// gives no signal to wait for instead.
    pub async fn run_auto_translate(
        &mut self,
        doc: &mut Document,
        targets: &[NodeId],
    ) -> Vec<TranslateOutcome> {
        if targets.is_empty() {
            return Vec::new();
        }
        tokio::time::sleep(self.auto_translate_delay).await;
        let mut outcomes = Vec::with_capacity(targets.len());
        for &target in targets {
            outcomes.push(self.click_translate(doc, target).await);
        }
        outcomes
    }

    /// Write the shown translation into the input.
    pub fn apply(&mut self, doc: &mut Document, target: NodeId) -> bool {
        self.injector.apply(doc, target)
    }

    /// Remove every control and marker so the next scan starts over.
    pub fn reset(&mut self, doc: &mut Document) {
        self.injector.cleanup(doc);
    }
}

#[cfg(test)]
#[path = "assistant_tests.rs"]
mod tests;
