//! `scan` subcommand: run the site-adaptation layer over a saved page.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{info, warn};

use transassist_config::Config;
use transassist_core::{
    SiteRegistry, TracingNotifier, TranslateOutcome, TranslationAssistant, find_source_text,
};
use transassist_dom::{Document, NodeId, parse_html};

use crate::adapters::hostname_of;
use crate::register::create_background_service;

pub(crate) struct ScanOptions {
    pub file: PathBuf,
    pub host: String,
    pub translate: bool,
    pub apply: bool,
    pub output: Option<PathBuf>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScanSummary {
    host: String,
    site: String,
    site_name: String,
    supported: bool,
    load_assistant: bool,
    candidates: usize,
    targets: Vec<TargetSummary>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TargetSummary {
    index: usize,
    tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    source_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    translation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    applied: bool,
}

impl TargetSummary {
    fn describe(doc: &Document, target: NodeId, index: usize, source_text: String) -> Self {
        Self {
            index,
            tag: doc.tag_name(target).unwrap_or_default().to_string(),
            name: doc.attr(target, "name").map(str::to_string),
            id: doc.attr(target, "id").map(str::to_string),
            source_text,
            translation: None,
            error: None,
            applied: false,
        }
    }

    fn record(&mut self, outcome: TranslateOutcome) {
        match outcome {
            TranslateOutcome::Translated(text) => self.translation = Some(text),
            TranslateOutcome::Failed(err) => self.error = Some(err.to_string()),
            TranslateOutcome::NoSourceText => self.error = Some("No source text found".to_string()),
            TranslateOutcome::Skipped => {}
        }
    }
}

pub(crate) async fn scan(
    config: &Config,
    registry: Arc<SiteRegistry>,
    options: ScanOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let html = tokio::fs::read_to_string(&options.file).await?;
    let mut doc = parse_html(&html)?;

    let hostname = hostname_of(&options.host);
    let service = Arc::new(create_background_service(config, registry.clone()));
    let load_assistant = service.should_inject(&hostname).await;
    if !load_assistant {
        warn!(
            "{} is neither a registered site nor force-enabled; scanning with the default profile",
            hostname
        );
    }
    let settings = service.settings().await?;

    let site = registry.resolve(&hostname).clone();
    let mut assistant = TranslationAssistant::new(site, service.clone(), Arc::new(TracingNotifier))
        .with_strings(config.ui.clone())
        .with_watcher(&config.watcher)
        .with_auto_translate(
            settings.auto_translate,
            Duration::from_millis(config.assistant.auto_translate_delay_ms),
        );

    let report = assistant.start(&mut doc, Instant::now());
    let mut targets: Vec<TargetSummary> = assistant
        .injector()
        .controls()
        .iter()
        .map(|c| {
            let source = find_source_text(&doc, c.target, assistant.config());
            TargetSummary::describe(&doc, c.target, c.index, source)
        })
        .collect();
    let attached: Vec<NodeId> = assistant.injector().controls().iter().map(|c| c.target).collect();

    let translate = options.translate || options.apply;
    if translate {
        for (summary, &target) in targets.iter_mut().zip(&attached) {
            summary.record(assistant.click_translate(&mut doc, target).await);
        }
    } else if !report.auto_translate.is_empty() {
        let outcomes = assistant.run_auto_translate(&mut doc, &report.auto_translate).await;
        for (target, outcome) in report.auto_translate.iter().zip(outcomes) {
            if let Some(i) = attached.iter().position(|t| t == target) {
                targets[i].record(outcome);
            }
        }
    }

    if options.apply {
        for (summary, &target) in targets.iter_mut().zip(&attached) {
            summary.applied = summary.translation.is_some() && assistant.apply(&mut doc, target);
        }
        // The saved page carries the filled inputs, not our controls.
        assistant.reset(&mut doc);
    }

    let summary = ScanSummary {
        host: hostname.clone(),
        site: assistant.config().key().to_string(),
        site_name: assistant.config().name().to_string(),
        supported: registry.is_supported(&hostname),
        load_assistant,
        candidates: report.candidates.len(),
        targets,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if let Some(output) = options.output {
        write_page(&doc, &output).await?;
    }
    Ok(())
}

async fn write_page(doc: &Document, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let mut html = Vec::new();
    doc.write_html(&mut html)?;
    tokio::fs::write(path, html).await?;
    info!("Wrote {}", path.display());
    Ok(())
}
