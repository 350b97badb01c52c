//! Prompt rendering.
//!
//! A template carries three placeholders: `{source_lang}`, `{dest_lang}`
//! and `{glossary_list}`. The source text is appended to the rendered
//! template verbatim and sent as a single user message.

use transassist_config::{GlossaryEntry, Settings};
use transassist_protocols::{CompletionRequest, Message};

/// Used when the settings carry no usable template.
pub const FALLBACK_TEMPLATE: &str = "Please translate the following {source_lang} text into \
{dest_lang}, maintaining the tone and style of the original text. If there are any specialized \
terms, please refer to the glossary: {glossary_list}\n\nOriginal text:";

/// Rendered in place of an empty glossary.
pub const EMPTY_GLOSSARY: &str = "None";

pub const TEMPERATURE: f32 = 0.3;

/// Display name for a language code; unknown codes pass through.
pub fn language_name(code: &str) -> &str {
    match code {
        "auto" => "Auto Detect",
        "zh" => "Chinese",
        "zh-CN" => "Simplified Chinese",
        "zh-TW" => "Traditional Chinese",
        "en" => "English",
        "ja" => "Japanese",
        "ko" => "Korean",
        "fr" => "French",
        "de" => "German",
        "es" => "Spanish",
        "it" => "Italian",
        "pt" => "Portuguese",
        "ru" => "Russian",
        "ar" => "Arabic",
        "th" => "Thai",
        "vi" => "Vietnamese",
        other => other,
    }
}

/// `source -> target` pairs joined with `, `.
pub fn glossary_list(entries: &[GlossaryEntry]) -> String {
    if entries.is_empty() {
        return EMPTY_GLOSSARY.to_string();
    }
    entries
        .iter()
        .map(|e| format!("{} -> {}", e.source, e.target))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Substitute every placeholder occurrence in `template`.
pub fn render_template(template: &str, settings: &Settings) -> String {
    template
        .replace("{source_lang}", language_name(&settings.source_lang))
        .replace("{dest_lang}", language_name(&settings.target_lang))
        .replace("{glossary_list}", &glossary_list(&settings.glossary))
}

/// The full prompt text for `source_text`.
pub fn build_prompt(settings: &Settings, source_text: &str) -> String {
    let template = settings
        .active_prompt()
        .map(|p| p.content.as_str())
        .unwrap_or(FALLBACK_TEMPLATE);
    let mut prompt = render_template(template, settings);
    prompt.push_str(source_text);
    prompt
}

/// One user message at [`TEMPERATURE`], for the effective model.
pub fn build_request(settings: &Settings, source_text: &str) -> CompletionRequest {
    CompletionRequest::new(
        settings.effective_model(),
        vec![Message::user(build_prompt(settings, source_text))],
    )
    .with_temperature(TEMPERATURE)
}
