use log::{warn, Level};
use serde::Deserialize;
use web_sys::Document;

use crate::error::LandingError;

/// Id of the optional inline JSON element that overrides the defaults below.
pub const CONFIG_ELEMENT_ID: &str = "landing-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose console output when running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LandingConfig {
    pub faq: FaqConfig,
    pub downloads: DownloadConfig,
    pub touch: TouchConfig,
    pub links: LinkConfig,
    pub animations: AnimationConfig,
    pub resize: ResizeConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FaqConfig {
    pub item_selector: String,
    pub question_selector: String,
    pub answer_selector: String,
    pub expanded_class: String,
    pub watchdog_delay_ms: u32,
}

impl Default for FaqConfig {
    fn default() -> Self {
        Self {
            item_selector: ".faq-item".to_string(),
            question_selector: ".faq-question".to_string(),
            answer_selector: ".faq-answer".to_string(),
            expanded_class: "expanded".to_string(),
            watchdog_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    pub selector: String,
    pub fallback_href: String,
    pub press_scale: String,
    pub press_feedback_ms: u32,
    pub fallback_open_delay_ms: u32,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            selector: ".download-btn".to_string(),
            fallback_href: "https://swarailapk.com".to_string(),
            press_scale: "scale(0.98)".to_string(),
            press_feedback_ms: 100,
            fallback_open_delay_ms: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TouchConfig {
    pub feedback_selector: String,
    pub active_class: String,
    pub release_ms: u32,
    pub card_selector: String,
    pub hover_class: String,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            feedback_selector: ".btn, .faq-question, .feature-category, .point-item".to_string(),
            active_class: "touch-active".to_string(),
            release_ms: 150,
            card_selector: ".feature-category".to_string(),
            hover_class: "mobile-hover".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    pub in_page_selector: String,
    pub external_selector: String,
    pub rel: String,
    pub target: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            in_page_selector: "a[href^=\"#\"]".to_string(),
            external_selector: "a[href^=\"http\"]".to_string(),
            rel: "noopener noreferrer".to_string(),
            target: "_blank".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub selector: String,
    pub visible_class: String,
    pub threshold: f64,
    pub root_margin: String,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            selector: ".feature-category, .point-item, .comparison-item".to_string(),
            visible_class: "animate-in".to_string(),
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    pub debounce_ms: u32,
    pub mobile_breakpoint_px: f64,
    pub mobile_class: String,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 250,
            mobile_breakpoint_px: 768.0,
            mobile_class: "mobile-layout".to_string(),
        }
    }
}

impl LandingConfig {
    pub fn from_json(raw: &str) -> Result<Self, LandingError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads the inline override element if the page carries one.
    /// Anything unparseable falls back to the defaults.
    pub fn load(document: &Document) -> Self {
        let Some(raw) = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|element| element.text_content())
        else {
            return Self::default();
        };

        if raw.trim().is_empty() {
            return Self::default();
        }

        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = LandingConfig::from_json("{}").unwrap();
        assert_eq!(config, LandingConfig::default());
        assert_eq!(config.faq.watchdog_delay_ms, 1000);
        assert_eq!(config.faq.expanded_class, "expanded");
    }

    #[test]
    fn partial_override_keeps_other_fields() {
        let config = LandingConfig::from_json(
            r#"{ "faq": { "watchdog_delay_ms": 2500 }, "downloads": { "fallback_href": "https://example.org/app.apk" } }"#,
        )
        .unwrap();

        assert_eq!(config.faq.watchdog_delay_ms, 2500);
        assert_eq!(config.faq.item_selector, ".faq-item");
        assert_eq!(config.downloads.fallback_href, "https://example.org/app.apk");
        assert_eq!(config.downloads.press_feedback_ms, 100);
        assert_eq!(config.resize, ResizeConfig::default());
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = LandingConfig::from_json("{ faq: ").unwrap_err();
        assert!(matches!(err, LandingError::Config(_)));
    }
}
