use log::{info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlAnchorElement, HtmlImageElement};

use crate::config::LinkConfig;
use crate::dom::{self, ListenerRegistry};
use crate::error::LandingError;

/// Attributes an outbound link is missing. `href` is only filled in when a
/// fallback is given.
pub fn missing_attributes<F>(
    has: F,
    fallback_href: Option<&str>,
    config: &LinkConfig,
) -> Vec<(&'static str, String)>
where
    F: Fn(&str) -> bool,
{
    let mut plan = Vec::new();
    if let Some(href) = fallback_href {
        if !has("href") {
            plan.push(("href", href.to_string()));
        }
    }
    if !has("target") {
        plan.push(("target", config.target.clone()));
    }
    if !has("rel") {
        plan.push(("rel", config.rel.clone()));
    }
    plan
}

/// External links get `rel`/`target` hardening; broken images get hidden.
pub struct LinkHardening {
    _listeners: ListenerRegistry,
}

impl LinkHardening {
    pub fn install(document: &Document, config: &LinkConfig) -> Result<Self, LandingError> {
        let mut listeners = ListenerRegistry::new();

        for image in dom::query_all(document, "img")? {
            let target = image.clone();
            listeners.listen(&image, "error", move |_: Event| {
                let src = target
                    .dyn_ref::<HtmlImageElement>()
                    .map(|img| img.src())
                    .unwrap_or_default();
                warn!("Image failed to load: {}", src);
                dom::set_style(&target, "display", "none");
            })?;
        }

        let links = dom::query_all(document, &config.external_selector)?;
        for link in &links {
            for (name, value) in missing_attributes(|name| link.has_attribute(name), None, config) {
                link.set_attribute(name, &value)?;
            }

            let Some(anchor) = link.dyn_ref::<HtmlAnchorElement>().cloned() else {
                continue;
            };
            let config = config.clone();
            listeners.listen(link, "click", move |_: Event| {
                info!("External link clicked: {}", anchor.href());
                if anchor.target().is_empty() {
                    anchor.set_target(&config.target);
                }
                if anchor.rel().is_empty() {
                    anchor.set_rel(&config.rel);
                }
            })?;
        }

        info!("Hardened {} external links", links.len());
        Ok(Self {
            _listeners: listeners,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_link_gets_everything() {
        let config = LinkConfig::default();
        let plan = missing_attributes(|_| false, Some("https://swarailapk.com"), &config);
        assert_eq!(
            plan,
            vec![
                ("href", "https://swarailapk.com".to_string()),
                ("target", "_blank".to_string()),
                ("rel", "noopener noreferrer".to_string()),
            ]
        );
    }

    #[test]
    fn existing_attributes_are_kept() {
        let config = LinkConfig::default();
        let plan = missing_attributes(|name| name != "rel", Some("https://fallback"), &config);
        assert_eq!(plan, vec![("rel", "noopener noreferrer".to_string())]);
    }

    #[test]
    fn href_untouched_without_fallback() {
        let config = LinkConfig::default();
        let plan = missing_attributes(|name| name == "target", None, &config);
        assert_eq!(plan, vec![("rel", "noopener noreferrer".to_string())]);
    }
}
