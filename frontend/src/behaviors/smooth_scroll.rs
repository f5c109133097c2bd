use log::{debug, info};
use wasm_bindgen::JsValue;
use web_sys::{
    Document, Element, Event, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
    ScrollToOptions, Window,
};

use crate::config::LinkConfig;
use crate::dom::{self, ListenerRegistry};
use crate::error::LandingError;

/// Where an in-page link points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollTarget {
    Top,
    Element(String),
}

/// Parses the `href` of an in-page link. `#` and `#top` mean the top of the
/// page, anything else is treated as an element id.
pub fn fragment_target(href: &str) -> Option<ScrollTarget> {
    let id = href.strip_prefix('#')?;
    match id {
        "" | "top" => Some(ScrollTarget::Top),
        id if id.chars().any(char::is_whitespace) => None,
        id => Some(ScrollTarget::Element(id.to_string())),
    }
}

pub struct SmoothScroll {
    _listeners: ListenerRegistry,
}

impl SmoothScroll {
    pub fn install(
        window: &Window,
        document: &Document,
        config: &LinkConfig,
    ) -> Result<Self, LandingError> {
        let mut listeners = ListenerRegistry::new();
        let links = dom::query_all(document, &config.in_page_selector)?;

        for link in &links {
            let window = window.clone();
            let document = document.clone();
            let source = link.clone();
            listeners.listen(link, "click", move |event: Event| {
                let Some(href) = source.get_attribute("href") else {
                    return;
                };
                if scroll_to(&window, &document, &href) {
                    event.prevent_default();
                    push_fragment(&window, &href);
                }
            })?;
        }

        info!("Smooth scrolling attached to {} in-page links", links.len());
        Ok(Self {
            _listeners: listeners,
        })
    }
}

/// Returns whether a scroll happened; without a target the browser's own
/// navigation is left alone.
fn scroll_to(window: &Window, document: &Document, href: &str) -> bool {
    match fragment_target(href) {
        Some(ScrollTarget::Top) => {
            let options = ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
            true
        }
        Some(ScrollTarget::Element(id)) => match document.get_element_by_id(&id) {
            Some(target) => {
                scroll_into_view(&target);
                true
            }
            None => {
                debug!("No scroll target for {}", href);
                false
            }
        },
        None => false,
    }
}

fn scroll_into_view(target: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
}

fn push_fragment(window: &Window, href: &str) {
    let pushed = window
        .history()
        .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(href)));
    if let Err(e) = pushed {
        debug!("URL not updated to {}: {:?}", href, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hash_and_top_scroll_to_top() {
        assert_eq!(fragment_target("#"), Some(ScrollTarget::Top));
        assert_eq!(fragment_target("#top"), Some(ScrollTarget::Top));
    }

    #[test]
    fn element_ids() {
        assert_eq!(
            fragment_target("#faq"),
            Some(ScrollTarget::Element("faq".to_string()))
        );
        assert_eq!(
            fragment_target("#download-section"),
            Some(ScrollTarget::Element("download-section".to_string()))
        );
    }

    #[test]
    fn non_fragments_are_ignored() {
        assert_eq!(fragment_target("https://swarailapk.com"), None);
        assert_eq!(fragment_target("/about#faq"), None);
        assert_eq!(fragment_target("#not an id"), None);
    }
}
