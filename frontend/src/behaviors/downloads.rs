use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlAnchorElement, Window};

use crate::behaviors::links::missing_attributes;
use crate::config::{DownloadConfig, LinkConfig};
use crate::dom::{self, Debouncer, ListenerRegistry};
use crate::error::LandingError;

/// Download buttons: attribute hardening, press feedback and a delayed
/// `window.open` for clicks whose navigation was cancelled.
pub struct DownloadTracking {
    _listeners: ListenerRegistry,
}

impl DownloadTracking {
    pub fn install(
        window: &Window,
        document: &Document,
        config: &DownloadConfig,
        links: &LinkConfig,
    ) -> Result<Self, LandingError> {
        let mut listeners = ListenerRegistry::new();
        let buttons = dom::query_all(document, &config.selector)?;

        for button in &buttons {
            let plan = missing_attributes(
                |name| button.has_attribute(name),
                Some(config.fallback_href.as_str()),
                links,
            );
            for (name, value) in plan {
                button.set_attribute(name, &value)?;
            }

            let press = ButtonPress {
                window: window.clone(),
                button: button.clone(),
                config: config.clone(),
                feedback: Rc::new(RefCell::new(PressFeedback::default())),
                restore: Debouncer::new(config.press_feedback_ms),
                fallback: Debouncer::new(config.fallback_open_delay_ms),
            };
            listeners.listen(button, "click", move |event: Event| press.on_click(event))?;
        }

        info!("Download tracking attached to {} buttons", buttons.len());
        Ok(Self {
            _listeners: listeners,
        })
    }
}

fn href_of(element: &Element) -> String {
    match element.dyn_ref::<HtmlAnchorElement>() {
        Some(anchor) => anchor.href(),
        None => element.get_attribute("href").unwrap_or_default(),
    }
}

/// Transform to put back once the press feedback ends. A second press
/// while a restore is pending keeps the first value, which is the real one.
#[derive(Debug, Default)]
struct PressFeedback {
    original: Option<String>,
}

impl PressFeedback {
    fn press(&mut self, current: String) {
        if self.original.is_none() {
            self.original = Some(current);
        }
    }

    fn release(&mut self) -> Option<String> {
        self.original.take()
    }
}

/// Per-button click state. Each pending timeout is held, and replaced on the
/// next click, rather than leaked.
struct ButtonPress {
    window: Window,
    button: Element,
    config: DownloadConfig,
    feedback: Rc<RefCell<PressFeedback>>,
    restore: Debouncer,
    fallback: Debouncer,
}

impl ButtonPress {
    fn on_click(&self, event: Event) {
        let href = href_of(&self.button);
        info!("Download button clicked: {}", href);

        self.feedback
            .borrow_mut()
            .press(dom::style(&self.button, "transform"));
        dom::set_style(&self.button, "transform", &self.config.press_scale);
        let feedback = Rc::clone(&self.feedback);
        let pressed = self.button.clone();
        self.restore.call(move || {
            if let Some(original) = feedback.borrow_mut().release() {
                dom::set_style(&pressed, "transform", &original);
            }
        });

        track_download(&href);

        if href.is_empty() {
            return;
        }
        let window = self.window.clone();
        self.fallback.call(move || {
            // Only step in when something cancelled the link's own navigation.
            if !event.default_prevented() {
                return;
            }
            if let Err(e) = window.open_with_url_and_target_and_features(
                &href,
                "_blank",
                "noopener,noreferrer",
            ) {
                warn!("Fallback window.open failed: {:?}", e);
            }
        });
    }
}

fn track_download(url: &str) {
    info!("Tracking download click to: {}", url);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_press_restores_original_transform() {
        let mut feedback = PressFeedback::default();
        feedback.press("rotate(2deg)".to_string());
        assert_eq!(feedback.release(), Some("rotate(2deg)".to_string()));
        assert_eq!(feedback.release(), None);
    }

    #[test]
    fn rapid_second_press_keeps_first_transform() {
        let mut feedback = PressFeedback::default();
        feedback.press(String::new());
        // The second click reads the pressed style back from the element.
        feedback.press("scale(0.98)".to_string());
        assert_eq!(feedback.release(), Some(String::new()));
    }

    #[test]
    fn press_after_release_captures_again() {
        let mut feedback = PressFeedback::default();
        feedback.press("none".to_string());
        feedback.release();
        feedback.press("translateY(-1px)".to_string());
        assert_eq!(feedback.release(), Some("translateY(-1px)".to_string()));
    }
}
