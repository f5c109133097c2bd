use log::{debug, info};
use web_sys::{Document, Event, Window};

use crate::config::{FaqConfig, ResizeConfig};
use crate::dom::{self, Debouncer, ListenerRegistry};
use crate::error::LandingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Mobile,
    Desktop,
}

pub fn layout_for_width(width: f64, breakpoint: f64) -> Layout {
    if width < breakpoint {
        Layout::Mobile
    } else {
        Layout::Desktop
    }
}

/// Applies the mobile layout class to FAQ items once resizing settles.
pub struct ResponsiveLayout {
    _listeners: ListenerRegistry,
}

impl ResponsiveLayout {
    pub fn install(
        window: &Window,
        document: &Document,
        config: &ResizeConfig,
        faq: &FaqConfig,
    ) -> Result<Self, LandingError> {
        let mut listeners = ListenerRegistry::new();
        let debouncer = Debouncer::new(config.debounce_ms);

        let target = window.clone();
        let document = document.clone();
        let config = config.clone();
        let item_selector = faq.item_selector.clone();
        listeners.listen(window, "resize", move |_: Event| {
            let window = target.clone();
            let document = document.clone();
            let config = config.clone();
            let item_selector = item_selector.clone();
            debouncer.call(move || apply_layout(&window, &document, &config, &item_selector));
        })?;

        info!("Resize handling installed");
        Ok(Self {
            _listeners: listeners,
        })
    }
}

fn apply_layout(window: &Window, document: &Document, config: &ResizeConfig, item_selector: &str) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or_default();
    let height = window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or_default();
    debug!("Window resized: {} x {}", width, height);

    let mobile = layout_for_width(width, config.mobile_breakpoint_px) == Layout::Mobile;
    if let Ok(items) = dom::query_all(document, item_selector) {
        for item in &items {
            dom::set_class(item, &config.mobile_class, mobile);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_is_exclusive() {
        assert_eq!(layout_for_width(767.0, 768.0), Layout::Mobile);
        assert_eq!(layout_for_width(768.0, 768.0), Layout::Desktop);
        assert_eq!(layout_for_width(1440.0, 768.0), Layout::Desktop);
        assert_eq!(layout_for_width(0.0, 768.0), Layout::Mobile);
    }
}
