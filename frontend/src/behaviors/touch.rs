use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};
use web_sys::{Document, Element, Event, Window};

use crate::config::TouchConfig;
use crate::dom::{self, Debouncer, ListenerRegistry};
use crate::error::LandingError;
use crate::faq::AccordionState;

pub fn touch_supported(has_ontouchstart: bool, max_touch_points: i32) -> bool {
    has_ontouchstart || max_touch_points > 0
}

/// Press feedback on touch devices, plus an exclusive "hover" state for
/// feature cards, which have no real hover on touch screens.
pub struct TouchInteractions {
    _listeners: ListenerRegistry,
}

impl TouchInteractions {
    pub fn install(
        window: &Window,
        document: &Document,
        config: &TouchConfig,
    ) -> Result<Self, LandingError> {
        let mut listeners = ListenerRegistry::new();

        let supported = touch_supported(
            dom::has_global(window, "ontouchstart"),
            window.navigator().max_touch_points(),
        );
        if supported {
            let elements = dom::query_all(document, &config.feedback_selector)?;
            for element in &elements {
                attach_feedback(&mut listeners, element, config)?;
            }
            debug!("Touch feedback attached to {} elements", elements.len());
        }

        let cards = Rc::new(dom::query_all(document, &config.card_selector)?);
        let hovered = Rc::new(RefCell::new(AccordionState::new()));
        for (index, card) in cards.iter().enumerate() {
            let cards = Rc::clone(&cards);
            let hovered = Rc::clone(&hovered);
            let hover_class = config.hover_class.clone();
            listeners.listen_passive(card, "touchstart", move |_: Event| {
                let mut hovered = hovered.borrow_mut();
                hovered.activate(index);
                for (i, card) in cards.iter().enumerate() {
                    dom::set_class(card, &hover_class, hovered.is_open(i));
                }
            })?;
        }

        info!(
            "Touch interactions ready (touch support: {}, {} cards)",
            supported,
            cards.len()
        );
        Ok(Self {
            _listeners: listeners,
        })
    }
}

fn attach_feedback(
    listeners: &mut ListenerRegistry,
    element: &Element,
    config: &TouchConfig,
) -> Result<(), LandingError> {
    let target = element.clone();
    let class = config.active_class.clone();
    listeners.listen_passive(element, "touchstart", move |_: Event| {
        dom::set_class(&target, &class, true);
    })?;

    let target = element.clone();
    let class = config.active_class.clone();
    // One pending release per element; a new touchend replaces the old one.
    let release = Debouncer::new(config.release_ms);
    listeners.listen_passive(element, "touchend", move |_: Event| {
        let target = target.clone();
        let class = class.clone();
        release.call(move || dom::set_class(&target, &class, false));
    })?;

    let target = element.clone();
    let class = config.active_class.clone();
    listeners.listen_passive(element, "touchcancel", move |_: Event| {
        dom::set_class(&target, &class, false);
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_detection() {
        assert!(touch_supported(true, 0));
        assert!(touch_supported(false, 5));
        assert!(!touch_supported(false, 0));
    }

    #[test]
    fn card_hover_is_exclusive_and_toggles() {
        // Cards share the accordion state machine.
        let mut hovered = AccordionState::new();
        hovered.activate(0);
        hovered.activate(2);
        assert!(hovered.is_open(2) && !hovered.is_open(0));
        hovered.activate(2);
        assert_eq!(hovered.open_index(), None);
    }
}
