use log::{debug, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    js_sys, Document, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    Window,
};

use crate::config::AnimationConfig;
use crate::dom;
use crate::error::LandingError;

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Adds the reveal class to elements as they first scroll into view.
pub struct ScrollAnimations {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl ScrollAnimations {
    /// `Ok(None)` when the browser has no `IntersectionObserver`.
    pub fn install(
        window: &Window,
        document: &Document,
        config: &AnimationConfig,
    ) -> Result<Option<Self>, LandingError> {
        if !dom::has_global(window, "IntersectionObserver") {
            debug!("IntersectionObserver unavailable, skipping scroll animations");
            return Ok(None);
        }

        let visible_class = config.visible_class.clone();
        let callback: ObserverCallback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if entry.is_intersecting() {
                        dom::set_class(&entry.target(), &visible_class, true);
                    }
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(config.threshold));
        options.set_root_margin(&config.root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        let elements = dom::query_all(document, &config.selector)?;
        for element in &elements {
            observer.observe(element);
        }

        info!("Observing {} elements for scroll animations", elements.len());
        Ok(Some(Self {
            observer,
            _callback: callback,
        }))
    }
}

impl Drop for ScrollAnimations {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
