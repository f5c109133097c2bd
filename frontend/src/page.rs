use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Window};

use crate::behaviors::{
    DownloadTracking, GlobalErrorLogging, LinkHardening, PerformanceMonitor, ResponsiveLayout,
    ScrollAnimations, SmoothScroll, TouchInteractions,
};
use crate::config::LandingConfig;
use crate::dom;
use crate::error::LandingError;
use crate::faq::{watchdog, FaqController};

thread_local! {
    static PAGE: RefCell<Option<Page>> = RefCell::new(None);
}

/// Every behavior installed on the page. Each one owns its listeners, so
/// the page owning them is what keeps them attached.
pub struct Page {
    pub faq: Rc<RefCell<FaqController>>,
    downloads: Option<DownloadTracking>,
    smooth_scroll: Option<SmoothScroll>,
    touch: Option<TouchInteractions>,
    links: Option<LinkHardening>,
    errors: Option<GlobalErrorLogging>,
    animations: Option<ScrollAnimations>,
    resize: Option<ResponsiveLayout>,
    performance: Option<PerformanceMonitor>,
}

fn install<T>(name: &str, f: impl FnOnce() -> Result<T, LandingError>) -> Option<T> {
    match f() {
        Ok(behavior) => Some(behavior),
        Err(e) => {
            warn!("{} not installed: {}", name, e);
            None
        }
    }
}

impl Page {
    /// Installs everything against an already parsed document. A behavior
    /// that fails to install is logged and skipped.
    pub fn boot(window: &Window, document: &Document, config: &LandingConfig) -> Self {
        let faq = Rc::new(RefCell::new(FaqController::new(
            document.clone(),
            config.faq.clone(),
        )));
        if let Err(e) = faq.borrow_mut().initialize() {
            warn!("FAQ initialization failed: {}", e);
        }
        watchdog::schedule(Rc::clone(&faq), config.faq.watchdog_delay_ms);

        let page = Self {
            faq,
            downloads: install("Download tracking", || {
                DownloadTracking::install(window, document, &config.downloads, &config.links)
            }),
            smooth_scroll: install("Smooth scroll", || {
                SmoothScroll::install(window, document, &config.links)
            }),
            touch: install("Touch interactions", || {
                TouchInteractions::install(window, document, &config.touch)
            }),
            links: install("Link hardening", || {
                LinkHardening::install(document, &config.links)
            }),
            errors: install("Error logging", || GlobalErrorLogging::install(window)),
            animations: install("Scroll animations", || {
                ScrollAnimations::install(window, document, &config.animations)
            })
            .flatten(),
            resize: install("Resize handling", || {
                ResponsiveLayout::install(window, document, &config.resize, &config.faq)
            }),
            performance: install("Performance monitoring", || {
                PerformanceMonitor::install(window, document)
            }),
        };

        info!("Landing page loaded ({} behaviors active)", page.active_behaviors());
        page
    }

    pub fn active_behaviors(&self) -> usize {
        [
            self.downloads.is_some(),
            self.smooth_scroll.is_some(),
            self.touch.is_some(),
            self.links.is_some(),
            self.errors.is_some(),
            self.animations.is_some(),
            self.resize.is_some(),
            self.performance.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
            + usize::from(self.faq.borrow().is_initialized())
    }
}

fn boot_once(window: &Window, document: &Document) {
    PAGE.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_some() {
            warn!("Landing page already booted, ignoring second start");
            return;
        }
        let config = LandingConfig::load(document);
        *slot = Some(Page::boot(window, document, &config));
    });
}

/// Boots the page at `DOMContentLoaded`, or right away when the document
/// has already been parsed by the time the module starts.
pub fn start() -> Result<(), LandingError> {
    let window = dom::window()?;
    let document = dom::document()?;

    if document.ready_state() != "loading" {
        boot_once(&window, &document);
        return Ok(());
    }

    let ready_document = document.clone();
    let on_ready = Closure::once_into_js(move || boot_once(&window, &ready_document));
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    document.add_event_listener_with_callback_and_add_event_listener_options(
        "DOMContentLoaded",
        on_ready.unchecked_ref(),
        &options,
    )?;
    Ok(())
}
