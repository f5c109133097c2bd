use log::{error, info};
use wasm_bindgen::JsCast;
use web_sys::{ErrorEvent, Event, PromiseRejectionEvent, Window};

use crate::dom::ListenerRegistry;
use crate::error::LandingError;

/// Logs uncaught script errors and unhandled promise rejections instead of
/// letting them surface to the visitor.
pub struct GlobalErrorLogging {
    _listeners: ListenerRegistry,
}

impl GlobalErrorLogging {
    pub fn install(window: &Window) -> Result<Self, LandingError> {
        let mut listeners = ListenerRegistry::new();

        listeners.listen(window, "error", |event: Event| {
            match event.dyn_ref::<ErrorEvent>() {
                Some(e) => error!(
                    "Script error: {} ({}:{}:{})",
                    e.message(),
                    e.filename(),
                    e.lineno(),
                    e.colno()
                ),
                None => error!("Script error: {:?}", event.type_()),
            }
        })?;

        listeners.listen(window, "unhandledrejection", |event: Event| {
            match event.dyn_ref::<PromiseRejectionEvent>() {
                Some(e) => error!("Unhandled promise rejection: {:?}", e.reason()),
                None => error!("Unhandled promise rejection"),
            }
            event.prevent_default();
        })?;

        info!("Global error logging installed");
        Ok(Self {
            _listeners: listeners,
        })
    }
}
