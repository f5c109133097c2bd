use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{debug, warn};

use crate::faq::controller::FaqController;

/// What the page looks like to the controller at check time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub discovered: usize,
    pub bindable: usize,
    pub bound: usize,
    pub initialized: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildReason {
    NotInitialized,
    BindingMismatch { bound: usize, bindable: usize },
}

impl fmt::Display for RebuildReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RebuildReason::NotInitialized => write!(f, "controller never finished initializing"),
            RebuildReason::BindingMismatch { bound, bindable } => {
                write!(f, "{} items bound but {} on the page", bound, bindable)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    NoItems,
    Healthy,
    Rebuild(RebuildReason),
}

pub fn assess(snapshot: &Snapshot) -> Verdict {
    if snapshot.discovered == 0 {
        return Verdict::NoItems;
    }
    if !snapshot.initialized {
        return Verdict::Rebuild(RebuildReason::NotInitialized);
    }
    if snapshot.bound != snapshot.bindable {
        return Verdict::Rebuild(RebuildReason::BindingMismatch {
            bound: snapshot.bound,
            bindable: snapshot.bindable,
        });
    }
    Verdict::Healthy
}

/// Runs a single check `delay_ms` after being called. The timer is not kept,
/// so it can be neither cancelled nor repeated.
pub fn schedule(controller: Rc<RefCell<FaqController>>, delay_ms: u32) {
    let timeout = Timeout::new(delay_ms, move || {
        match controller.borrow_mut().reinitialize_if_needed() {
            Ok(verdict) => debug!("FAQ watchdog: {:?}", verdict),
            Err(e) => warn!("FAQ watchdog failed: {}", e),
        }
    });
    timeout.forget();
}
