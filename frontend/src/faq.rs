pub mod accordion;
pub mod controller;
pub mod watchdog;

pub use accordion::{AccordionState, ActivationKey, Transition};
pub use controller::FaqController;
pub use watchdog::{RebuildReason, Snapshot, Verdict};
