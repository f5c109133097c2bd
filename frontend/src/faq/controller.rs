use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, KeyboardEvent};

use crate::config::FaqConfig;
use crate::dom::{self, ListenerRegistry};
use crate::error::LandingError;
use crate::faq::accordion::{AccordionState, ActivationKey, Transition};
use crate::faq::watchdog::{self, Snapshot, Verdict};

/// Indices of the items that get handlers, given whether each item (in
/// document order) has a question and an answer. Incomplete items are left
/// out but still use up their index.
pub fn bind_plan(items: &[(bool, bool)]) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, (has_question, has_answer))| *has_question && *has_answer)
        .map(|(index, _)| index)
        .collect()
}

/// Whether a keydown with this `key` toggles the focused question. Any other
/// key is left to the browser untouched.
pub fn key_activates(key: &str) -> bool {
    ActivationKey::from_key(key).is_some()
}

/// The FAQ markup as discovered at initialization, plus the state it mirrors.
/// Shared between the controller and the handlers it attaches.
struct FaqView {
    state: AccordionState,
    containers: Vec<Element>,
    questions: Vec<Option<Element>>,
    expanded_class: String,
}

impl FaqView {
    fn empty(expanded_class: &str) -> Self {
        Self {
            state: AccordionState::new(),
            containers: Vec::new(),
            questions: Vec::new(),
            expanded_class: expanded_class.to_string(),
        }
    }

    fn activate(&mut self, index: usize) {
        match self.state.activate(index) {
            Transition::Opened { index, closed } => {
                debug!("FAQ item {} opened (closed {:?})", index, closed)
            }
            Transition::Closed { index } => debug!("FAQ item {} closed", index),
        }
        self.project();
    }

    /// Every container is rewritten on each activation, so items that were
    /// expanded in markup or skipped during binding still end up collapsed.
    fn project(&self) {
        for (index, container) in self.containers.iter().enumerate() {
            let open = self.state.is_open(index);
            dom::set_class(container, &self.expanded_class, open);
            if let Some(Some(question)) = self.questions.get(index) {
                let expanded = if open { "true" } else { "false" };
                if let Err(e) = question.set_attribute("aria-expanded", expanded) {
                    debug!("aria-expanded not set on FAQ item {}: {:?}", index, e);
                }
            }
        }
    }
}

pub struct FaqController {
    document: Document,
    config: FaqConfig,
    view: Rc<RefCell<FaqView>>,
    listeners: ListenerRegistry,
    bound: usize,
    initialized: bool,
}

impl FaqController {
    pub fn new(document: Document, config: FaqConfig) -> Self {
        let view = FaqView::empty(&config.expanded_class);
        Self {
            document,
            config,
            view: Rc::new(RefCell::new(view)),
            listeners: ListenerRegistry::new(),
            bound: 0,
            initialized: false,
        }
    }

    /// Binds every complete FAQ item on the page. Items missing a question
    /// or an answer keep their index but get no handlers. On failure nothing
    /// stays bound.
    pub fn initialize(&mut self) -> Result<(), LandingError> {
        self.detach();

        let containers = dom::query_all(&self.document, &self.config.item_selector)?;
        let parts: Vec<(Option<Element>, Option<Element>)> = containers
            .iter()
            .map(|container| {
                (
                    dom::child(container, &self.config.question_selector),
                    dom::child(container, &self.config.answer_selector),
                )
            })
            .collect();
        let presence: Vec<(bool, bool)> = parts
            .iter()
            .map(|(question, answer)| (question.is_some(), answer.is_some()))
            .collect();
        let plan = bind_plan(&presence);

        let state = AccordionState::from_expanded(
            containers
                .iter()
                .map(|container| container.class_list().contains(&self.config.expanded_class)),
        );
        let questions: Vec<Option<Element>> = parts
            .iter()
            .enumerate()
            .map(|(index, (question, _))| question.clone().filter(|_| plan.contains(&index)))
            .collect();

        // Handlers only ever see a view that matches what they were bound to.
        {
            let mut view = self.view.borrow_mut();
            view.state = state;
            view.containers = containers;
            view.questions = questions;
        }

        if let Err(e) = self.bind_all(&parts, &plan) {
            self.detach();
            return Err(e);
        }

        for skipped in (0..parts.len()).filter(|index| !plan.contains(index)) {
            debug!("Skipping FAQ item {}: missing question or answer", skipped);
        }
        self.bound = plan.len();
        self.initialized = true;
        info!("FAQ initialized with {} active items", self.bound);
        Ok(())
    }

    fn bind_all(
        &mut self,
        parts: &[(Option<Element>, Option<Element>)],
        plan: &[usize],
    ) -> Result<(), LandingError> {
        for &index in plan {
            let (Some(question), Some(answer)) = &parts[index] else {
                continue;
            };
            question.set_attribute("data-faq", &index.to_string())?;
            answer.set_attribute("data-answer", &index.to_string())?;
            self.bind(index, question)?;
        }
        Ok(())
    }

    fn bind(&mut self, index: usize, question: &Element) -> Result<(), LandingError> {
        let view = Rc::clone(&self.view);
        self.listeners.listen(question, "click", move |event: Event| {
            event.prevent_default();
            event.stop_propagation();
            view.borrow_mut().activate(index);
        })?;

        let view = Rc::clone(&self.view);
        self.listeners.listen(question, "keydown", move |event: Event| {
            let activates = event
                .dyn_ref::<KeyboardEvent>()
                .map_or(false, |key_event| key_activates(&key_event.key()));
            if !activates {
                return;
            }
            event.prevent_default();
            event.stop_propagation();
            view.borrow_mut().activate(index);
        })?;

        Ok(())
    }

    /// Removes every handler this controller attached. Question nodes are
    /// left in place.
    pub fn detach(&mut self) {
        self.listeners.detach_all();
        self.bound = 0;
        self.initialized = false;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn snapshot(&self) -> Result<Snapshot, LandingError> {
        let containers = dom::query_all(&self.document, &self.config.item_selector)?;
        let presence: Vec<(bool, bool)> = containers
            .iter()
            .map(|container| {
                (
                    dom::child(container, &self.config.question_selector).is_some(),
                    dom::child(container, &self.config.answer_selector).is_some(),
                )
            })
            .collect();

        Ok(Snapshot {
            discovered: containers.len(),
            bindable: bind_plan(&presence).len(),
            bound: self.bound,
            initialized: self.initialized,
        })
    }

    pub fn reinitialize_if_needed(&mut self) -> Result<Verdict, LandingError> {
        let verdict = watchdog::assess(&self.snapshot()?);
        if let Verdict::Rebuild(reason) = &verdict {
            info!("Reinitializing FAQ: {}", reason);
            self.initialize()?;
        }
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_items_means_nothing_to_bind() {
        assert!(bind_plan(&[]).is_empty());
    }

    #[test]
    fn item_missing_answer_is_skipped_but_keeps_its_index() {
        let plan = bind_plan(&[(true, true), (true, false), (true, true)]);
        assert_eq!(plan, vec![0, 2]);
    }

    #[test]
    fn item_missing_question_is_skipped() {
        let plan = bind_plan(&[(false, true), (true, true)]);
        assert_eq!(plan, vec![1]);
    }

    #[test]
    fn skipped_items_do_not_break_the_accordion() {
        // Item 1 has no answer; the others still toggle by their own index.
        let plan = bind_plan(&[(true, true), (true, false), (true, true)]);
        let mut state = AccordionState::new();
        for &index in &plan {
            state.activate(index);
            assert_eq!(state.open_index(), Some(index));
        }
        state.activate(2);
        assert_eq!(state.open_index(), None);
    }

    #[test]
    fn only_enter_and_space_activate() {
        assert!(key_activates("Enter"));
        assert!(key_activates(" "));
        for key in ["Tab", "Escape", "ArrowDown", "a", "Shift", ""] {
            assert!(!key_activates(key), "{:?} should be left to the browser", key);
        }
    }

    #[test]
    fn rebuild_reseeds_from_projection() {
        let mut before = AccordionState::new();
        before.activate(1);
        let projected = (0..3).map(|index| before.is_open(index));
        let mut after = AccordionState::from_expanded(projected);
        assert_eq!(after.open_index(), Some(1));
        after.activate(0);
        assert_eq!(after.open_index(), Some(0));
    }
}
