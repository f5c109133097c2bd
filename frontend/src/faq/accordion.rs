/// Which item of a single-open group is expanded, if any.
///
/// The DOM only ever mirrors this value; it is never read back to decide
/// what to do next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccordionState {
    open: Option<usize>,
}

/// What an activation did, so the caller can project it onto the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Opened { index: usize, closed: Option<usize> },
    Closed { index: usize },
}

impl AccordionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the state from markup that may already mark items as expanded.
    /// Only the first marked item is kept.
    pub fn from_expanded<I>(expanded: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        Self {
            open: expanded.into_iter().position(|is_expanded| is_expanded),
        }
    }

    pub fn open_index(&self) -> Option<usize> {
        self.open
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    pub fn open_count(&self) -> usize {
        usize::from(self.open.is_some())
    }

    /// Activating the open item closes it, activating any other item opens
    /// it and closes whatever was open.
    pub fn activate(&mut self, index: usize) -> Transition {
        match self.open {
            Some(current) if current == index => {
                self.open = None;
                Transition::Closed { index }
            }
            previous => {
                self.open = Some(index);
                Transition::Opened {
                    index,
                    closed: previous,
                }
            }
        }
    }
}

/// Keys that activate a focused question the same way a click does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationKey {
    Enter,
    Space,
}

impl ActivationKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" => Some(Self::Enter),
            " " | "Spacebar" => Some(Self::Space),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_closes_previous() {
        let mut state = AccordionState::new();
        assert_eq!(
            state.activate(1),
            Transition::Opened { index: 1, closed: None }
        );
        assert_eq!(
            state.activate(2),
            Transition::Opened { index: 2, closed: Some(1) }
        );
        assert!(state.is_open(2));
        assert!(!state.is_open(1));
    }

    #[test]
    fn reactivating_open_item_closes_it() {
        let mut state = AccordionState::new();
        state.activate(0);
        assert_eq!(state.activate(0), Transition::Closed { index: 0 });
        assert_eq!(state.open_index(), None);
        assert_eq!(state.open_count(), 0);
    }

    #[test]
    fn parity_of_repeated_activation() {
        let mut state = AccordionState::new();
        for n in 1..=6 {
            state.activate(4);
            assert_eq!(state.is_open(4), n % 2 == 1);
        }
    }

    #[test]
    fn seed_keeps_first_expanded_only() {
        let state = AccordionState::from_expanded([false, true, true]);
        assert_eq!(state.open_index(), Some(1));
        assert_eq!(AccordionState::from_expanded([false, false]).open_index(), None);
        assert_eq!(AccordionState::from_expanded(std::iter::empty()).open_index(), None);
    }

    #[test]
    fn activation_keys() {
        assert_eq!(ActivationKey::from_key("Enter"), Some(ActivationKey::Enter));
        assert_eq!(ActivationKey::from_key(" "), Some(ActivationKey::Space));
        assert_eq!(ActivationKey::from_key("Spacebar"), Some(ActivationKey::Space));
        assert_eq!(ActivationKey::from_key("Tab"), None);
        assert_eq!(ActivationKey::from_key("a"), None);
    }
}
