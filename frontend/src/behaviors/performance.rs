use chrono::{SecondsFormat, Utc};
use log::info;
use web_sys::{Document, Event, Window};

use crate::dom::ListenerRegistry;
use crate::error::LandingError;

pub const USER_AGENT_LIMIT: usize = 100;

/// Cuts the user agent to `limit` characters (not bytes).
pub fn truncate_user_agent(user_agent: &str, limit: usize) -> &str {
    match user_agent.char_indices().nth(limit) {
        Some((end, _)) => &user_agent[..end],
        None => user_agent,
    }
}

/// Logs page load timing once the `load` event fires.
pub struct PerformanceMonitor {
    _listeners: ListenerRegistry,
}

impl PerformanceMonitor {
    pub fn install(window: &Window, document: &Document) -> Result<Self, LandingError> {
        let mut listeners = ListenerRegistry::new();

        if document.ready_state() == "complete" {
            report_load(window);
        } else {
            let target = window.clone();
            listeners.listen(window, "load", move |_: Event| report_load(&target))?;
        }

        Ok(Self {
            _listeners: listeners,
        })
    }
}

fn report_load(window: &Window) {
    let Some(performance) = window.performance() else {
        return;
    };
    let load_ms = performance.now().round() as u64;
    let user_agent = window.navigator().user_agent().unwrap_or_default();

    info!("Page loaded in: {} ms", load_ms);
    info!(
        "Page performance: load_time={}ms user_agent={:?} timestamp={}",
        load_ms,
        truncate_user_agent(&user_agent, USER_AGENT_LIMIT),
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_agents_are_untouched() {
        assert_eq!(truncate_user_agent("curl/8.0", USER_AGENT_LIMIT), "curl/8.0");
    }

    #[test]
    fn long_agents_are_cut_at_limit() {
        let agent = "x".repeat(250);
        assert_eq!(truncate_user_agent(&agent, USER_AGENT_LIMIT).len(), 100);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let agent = "é".repeat(120);
        let cut = truncate_user_agent(&agent, USER_AGENT_LIMIT);
        assert_eq!(cut.chars().count(), 100);
    }
}
