use coachdesk_domain::{RecordTypeId, SectionTarget, resolve_navigation_target};
use tracing::debug;

/// Which section the content area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouterState {
    /// Nothing selected; the welcome view is shown.
    #[default]
    NoSection,
    /// List view of one record type.
    Active(RecordTypeId),
    /// Navigation entry without an implementation.
    Placeholder {
        /// Navigation identifier.
        target_id: &'static str,
        /// Section title.
        title: &'static str,
    },
}

/// Section selection state machine.
#[derive(Debug, Clone, Default)]
pub struct NavigationRouter {
    state: RouterState,
}

impl NavigationRouter {
    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> RouterState {
        self.state
    }

    /// Selects a navigation target. Unknown targets fall back to the welcome view.
    pub fn select(&mut self, target_id: &str) -> RouterState {
        self.state = match resolve_navigation_target(target_id) {
            Some(entry) => match entry.section {
                SectionTarget::Records(record_type) => RouterState::Active(record_type),
                SectionTarget::Placeholder { title } => RouterState::Placeholder {
                    target_id: entry.target_id,
                    title,
                },
            },
            None => {
                debug!(target_id, "unknown navigation target");
                RouterState::NoSection
            }
        };

        self.state
    }

    /// Returns the navigation identifier to highlight.
    #[must_use]
    pub fn active_target_id(&self) -> Option<&'static str> {
        match self.state {
            RouterState::NoSection => None,
            RouterState::Active(record_type) => Some(record_type.as_str()),
            RouterState::Placeholder { target_id, .. } => Some(target_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use coachdesk_domain::RecordTypeId;

    use super::{NavigationRouter, RouterState};

    #[test]
    fn selecting_a_record_section_activates_it() {
        let mut router = NavigationRouter::default();
        assert_eq!(
            router.select("schedule"),
            RouterState::Active(RecordTypeId::Schedule)
        );
        assert_eq!(router.active_target_id(), Some("schedule"));
    }

    #[test]
    fn placeholder_sections_keep_their_identifier() {
        let mut router = NavigationRouter::default();
        assert!(matches!(
            router.select("subscribers"),
            RouterState::Placeholder {
                target_id: "subscribers",
                ..
            }
        ));
    }

    #[test]
    fn unknown_target_returns_to_welcome() {
        let mut router = NavigationRouter::default();
        router.select("events");
        assert_eq!(router.select("invoices"), RouterState::NoSection);
        assert_eq!(router.active_target_id(), None);
    }
}
