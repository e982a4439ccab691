use crate::record::RecordTypeId;

/// Content shown when a navigation entry is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionTarget {
    /// List view of one record type.
    Records(RecordTypeId),
    /// Section that exists in the navigation but has no implementation yet.
    Placeholder {
        /// Section title.
        title: &'static str,
    },
}

/// One item of the dashboard navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationEntry {
    /// Stable navigation identifier posted by the navigation links.
    pub target_id: &'static str,
    /// Link text.
    pub label: &'static str,
    /// Section mounted on selection.
    pub section: SectionTarget,
}

/// Dashboard navigation in display order.
pub const NAVIGATION: [NavigationEntry; 12] = [
    records("bookings", "Bookings", RecordTypeId::Bookings),
    records("contacts", "Contacts", RecordTypeId::Contacts),
    records("services", "Services", RecordTypeId::Services),
    records("testimonials", "Testimonials", RecordTypeId::Testimonials),
    records("merchandise", "Merchandise", RecordTypeId::Merchandise),
    records("posts", "Blog & Vlog", RecordTypeId::Posts),
    records("schedule", "Schedule", RecordTypeId::Schedule),
    records("events", "Events", RecordTypeId::Events),
    records("event_bookings", "Event Bookings", RecordTypeId::EventBookings),
    records("tutorials", "Tutorials", RecordTypeId::Tutorials),
    NavigationEntry {
        target_id: "subscribers",
        label: "Subscribers",
        section: SectionTarget::Placeholder {
            title: "Manage Subscribers",
        },
    },
    NavigationEntry {
        target_id: "analytics",
        label: "Analytics",
        section: SectionTarget::Placeholder {
            title: "View Analytics",
        },
    },
];

const fn records(
    target_id: &'static str,
    label: &'static str,
    record_type: RecordTypeId,
) -> NavigationEntry {
    NavigationEntry {
        target_id,
        label,
        section: SectionTarget::Records(record_type),
    }
}

/// Resolves a navigation identifier. Unknown identifiers resolve to `None`.
#[must_use]
pub fn resolve_navigation_target(target_id: &str) -> Option<&'static NavigationEntry> {
    NAVIGATION.iter().find(|entry| entry.target_id == target_id)
}

#[cfg(test)]
mod tests {
    use crate::record::RecordTypeId;

    use super::{NAVIGATION, SectionTarget, resolve_navigation_target};

    #[test]
    fn every_record_type_is_reachable_from_navigation() {
        for record_type in RecordTypeId::ALL {
            assert_eq!(
                resolve_navigation_target(record_type.as_str()).map(|entry| entry.section),
                Some(SectionTarget::Records(record_type))
            );
        }
    }

    #[test]
    fn unimplemented_sections_resolve_to_placeholders() {
        assert!(matches!(
            resolve_navigation_target("analytics").map(|entry| entry.section),
            Some(SectionTarget::Placeholder { .. })
        ));
        assert_eq!(resolve_navigation_target("payroll"), None);
    }

    #[test]
    fn navigation_identifiers_are_unique() {
        for (index, entry) in NAVIGATION.iter().enumerate() {
            assert!(
                NAVIGATION[index + 1..]
                    .iter()
                    .all(|other| other.target_id != entry.target_id)
            );
        }
    }
}
