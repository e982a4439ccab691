use serde::Serialize;

use crate::form_builder::FormView;
use crate::list_renderer::ListView;

/// What the content area currently displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ContentView {
    /// Greeting shown before any section is selected.
    Welcome,
    /// Load in progress.
    Loading {
        /// Heading of the section being loaded.
        heading: &'static str,
    },
    /// Record list.
    List(ListView),
    /// Create or edit form.
    Form(FormView),
    /// Section without an implementation.
    Placeholder {
        /// Section title.
        title: &'static str,
    },
    /// Load failure for the selected section.
    LoadFailed {
        /// Heading of the section that failed to load.
        heading: &'static str,
        /// Failure message.
        message: String,
    },
}

/// Proof that a render was started; committed only while still current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct RenderTicket {
    generation: u64,
}

impl RenderTicket {
    /// Returns the render generation of this ticket.
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// Content area with a monotonically increasing render generation.
///
/// Every render replaces the whole view. A render started earlier than the
/// latest one can never overwrite it.
#[derive(Debug, Clone)]
pub struct ContentArea {
    generation: u64,
    view: ContentView,
}

impl Default for ContentArea {
    fn default() -> Self {
        Self {
            generation: 0,
            view: ContentView::Welcome,
        }
    }
}

impl ContentArea {
    /// Starts a render, showing `placeholder` until it is committed.
    pub fn begin(&mut self, placeholder: ContentView) -> RenderTicket {
        self.generation += 1;
        self.view = placeholder;
        RenderTicket {
            generation: self.generation,
        }
    }

    /// Returns true while no newer render has started since `ticket`.
    #[must_use]
    pub fn is_current(&self, ticket: RenderTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Commits a finished render. Returns false and drops `view` when a newer
    /// render has started in the meantime.
    pub fn commit(&mut self, ticket: RenderTicket, view: ContentView) -> bool {
        if ticket.generation != self.generation {
            return false;
        }

        self.view = view;
        true
    }

    /// Replaces the view immediately, invalidating pending renders.
    pub fn show(&mut self, view: ContentView) {
        self.generation += 1;
        self.view = view;
    }

    /// Returns the current view.
    #[must_use]
    pub fn view(&self) -> &ContentView {
        &self.view
    }
}
