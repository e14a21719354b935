//! Fragment-driven view routing.
//!
//! [`View`] is what the UI shows; [`View::transition`] moves between views in
//! response to user actions. Writing the fragment back to the browser history
//! is up to the caller.

use crate::link::{event_fragment, parse_event_path};
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    #[default]
    Home,
    Create,
    Viewing { event_id: String },
    Responding { event_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    GoHome,
    StartCreate,
    EventCreated(String),
    OpenEvent(String),
    StartResponding,
    ResponseSaved,
    CancelResponding,
}

impl View {
    /// Parse a location fragment. Unknown fragments fall back to [`View::Home`].
    pub fn from_fragment(fragment: &str) -> View {
        let path = fragment.strip_prefix('#').unwrap_or(fragment);
        match path {
            "" | "/" => View::Home,
            "/create" => View::Create,
            _ => match parse_event_path(path) {
                Some((event_id, true)) => View::Responding { event_id },
                Some((event_id, false)) => View::Viewing { event_id },
                None => View::Home,
            },
        }
    }

    /// Canonical fragment for this view.
    pub fn fragment(&self) -> String {
        match self {
            View::Home => "#/".to_string(),
            View::Create => "#/create".to_string(),
            View::Viewing { event_id } => event_fragment(event_id, false),
            View::Responding { event_id } => event_fragment(event_id, true),
        }
    }

    pub fn event_id(&self) -> Option<&str> {
        match self {
            View::Viewing { event_id } | View::Responding { event_id } => Some(event_id),
            View::Home | View::Create => None,
        }
    }

    pub fn transition(self, action: ViewAction) -> View {
        match (self, action) {
            (_, ViewAction::GoHome) => View::Home,
            (_, ViewAction::StartCreate) => View::Create,
            (View::Create, ViewAction::EventCreated(event_id)) => View::Viewing { event_id },
            (_, ViewAction::OpenEvent(event_id)) => View::Viewing { event_id },
            (View::Viewing { event_id }, ViewAction::StartResponding) => {
                View::Responding { event_id }
            }
            (
                View::Responding { event_id },
                ViewAction::ResponseSaved | ViewAction::CancelResponding,
            ) => View::Viewing { event_id },
            (view, _) => view,
        }
    }
}
