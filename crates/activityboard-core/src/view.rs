//! Display-ready view of the activity board.
//!
//! Every view is rebuilt in full from the latest [`ActivityCatalog`]; nothing
//! here is patched incrementally:
//! - [`ListView`]: the content of the activities list container
//! - [`ActivityCard`]: one card per activity, with its participant rows
//! - [`SelectOption`]: the entries of the activity selector
//! - [`BoardView`]: everything above plus the signup form and message area

use serde::{Deserialize, Serialize};

use crate::activity::{Activity, ActivityCatalog};
use crate::message::MessageView;

/// Label of the placeholder entry at the top of the activity selector.
pub const SELECT_PLACEHOLDER: &str = "-- Select an activity --";

/// Text shown in a card whose roster is empty.
pub const NO_PARTICIPANTS: &str = "No participants yet";

/// Text shown in the list container before the first fetch completes.
pub const LOADING: &str = "Loading activities...";

/// A removal control, tagged with the pair it removes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoveControl {
    /// Value of the `data-activity` attribute.
    pub activity: String,
    /// Value of the `data-email` attribute.
    pub email: String,
}

/// One row of a card's participant list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRow {
    pub email: String,
    pub remove: RemoveControl,
}

/// A rendered activity card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityCard {
    pub name: String,
    pub description: String,
    pub schedule: String,
    /// Capacity minus enrollment at render time.
    pub spots_left: i64,
    /// Participant rows in server order; empty means the placeholder is shown.
    pub participants: Vec<ParticipantRow>,
}

impl ActivityCard {
    /// Builds the card for an activity.
    pub fn from_activity(activity: &Activity) -> Self {
        let participants = activity
            .participants()
            .iter()
            .map(|email| ParticipantRow {
                email: email.clone(),
                remove: RemoveControl {
                    activity: activity.name.clone(),
                    email: email.clone(),
                },
            })
            .collect();

        Self {
            name: activity.name.clone(),
            description: activity.details.description.clone(),
            schedule: activity.details.schedule.clone(),
            spots_left: activity.spots_left(),
            participants,
        }
    }

    /// Returns true if the card shows the "no participants" placeholder.
    pub fn shows_placeholder(&self) -> bool {
        self.participants.is_empty()
    }

    /// Iterates over the card's removal controls.
    pub fn remove_controls(&self) -> impl Iterator<Item = &RemoveControl> {
        self.participants.iter().map(|row| &row.remove)
    }
}

/// Content of the activities list container.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "cards", rename_all = "snake_case")]
pub enum ListView {
    /// No fetch has completed yet.
    #[default]
    Loading,
    /// Cards from the latest successful fetch.
    Loaded(Vec<ActivityCard>),
    /// The latest fetch failed.
    Failed,
}

impl ListView {
    /// Builds the list from a catalog.
    pub fn from_catalog(catalog: &ActivityCatalog) -> Self {
        Self::Loaded(catalog.iter().map(ActivityCard::from_activity).collect())
    }

    /// Returns the rendered cards (empty unless loaded).
    pub fn cards(&self) -> &[ActivityCard] {
        match self {
            Self::Loaded(cards) => cards,
            Self::Loading | Self::Failed => &[],
        }
    }

    /// Finds a rendered removal control for the given pair.
    pub fn find_remove_control(&self, activity: &str, email: &str) -> Option<&RemoveControl> {
        self.cards()
            .iter()
            .flat_map(ActivityCard::remove_controls)
            .find(|control| control.activity == activity && control.email == email)
    }
}

/// An entry of the activity selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    /// The placeholder entry with an empty value.
    pub fn placeholder() -> Self {
        Self {
            value: String::new(),
            label: SELECT_PLACEHOLDER.to_string(),
        }
    }

    /// An entry selecting the named activity.
    pub fn activity(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            value: name.clone(),
            label: name,
        }
    }
}

/// Builds the selector entries: the placeholder, then one per activity.
pub fn activity_options(catalog: &ActivityCatalog) -> Vec<SelectOption> {
    std::iter::once(SelectOption::placeholder())
        .chain(catalog.iter().map(|a| SelectOption::activity(&a.name)))
        .collect()
}

/// The signup form's inputs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SignupForm {
    /// Selected activity (empty when the placeholder is selected).
    pub activity: String,
    /// Entered email address.
    pub email: String,
}

impl SignupForm {
    pub fn new(activity: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            activity: activity.into(),
            email: email.into(),
        }
    }

    /// Returns the form to its initial state.
    pub fn reset(&mut self) {
        self.activity.clear();
        self.email.clear();
    }
}

/// The whole board as it should be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub list: ListView,
    pub options: Vec<SelectOption>,
    pub form: SignupForm,
    pub message: MessageView,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            list: ListView::Loading,
            options: vec![SelectOption::placeholder()],
            form: SignupForm::default(),
            message: MessageView::empty(),
        }
    }
}

impl BoardView {
    /// Replaces the list and selector with views of the given catalog.
    ///
    /// The selected activity survives only if the new selector still offers it.
    pub fn show_catalog(&mut self, catalog: &ActivityCatalog) {
        self.list = ListView::from_catalog(catalog);
        self.options = activity_options(catalog);
        if catalog.get(&self.form.activity).is_none() {
            self.form.activity.clear();
        }
    }

    /// Replaces the list with the failure state; the selector is left as is.
    pub fn show_load_failure(&mut self) {
        self.list = ListView::Failed;
    }
}
