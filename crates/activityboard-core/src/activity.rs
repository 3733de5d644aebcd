//! Activity types.
//!
//! This module provides the data model served by the activities API:
//! - [`Activity`]: a named enrollable event with a capacity and roster
//! - [`ActivityDetails`]: the per-activity body of the API, without its name
//! - [`ActivityCatalog`]: the ordered set of activities from one fetch

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::ser::SerializeMap;

/// The body the API returns for one activity.
///
/// The activity name is not part of the body; it is the key under which the
/// body appears in the `GET /activities` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDetails {
    /// Free-text description.
    pub description: String,
    /// Human-readable schedule, e.g. "Fridays, 3:30 PM - 5:00 PM".
    pub schedule: String,
    /// Capacity of the activity.
    pub max_participants: u32,
    /// Enrolled participant emails, in server order.
    #[serde(default)]
    pub participants: Vec<String>,
}

/// A named activity with its details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique name of the activity.
    pub name: String,
    /// Description, schedule, capacity and roster.
    #[serde(flatten)]
    pub details: ActivityDetails,
}

impl Activity {
    /// Creates an activity with no participants.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        schedule: impl Into<String>,
        max_participants: u32,
    ) -> Self {
        Self {
            name: name.into(),
            details: ActivityDetails {
                description: description.into(),
                schedule: schedule.into(),
                max_participants,
                participants: Vec::new(),
            },
        }
    }

    /// Builder method to append a participant.
    pub fn with_participant(mut self, email: impl Into<String>) -> Self {
        self.details.participants.push(email.into());
        self
    }

    /// Creates an activity from its name and API body.
    pub fn from_details(name: impl Into<String>, details: ActivityDetails) -> Self {
        Self {
            name: name.into(),
            details,
        }
    }

    /// Returns the participant emails in server order.
    pub fn participants(&self) -> &[String] {
        &self.details.participants
    }

    /// Returns the number of enrolled participants.
    pub fn participant_count(&self) -> usize {
        self.details.participants.len()
    }

    /// Returns capacity minus enrollment.
    ///
    /// Negative when the server reports more participants than the capacity.
    pub fn spots_left(&self) -> i64 {
        i64::from(self.details.max_participants) - self.participant_count() as i64
    }
}

/// The ordered collection of activities returned by one `GET /activities`.
///
/// Deserializes from the JSON object keyed by activity name and keeps the
/// key order of the document. A key repeated within one document keeps its
/// first position and takes the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityCatalog {
    activities: Vec<Activity>,
}

impl ActivityCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an activity, replacing an existing one with the same name in place.
    pub fn insert(&mut self, activity: Activity) {
        match self.activities.iter_mut().find(|a| a.name == activity.name) {
            Some(existing) => *existing = activity,
            None => self.activities.push(activity),
        }
    }

    /// Returns the activity with the given name.
    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.name == name)
    }

    /// Returns the activities in response order.
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Iterates over the activities in response order.
    pub fn iter(&self) -> std::slice::Iter<'_, Activity> {
        self.activities.iter()
    }

    /// Returns the number of activities.
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    /// Returns true if the catalog has no activities.
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}

impl FromIterator<Activity> for ActivityCatalog {
    fn from_iter<I: IntoIterator<Item = Activity>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for activity in iter {
            catalog.insert(activity);
        }
        catalog
    }
}

impl<'a> IntoIterator for &'a ActivityCatalog {
    type Item = &'a Activity;
    type IntoIter = std::slice::Iter<'a, Activity>;

    fn into_iter(self) -> Self::IntoIter {
        self.activities.iter()
    }
}

impl Serialize for ActivityCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.activities.len()))?;
        for activity in &self.activities {
            map.serialize_entry(&activity.name, &activity.details)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ActivityCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = ActivityCatalog;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of activity name to activity details")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut catalog = ActivityCatalog::new();
                while let Some((name, details)) = map.next_entry::<String, ActivityDetails>()? {
                    catalog.insert(Activity::from_details(name, details));
                }
                Ok(catalog)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}
