//! Person snapshot types shared between the store and the scheduling core.
//!
//! The core only ever reads these; creation and mutation belong to the
//! persistence layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How often the user wants to be in touch with a person.
///
/// A closed enum: an unknown frequency cannot exist past deserialization,
/// which is where a broken upstream invariant fails loudly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactFrequency {
    Daily,
    Weekly,
    Fortnightly,
    Monthly,
    Quarterly,
}

impl ContactFrequency {
    /// Target contact interval in days.
    pub fn target_days(self) -> i64 {
        match self {
            ContactFrequency::Daily => 1,
            ContactFrequency::Weekly => 7,
            ContactFrequency::Fortnightly => 14,
            ContactFrequency::Monthly => 30,
            ContactFrequency::Quarterly => 90,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContactFrequency::Daily => "Daily",
            ContactFrequency::Weekly => "Weekly",
            ContactFrequency::Fortnightly => "Every 2 weeks",
            ContactFrequency::Monthly => "Monthly",
            ContactFrequency::Quarterly => "Quarterly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipType {
    Friend,
    Family,
    Partner,
    Other,
}

impl RelationshipType {
    pub fn label(self) -> &'static str {
        match self {
            RelationshipType::Friend => "Friend",
            RelationshipType::Family => "Family",
            RelationshipType::Partner => "Partner",
            RelationshipType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionType {
    Text,
    Call,
    InPerson,
    DateNight,
}

impl InteractionType {
    pub fn label(self) -> &'static str {
        match self {
            InteractionType::Text => "Text",
            InteractionType::Call => "Call",
            InteractionType::InPerson => "In Person",
            InteractionType::DateNight => "Date Night",
        }
    }
}

/// Free-form note attached to a person; open notes seed reminder bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A logged touch point. Only the most recent one matters to the health
/// model (via `last_contact_date`); the rest are history for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: String,
    pub kind: InteractionType,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Linked family member (spouse or kid) with an optional recurring birthday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub id: String,
    pub name: String,
    /// "MM/DD", year-less. Malformed values degrade to "no event".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub relationship: RelationshipType,
    pub frequency: ContactFrequency,
    /// `None` means never contacted, which the health model treats as
    /// maximally overdue.
    pub last_contact_date: Option<DateTime<Utc>>,
    /// "MM/DD", year-less, recurring annually.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anniversary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse: Option<FamilyMember>,
    #[serde(default)]
    pub kids: Vec<FamilyMember>,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub interactions: Vec<Interaction>,
    pub created_at: DateTime<Utc>,
}

impl Person {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        frequency: ContactFrequency,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            relationship: RelationshipType::Friend,
            frequency,
            last_contact_date: None,
            birthday: None,
            anniversary: None,
            spouse: None,
            kids: Vec::new(),
            notes: Vec::new(),
            interactions: Vec::new(),
            created_at,
        }
    }

    pub fn with_relationship(mut self, relationship: RelationshipType) -> Self {
        self.relationship = relationship;
        self
    }

    pub fn with_last_contact(mut self, when: DateTime<Utc>) -> Self {
        self.last_contact_date = Some(when);
        self
    }

    pub fn with_birthday(mut self, month_day: impl Into<String>) -> Self {
        self.birthday = Some(month_day.into());
        self
    }

    pub fn with_anniversary(mut self, month_day: impl Into<String>) -> Self {
        self.anniversary = Some(month_day.into());
        self
    }

    pub fn with_spouse(mut self, spouse: FamilyMember) -> Self {
        self.spouse = Some(spouse);
        self
    }

    pub fn with_kid(mut self, kid: FamilyMember) -> Self {
        self.kids.push(kid);
        self
    }
}
