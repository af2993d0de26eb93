//! The lead record assembled over a conversation

use serde::{Deserialize, Serialize};

/// One slot of a [`Lead`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadField {
    Name,
    BusinessName,
    Service,
    Budget,
    Timeline,
    Phone,
    Email,
    Details,
}

impl LeadField {
    /// Order in which missing slots are requested.
    pub const PRIORITY: [LeadField; 8] = [
        LeadField::Name,
        LeadField::Email,
        LeadField::Phone,
        LeadField::BusinessName,
        LeadField::Service,
        LeadField::Details,
        LeadField::Budget,
        LeadField::Timeline,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadField::Name => "name",
            LeadField::BusinessName => "business_name",
            LeadField::Service => "service",
            LeadField::Budget => "budget",
            LeadField::Timeline => "timeline",
            LeadField::Phone => "phone",
            LeadField::Email => "email",
            LeadField::Details => "details",
        }
    }

    /// Human label, used for input placeholders
    pub fn label(&self) -> &'static str {
        match self {
            LeadField::Name => "name",
            LeadField::BusinessName => "business name",
            LeadField::Service => "service",
            LeadField::Budget => "budget",
            LeadField::Timeline => "timeline",
            LeadField::Phone => "phone number",
            LeadField::Email => "email address",
            LeadField::Details => "project details",
        }
    }
}

impl std::fmt::Display for LeadField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A prospective customer's contact and project details.
///
/// Serialized with the camelCase keys the contact-form backend expects
/// (`businessName`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub timeline: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub details: String,
}

impl Lead {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: LeadField) -> &str {
        match field {
            LeadField::Name => &self.name,
            LeadField::BusinessName => &self.business_name,
            LeadField::Service => &self.service,
            LeadField::Budget => &self.budget,
            LeadField::Timeline => &self.timeline,
            LeadField::Phone => &self.phone,
            LeadField::Email => &self.email,
            LeadField::Details => &self.details,
        }
    }

    pub fn set(&mut self, field: LeadField, value: impl Into<String>) {
        let slot = match field {
            LeadField::Name => &mut self.name,
            LeadField::BusinessName => &mut self.business_name,
            LeadField::Service => &mut self.service,
            LeadField::Budget => &mut self.budget,
            LeadField::Timeline => &mut self.timeline,
            LeadField::Phone => &mut self.phone,
            LeadField::Email => &mut self.email,
            LeadField::Details => &mut self.details,
        };
        *slot = value.into();
    }

    pub fn is_filled(&self, field: LeadField) -> bool {
        !self.get(field).is_empty()
    }

    /// First empty slot in [`LeadField::PRIORITY`] order.
    pub fn next_missing(&self) -> Option<LeadField> {
        LeadField::PRIORITY
            .into_iter()
            .find(|field| !self.is_filled(*field))
    }

    pub fn is_complete(&self) -> bool {
        self.next_missing().is_none()
    }

    pub fn is_empty(&self) -> bool {
        LeadField::PRIORITY.iter().all(|field| !self.is_filled(*field))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
