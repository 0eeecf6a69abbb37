//! # Requirement Types: Closed Set
//!
//! The top-level keys accepted in `requirements.json`. Each key names a kind
//! of platform object an app expects to exist at install time. Every `match`
//! on [`RequirementType`] is exhaustive, so adding a type forces every
//! consumer to handle it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ZappError;

/// Ceiling on the number of requirement entries a single app may declare,
/// counted across all types.
pub const MAX_REQUIREMENTS: usize = 5000;

/// Kinds of platform objects an app can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementType {
    /// Time-based business rules.
    Automations,
    /// External messaging channels. At most one per app.
    ChannelIntegrations,
    /// Agent macros.
    Macros,
    /// Custom ticket fields.
    TicketFields,
    /// Event-based business rules.
    Triggers,
    /// Outbound notification targets.
    Targets,
    /// Custom user fields. Entries must carry a `key`.
    UserFields,
    /// Custom organization fields.
    OrganizationFields,
    /// Ticket views.
    Views,
}

impl RequirementType {
    /// Every requirement type in canonical order.
    pub fn all() -> &'static [RequirementType] {
        &[
            Self::Automations,
            Self::ChannelIntegrations,
            Self::Macros,
            Self::TicketFields,
            Self::Triggers,
            Self::Targets,
            Self::UserFields,
            Self::OrganizationFields,
            Self::Views,
        ]
    }

    /// The key used for this type in `requirements.json`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Automations => "automations",
            Self::ChannelIntegrations => "channel_integrations",
            Self::Macros => "macros",
            Self::TicketFields => "ticket_fields",
            Self::Triggers => "triggers",
            Self::Targets => "targets",
            Self::UserFields => "user_fields",
            Self::OrganizationFields => "organization_fields",
            Self::Views => "views",
        }
    }

    /// Whether entries of this type must declare a `title`.
    ///
    /// Channel integrations are identified by their manifest URL instead.
    pub fn requires_title(&self) -> bool {
        !matches!(self, Self::ChannelIntegrations)
    }
}

impl std::fmt::Display for RequirementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequirementType {
    type Err = ZappError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| ZappError::UnknownRequirementType(s.to_string()))
    }
}
