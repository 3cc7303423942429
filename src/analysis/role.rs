use crate::data::Dataset;
use crate::error::MetricsError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

pub const PLAYERS_PER_TEAM: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Top,
    Jungle,
    Mid,
    Bot,
    Support,
}

impl Role {
    pub const ALL: [Role; 5] = [Role::Top, Role::Jungle, Role::Mid, Role::Bot, Role::Support];

    /// Position of this role inside each five-record game block.
    pub fn offset(self) -> usize {
        match self {
            Role::Top => 0,
            Role::Jungle => 1,
            Role::Mid => 2,
            Role::Bot => 3,
            Role::Support => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Top => "top",
            Role::Jungle => "jungle",
            Role::Mid => "mid",
            Role::Bot => "bot",
            Role::Support => "support",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A role to compare within, or `All` to keep every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleSelection {
    All,
    Only(Role),
}

impl RoleSelection {
    pub fn label(self) -> &'static str {
        match self {
            RoleSelection::All => "none",
            RoleSelection::Only(role) => role.as_str(),
        }
    }
}

impl fmt::Display for RoleSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RoleSelection {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let selection = match s.trim().to_lowercase().as_str() {
            "top" => RoleSelection::Only(Role::Top),
            "jungle" | "jung" => RoleSelection::Only(Role::Jungle),
            "mid" | "middle" => RoleSelection::Only(Role::Mid),
            "bot" | "adc" => RoleSelection::Only(Role::Bot),
            "support" | "supp" | "sup" => RoleSelection::Only(Role::Support),
            "none" => RoleSelection::All,
            _ => return Err(MetricsError::InvalidRole(s.to_string())),
        };
        Ok(selection)
    }
}

/// Selects the records played in `selection`'s role: every fifth record
/// starting at the role's offset. Relies on each game being stored as five
/// consecutive records in role order.
pub fn filter_role(dataset: &Dataset, selection: RoleSelection) -> Dataset {
    let role = match selection {
        RoleSelection::All => return dataset.clone(),
        RoleSelection::Only(role) => role,
    };

    if dataset.len() % PLAYERS_PER_TEAM != 0 {
        warn!(
            "dataset has {} records, not a whole number of {}-player games",
            dataset.len(),
            PLAYERS_PER_TEAM
        );
    }

    dataset.subset(
        dataset
            .iter()
            .skip(role.offset())
            .step_by(PLAYERS_PER_TEAM)
            .cloned(),
    )
}
