use core::str::FromStr;

use serde::{Deserialize, Serialize};

use lostfound_core::ValidationError;

/// Where an item is in its lost-and-found lifecycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    Lost,
    Found,
    Claimed,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 3] = [ItemStatus::Lost, ItemStatus::Found, ItemStatus::Claimed];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Lost => "Lost",
            ItemStatus::Found => "Found",
            ItemStatus::Claimed => "Claimed",
        }
    }
}

impl core::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-sensitive, exact match on the three literals.
impl FromStr for ItemStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Lost" => Ok(ItemStatus::Lost),
            "Found" => Ok(ItemStatus::Found),
            "Claimed" => Ok(ItemStatus::Claimed),
            _ => Err(ValidationError::InvalidStatus),
        }
    }
}
