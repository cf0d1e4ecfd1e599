//! Department classification for employees.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Department an employee belongs to.
///
/// Production carries an optional sub-department and a master/operator
/// category; every other department is flat.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Administration,
    Supervisor,
    Packing,
    Production {
        sub_department: Option<String>,
        category: Option<ProductionCategory>,
    },
    Others,
}

/// Staff category within the production department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductionCategory {
    Master,
    Operator,
}

impl Department {
    /// Plain production department with no sub-department detail.
    pub fn production() -> Self {
        Self::Production {
            sub_department: None,
            category: None,
        }
    }

    /// Stable storage key for the department.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Administration => "administration",
            Self::Supervisor => "supervisor",
            Self::Packing => "packing",
            Self::Production { .. } => "production",
            Self::Others => "others",
        }
    }

    /// Parse a storage key back into a (flat) department.
    pub fn parse_key(key: &str) -> Option<Self> {
        match key {
            "administration" => Some(Self::Administration),
            "supervisor" => Some(Self::Supervisor),
            "packing" => Some(Self::Packing),
            "production" => Some(Self::production()),
            "others" => Some(Self::Others),
            _ => None,
        }
    }

    /// All flat storage keys, in display order.
    pub fn all_keys() -> [&'static str; 5] {
        ["administration", "supervisor", "packing", "production", "others"]
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production {
                sub_department: Some(sub),
                ..
            } => write!(f, "production ({sub})"),
            other => f.write_str(other.key()),
        }
    }
}

impl ProductionCategory {
    /// Stable storage key for the category.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Master => "master",
            Self::Operator => "operator",
        }
    }

    /// Parse a storage key back into a category.
    pub fn parse_key(key: &str) -> Option<Self> {
        match key {
            "master" => Some(Self::Master),
            "operator" => Some(Self::Operator),
            _ => None,
        }
    }
}
