//! Joint types and definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Joint type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JointType {
    /// Single rotational DOF about the joint z-axis.
    Revolute,
    /// Single translational DOF along the joint z-axis.
    Prismatic,
}

impl JointType {
    /// Short DH-table code: `R` or `P`.
    pub fn code(&self) -> char {
        match self {
            JointType::Revolute => 'R',
            JointType::Prismatic => 'P',
        }
    }
}

impl fmt::Display for JointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JointType::Revolute => f.write_str("revolute"),
            JointType::Prismatic => f.write_str("prismatic"),
        }
    }
}

impl FromStr for JointType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "r" | "revolute" | "hinge" => Ok(JointType::Revolute),
            "p" | "prismatic" | "slide" => Ok(JointType::Prismatic),
            _ => Err(ModelError::UnsupportedJointType(s.to_string())),
        }
    }
}
