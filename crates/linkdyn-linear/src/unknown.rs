//! Typed identifiers for the unknowns of a dynamics system.

use std::fmt;

/// One unknown block of a linear system, indexed by joint/link number.
///
/// Index 0 of `TwistAccel` is the base; `Wrench(N+1)` is the tool load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Unknown {
    /// Velocity twist of link j (6D).
    Twist(usize),
    /// Twist acceleration of link j (6D).
    TwistAccel(usize),
    /// Wrench transmitted into link j through joint j (6D).
    Wrench(usize),
    /// Acceleration of joint j (scalar).
    JointAccel(usize),
    /// Torque or force at joint j (scalar).
    JointTorque(usize),
}

impl Unknown {
    /// Base twist acceleration.
    pub const BASE_ACCEL: Unknown = Unknown::TwistAccel(0);

    /// Number of scalar components.
    pub fn dim(&self) -> usize {
        match self {
            Unknown::Twist(_) | Unknown::TwistAccel(_) | Unknown::Wrench(_) => 6,
            Unknown::JointAccel(_) | Unknown::JointTorque(_) => 1,
        }
    }
}

impl fmt::Display for Unknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unknown::Twist(j) => write!(f, "V{j}"),
            Unknown::TwistAccel(j) => write!(f, "T{j}"),
            Unknown::Wrench(j) => write!(f, "F{j}"),
            Unknown::JointAccel(j) => write!(f, "a{j}"),
            Unknown::JointTorque(j) => write!(f, "t{j}"),
        }
    }
}
