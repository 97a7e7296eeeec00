//! Denavit-Hartenberg parameters and serializable parameter tables.

use linkdyn_math::{Pose, Vec3};
use serde::{Deserialize, Serialize};

use crate::{JointType, Result};

/// Geometric and inertial parameters of one link, angles in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DhParameters {
    /// Joint angle offset θ (unused for revolute joints).
    pub theta: f64,
    /// Link offset d along z (unused for prismatic joints).
    pub d: f64,
    /// Link length a along x.
    pub a: f64,
    /// Link twist α about x.
    pub alpha: f64,
    /// Joint type.
    pub joint_type: JointType,
    /// Link mass.
    pub mass: f64,
    /// Center of mass in the link frame.
    pub center_of_mass: Vec3,
    /// Principal moments of inertia about the center of mass.
    pub principal_inertia: Vec3,
}

impl DhParameters {
    /// Create parameters with angles given in radians.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        theta: f64,
        d: f64,
        a: f64,
        alpha: f64,
        joint_type: JointType,
        mass: f64,
        center_of_mass: Vec3,
        principal_inertia: Vec3,
    ) -> Self {
        Self {
            theta,
            d,
            a,
            alpha,
            joint_type,
            mass,
            center_of_mass,
            principal_inertia,
        }
    }

    /// Create parameters with θ and α given in degrees.
    #[allow(clippy::too_many_arguments)]
    pub fn from_degrees(
        theta_deg: f64,
        d: f64,
        a: f64,
        alpha_deg: f64,
        joint_type: JointType,
        mass: f64,
        center_of_mass: Vec3,
        principal_inertia: Vec3,
    ) -> Self {
        Self::new(
            theta_deg.to_radians(),
            d,
            a,
            alpha_deg.to_radians(),
            joint_type,
            mass,
            center_of_mass,
            principal_inertia,
        )
    }
}

/// Unit of the angle columns in a [`DhTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Radians,
    Degrees,
}

impl AngleUnit {
    fn to_radians(self, angle: f64) -> f64 {
        match self {
            AngleUnit::Radians => angle,
            AngleUnit::Degrees => angle.to_radians(),
        }
    }
}

/// One row of a DH table as it appears in a parameter file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DhRow {
    #[serde(default)]
    pub theta: f64,
    #[serde(default)]
    pub d: f64,
    #[serde(default)]
    pub a: f64,
    #[serde(default)]
    pub alpha: f64,
    /// `R`/`P` or `revolute`/`prismatic`.
    pub joint_type: String,
    pub mass: f64,
    #[serde(default)]
    pub center_of_mass: [f64; 3],
    pub principal_inertia: [f64; 3],
}

impl DhRow {
    /// Convert to [`DhParameters`], rejecting unknown joint types.
    pub fn to_parameters(&self, unit: AngleUnit) -> Result<DhParameters> {
        let joint_type = self.joint_type.parse::<JointType>()?;
        Ok(DhParameters::new(
            unit.to_radians(self.theta),
            self.d,
            self.a,
            unit.to_radians(self.alpha),
            joint_type,
            self.mass,
            Vec3::from(self.center_of_mass),
            Vec3::from(self.principal_inertia),
        ))
    }
}

/// A fixed frame offset: roll/pitch/yaw in degrees plus a translation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseConfig {
    #[serde(default)]
    pub rpy_deg: [f64; 3],
    #[serde(default)]
    pub translation: [f64; 3],
}

impl PoseConfig {
    pub fn to_pose(&self) -> Pose {
        let [roll, pitch, yaw] = self.rpy_deg.map(f64::to_radians);
        Pose::from_rpy(roll, pitch, yaw, Vec3::from(self.translation))
    }
}

/// A complete manipulator parameter table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DhTable {
    #[serde(default)]
    pub angle_unit: AngleUnit,
    pub links: Vec<DhRow>,
    /// World frame to joint-1 frame.
    #[serde(default)]
    pub base: Option<PoseConfig>,
    /// Link-N frame to end-effector frame.
    #[serde(default)]
    pub tool: Option<PoseConfig>,
}

impl DhTable {
    /// Convert every row, failing on the first unsupported joint type.
    pub fn parameters(&self) -> Result<Vec<DhParameters>> {
        self.links
            .iter()
            .map(|row| row.to_parameters(self.angle_unit))
            .collect()
    }
}
