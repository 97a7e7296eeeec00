//! A single link of a serial chain, derived from its DH parameters.

use linkdyn_math::{Mat6, Pose, SpatialInertia, SpatialVec, Vec3, unit_twist};

use crate::{DhParameters, JointType};

/// Static geometric and inertial description of one link.
///
/// The link frame follows the DH convention: it sits at the *next* joint, so
/// this link's own joint lies at (-a, 0, 0) in the link frame. The center of
/// mass frame shares the link frame's orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkModel {
    params: DhParameters,
    screw_axis: SpatialVec,
    inertia: SpatialInertia,
}

impl LinkModel {
    /// Build a link and derive its screw axis and spatial inertia.
    pub fn new(params: DhParameters) -> Self {
        let (s, c) = params.alpha.sin_cos();
        // Joint z-axis seen from the link frame: Rx(-α)·ẑ.
        let axis = Vec3::new(0.0, s, c);
        let screw_axis = match params.joint_type {
            JointType::Revolute => {
                let joint = Vec3::new(-params.a, 0.0, 0.0);
                unit_twist(&axis, &(joint - params.center_of_mass))
            }
            JointType::Prismatic => SpatialVec::new(Vec3::zeros(), axis),
        };
        let inertia = SpatialInertia::new(params.mass, params.principal_inertia);
        Self {
            params,
            screw_axis,
            inertia,
        }
    }

    /// Link transform from the previous link frame to this one for joint value `q`.
    ///
    /// Rz(θ)·Tz(d)·Rx(α)·Tx(a), where `q` replaces θ for revolute joints and d
    /// for prismatic joints.
    pub fn transform(&self, q: f64) -> Pose {
        let p = &self.params;
        let (theta, d) = match p.joint_type {
            JointType::Revolute => (q, p.d),
            JointType::Prismatic => (p.theta, q),
        };
        let joint = Pose::new(Pose::rot_z(theta).rot, Vec3::new(0.0, 0.0, d));
        let link = Pose::new(Pose::rot_x(p.alpha).rot, Vec3::new(p.a, 0.0, 0.0));
        joint.compose(&link)
    }

    /// Screw axis of this link's joint, expressed in its center-of-mass frame.
    pub fn screw_axis(&self) -> SpatialVec {
        self.screw_axis
    }

    /// 6x6 spatial inertia about the center of mass.
    pub fn spatial_inertia(&self) -> Mat6 {
        self.inertia.to_matrix()
    }

    /// Spatial inertia in mass/principal-moment form.
    pub fn inertia(&self) -> &SpatialInertia {
        &self.inertia
    }

    /// Fixed pose of the center-of-mass frame in the link frame.
    pub fn com_pose(&self) -> Pose {
        Pose::translation(self.params.center_of_mass)
    }

    pub fn params(&self) -> &DhParameters {
        &self.params
    }

    pub fn joint_type(&self) -> JointType {
        self.params.joint_type
    }

    pub fn mass(&self) -> f64 {
        self.params.mass
    }

    pub fn center_of_mass(&self) -> Vec3 {
        self.params.center_of_mass
    }
}

impl From<DhParameters> for LinkModel {
    fn from(params: DhParameters) -> Self {
        Self::new(params)
    }
}
