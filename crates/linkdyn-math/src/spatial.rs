//! 6D spatial algebra for serial-chain dynamics.
//!
//! Convention: spatial vectors are [angular; linear].
//! A spatial motion vector (twist): [ω; v]
//! A spatial force vector (wrench): [τ; f]

use crate::{Mat3, Mat6, Vec3, Vec6, skew};
use nalgebra as na;

/// 6D spatial vector: either a motion vector (twist) or force vector (wrench).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialVec {
    /// The underlying 6D vector [angular(3); linear(3)].
    pub data: Vec6,
}

impl SpatialVec {
    /// Create from angular and linear parts.
    #[inline]
    pub fn new(angular: Vec3, linear: Vec3) -> Self {
        Self {
            data: Vec6::new(
                angular.x, angular.y, angular.z, linear.x, linear.y, linear.z,
            ),
        }
    }

    /// Wrap a raw 6-vector.
    #[inline]
    pub fn from_vec6(data: Vec6) -> Self {
        Self { data }
    }

    /// Zero spatial vector.
    #[inline]
    pub fn zero() -> Self {
        Self {
            data: Vec6::zeros(),
        }
    }

    /// Angular (top 3) component.
    #[inline]
    pub fn angular(&self) -> Vec3 {
        Vec3::new(self.data[0], self.data[1], self.data[2])
    }

    /// Linear (bottom 3) component.
    #[inline]
    pub fn linear(&self) -> Vec3 {
        Vec3::new(self.data[3], self.data[4], self.data[5])
    }

    /// Lie bracket of two motion vectors: [ad_self] other.
    pub fn cross_motion(&self, other: &SpatialVec) -> SpatialVec {
        let w = self.angular();
        let v = self.linear();
        let w2 = other.angular();
        let v2 = other.linear();
        SpatialVec::new(w.cross(&w2), w.cross(&v2) + v.cross(&w2))
    }

    /// Dual cross product acting on a force vector: -[ad_self]ᵀ f.
    pub fn cross_force(&self, other: &SpatialVec) -> SpatialVec {
        let w = self.angular();
        let v = self.linear();
        let t = other.angular();
        let f = other.linear();
        SpatialVec::new(w.cross(&t) + v.cross(&f), w.cross(&f))
    }

    /// Dot product of two spatial vectors.
    #[inline]
    pub fn dot(&self, other: &SpatialVec) -> f64 {
        self.data.dot(&other.data)
    }
}

impl std::ops::Add for SpatialVec {
    type Output = SpatialVec;
    #[inline]
    fn add(self, rhs: SpatialVec) -> SpatialVec {
        SpatialVec {
            data: self.data + rhs.data,
        }
    }
}

impl std::ops::Sub for SpatialVec {
    type Output = SpatialVec;
    #[inline]
    fn sub(self, rhs: SpatialVec) -> SpatialVec {
        SpatialVec {
            data: self.data - rhs.data,
        }
    }
}

impl std::ops::Mul<f64> for SpatialVec {
    type Output = SpatialVec;
    #[inline]
    fn mul(self, rhs: f64) -> SpatialVec {
        SpatialVec {
            data: self.data * rhs,
        }
    }
}

impl std::ops::Neg for SpatialVec {
    type Output = SpatialVec;
    #[inline]
    fn neg(self) -> SpatialVec {
        SpatialVec { data: -self.data }
    }
}

/// Lie-bracket matrix of a twist.
///
/// ad(ξ) = | [ω]×   0   |
///         | [v]×  [ω]× |
///
/// so that `ad(a) * b` equals `a.cross_motion(b)`.
pub fn ad(twist: &SpatialVec) -> Mat6 {
    let wx = skew(&twist.angular());
    let vx = skew(&twist.linear());
    let mut m = Mat6::zeros();
    m.fixed_view_mut::<3, 3>(0, 0).copy_from(&wx);
    m.fixed_view_mut::<3, 3>(3, 0).copy_from(&vx);
    m.fixed_view_mut::<3, 3>(3, 3).copy_from(&wx);
    m
}

/// Unit twist of a screw with rotation axis `axis` passing through `point`.
///
/// Returns [ω; q × ω], the velocity of the frame origin for unit rotation rate.
pub fn unit_twist(axis: &Vec3, point: &Vec3) -> SpatialVec {
    SpatialVec::new(*axis, point.cross(axis))
}

/// Rigid-body pose aTb: the frame b expressed in frame a.
///
/// `rot` maps b-coordinates into a-coordinates and `pos` is the origin of b
/// in a. Poses act on twists and wrenches through their Adjoint map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Orientation of frame b in frame a.
    pub rot: Mat3,
    /// Origin of frame b expressed in frame a.
    pub pos: Vec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Pose {
    /// Create from rotation matrix and translation.
    pub fn new(rot: Mat3, pos: Vec3) -> Self {
        Self { rot, pos }
    }

    /// Identity pose.
    pub fn identity() -> Self {
        Self {
            rot: Mat3::identity(),
            pos: Vec3::zeros(),
        }
    }

    /// Pure rotation about the X axis.
    pub fn rot_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            rot: Mat3::new(1.0, 0.0, 0.0, 0.0, c, -s, 0.0, s, c),
            pos: Vec3::zeros(),
        }
    }

    /// Pure rotation about the Y axis.
    pub fn rot_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            rot: Mat3::new(c, 0.0, s, 0.0, 1.0, 0.0, -s, 0.0, c),
            pos: Vec3::zeros(),
        }
    }

    /// Pure rotation about the Z axis.
    pub fn rot_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            rot: Mat3::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0),
            pos: Vec3::zeros(),
        }
    }

    /// Pure translation.
    pub fn translation(pos: Vec3) -> Self {
        Self {
            rot: Mat3::identity(),
            pos,
        }
    }

    /// Rotation from roll/pitch/yaw (applied as Rz(yaw)·Ry(pitch)·Rx(roll)) plus translation.
    pub fn from_rpy(roll: f64, pitch: f64, yaw: f64, pos: Vec3) -> Self {
        let rot = na::Rotation3::from_euler_angles(roll, pitch, yaw);
        Self {
            rot: *rot.matrix(),
            pos,
        }
    }

    /// Compose two poses: aTb ∘ bTc = aTc.
    pub fn compose(&self, other: &Pose) -> Pose {
        Pose {
            rot: self.rot * other.rot,
            pos: self.rot * other.pos + self.pos,
        }
    }

    /// Inverse pose: aTb → bTa.
    pub fn inverse(&self) -> Pose {
        let rt = self.rot.transpose();
        Pose {
            rot: rt,
            pos: -(rt * self.pos),
        }
    }

    /// Pose of `other` relative to `self`: self⁻¹ ∘ other.
    ///
    /// With both poses given in a common frame w (wTa, wTb) this is aTb.
    pub fn between(&self, other: &Pose) -> Pose {
        self.inverse().compose(other)
    }

    /// Map a point from frame b into frame a.
    pub fn transform_point(&self, p: &Vec3) -> Vec3 {
        self.rot * p + self.pos
    }

    /// Get the rotation matrix.
    pub fn rotation(&self) -> Mat3 {
        self.rot
    }

    /// Get the translation vector.
    pub fn translation_vector(&self) -> Vec3 {
        self.pos
    }

    /// Rotation-only part of this pose.
    pub fn rotation_only(&self) -> Pose {
        Pose::new(self.rot, Vec3::zeros())
    }

    /// 6x6 Adjoint map taking twists expressed in b into a.
    ///
    /// Ad = |   R     0 |
    ///      | [p]×R   R |
    pub fn adjoint_matrix(&self) -> Mat6 {
        let r = self.rot;
        let px_r = skew(&self.pos) * r;

        let mut m = Mat6::zeros();
        m.fixed_view_mut::<3, 3>(0, 0).copy_from(&r);
        m.fixed_view_mut::<3, 3>(3, 0).copy_from(&px_r);
        m.fixed_view_mut::<3, 3>(3, 3).copy_from(&r);
        m
    }

    /// Express a twist given in frame b in frame a: Ad · ξ.
    pub fn apply_twist(&self, twist: &SpatialVec) -> SpatialVec {
        let w = self.rot * twist.angular();
        let v = self.rot * twist.linear() + self.pos.cross(&w);
        SpatialVec::new(w, v)
    }

    /// Pull a wrench given in frame a back into frame b: Adᵀ · F.
    pub fn apply_wrench_transpose(&self, wrench: &SpatialVec) -> SpatialVec {
        let rt = self.rot.transpose();
        let tau = wrench.angular();
        let force = wrench.linear();
        SpatialVec::new(rt * (tau - self.pos.cross(&force)), rt * force)
    }
}

/// Spatial inertia of a rigid body about its center of mass, in principal axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialInertia {
    /// Mass of the body.
    pub mass: f64,
    /// Principal moments of inertia about the center of mass.
    pub principal: Vec3,
}

impl SpatialInertia {
    /// Create a spatial inertia from mass and principal moments.
    pub fn new(mass: f64, principal: Vec3) -> Self {
        Self { mass, principal }
    }

    /// Convert to the 6x6 block-diagonal spatial inertia matrix.
    ///
    /// G = | diag(I)   0  |
    ///     |   0      mE  |
    pub fn to_matrix(&self) -> Mat6 {
        let mut mat = Mat6::zeros();
        mat.fixed_view_mut::<3, 3>(0, 0)
            .copy_from(&Mat3::from_diagonal(&self.principal));
        mat.fixed_view_mut::<3, 3>(3, 3)
            .copy_from(&(Mat3::identity() * self.mass));
        mat
    }

    /// Apply the inertia to a twist, producing a momentum wrench.
    pub fn momentum(&self, twist: &SpatialVec) -> SpatialVec {
        SpatialVec::new(
            self.principal.component_mul(&twist.angular()),
            twist.linear() * self.mass,
        )
    }
}
