//! Reference manipulators.

use linkdyn_math::{Pose, Vec3};
use linkdyn_model::{ChainBuilder, DhParameters, JointType, SerialChain};
use std::f64::consts::FRAC_PI_2;

/// Two-link planar arm.
///
/// Both links are revolute with length 2, unit mass, COM one unit past the
/// link frame and principal inertia (0, 1/6, 1/6). The tool frame is rotated
/// 90° about y.
pub fn rr_planar() -> SerialChain {
    let link = DhParameters::new(
        0.0,
        0.0,
        2.0,
        0.0,
        JointType::Revolute,
        1.0,
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0 / 6.0, 1.0 / 6.0),
    );
    ChainBuilder::new()
        .link(link)
        .link(link)
        .tool(Pose::rot_y(FRAC_PI_2))
        .build()
}

/// Unimation PUMA 560 with its classical DH and inertial parameters (SI units).
pub fn puma560() -> SerialChain {
    #[rustfmt::skip]
    let table: [(f64, f64, f64, f64, [f64; 3], [f64; 3]); 6] = [
        // d,     a,      alpha, mass,  center of mass,          principal inertia
        (0.0,    0.0,     90.0,  0.0,   [0.0, 0.0, 0.0],         [0.0, 0.0, 0.35]),
        (0.0,    0.4318,  0.0,   17.40, [0.068, 0.006, -0.016],  [0.130, 0.524, 0.539]),
        (0.15,   0.0203, -90.0,  4.80,  [0.0, -0.070, 0.014],    [0.066, 0.0125, 0.086]),
        (0.4331, 0.0,     90.0,  0.82,  [0.0, 0.0, -0.019],      [0.0018, 0.0018, 0.0013]),
        (0.0,    0.0,    -90.0,  0.34,  [0.0, 0.0, 0.0],         [0.0003, 0.0003, 0.0004]),
        (0.0,    0.0,     0.0,   0.09,  [0.0, 0.0, 0.032],       [0.00015, 0.00015, 0.00004]),
    ];
    ChainBuilder::new()
        .links(table.iter().map(|&(d, a, alpha, mass, com, inertia)| {
            DhParameters::from_degrees(
                0.0,
                d,
                a,
                alpha,
                JointType::Revolute,
                mass,
                Vec3::from(com),
                Vec3::from(inertia),
            )
        }))
        .tool(Pose::rot_y(FRAC_PI_2))
        .build()
}
