// This file is part of arm_force_field.
//
// See the COPYRIGHT file at the top-level directory of this distribution
// for details of code ownership.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{GRAVITY_ACCELERATION, NUM_SEGMENT};
use crate::error::ModelError;
use crate::strength::math_tool::normalize;

/// Inertial parameters of a segment of the arm.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct SegmentParameters {
    // Center of gravity (CoG) as the ratio of the segment length from the
    // proximal joint.
    pub cog_ratio: f64,
    // Segment mass as the ratio of the body mass.
    pub mass_ratio: f64,
}

/// Joint positions of an arm relative to its own shoulder in the shoulder
/// axis system (SAS) of the arm.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct ArmPosition {
    pub hand: Vector3<f64>,
    pub wrist: Vector3<f64>,
    pub elbow: Vector3<f64>,
}

impl ArmPosition {
    /// Get the joints from the proximal to the distal: shoulder (origin),
    /// elbow, wrist, and hand.
    fn joints(&self) -> [Vector3<f64>; NUM_SEGMENT + 1] {
        [Vector3::zeros(), self.elbow, self.wrist, self.hand]
    }
}

/// Shoulder moment caused by the weight of the arm and the resulting gravity
/// force effect (GFE) at the hand.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct GravityMoment {
    // CoG of the upper arm, forearm, and hand in m.
    pub cog: [Vector3<f64>; NUM_SEGMENT],
    // Shoulder moment caused by each segment in N*m.
    pub moments: [Vector3<f64>; NUM_SEGMENT],
    // Total shoulder moment in N*m.
    pub total_moment: Vector3<f64>,
    // Distance from the shoulder to the hand in m.
    pub reach: f64,
    // Unit direction that a hand force would need to be assisted by the
    // gravity moment.
    pub assist_direction: Vector3<f64>,
    // Gravity force effect at the hand in N.
    pub gravity_force_effect: Vector3<f64>,
}

impl GravityMoment {
    /// Calculate the shoulder moment caused by the gravity.
    ///
    /// # Notes
    /// The CoG of each segment is on the line between its proximal and
    /// distal joints:
    ///
    /// cog = proximal + (distal - proximal) * cog_ratio
    ///
    /// The moment of each segment is (cog x gravity) * weight, where the
    /// weight = body_mass * mass_ratio * g. The GFE has the direction of
    /// (unit(total_moment) x unit(hand)) and the magnitude of
    /// |total_moment| / reach.
    ///
    /// # Arguments
    /// * `arm` - Joint positions of the arm in the SAS of the arm.
    /// * `gravity` - Unit gravity vector in the SAS.
    /// * `body_mass` - Body mass in kg.
    /// * `segments` - Parameters of the upper arm, forearm, and hand.
    ///
    /// # Returns
    /// Gravity moment.
    ///
    /// # Errors
    /// If the total moment or the reach is zero, or they are parallel. Then
    /// the direction of the GFE is undefined.
    pub fn new(
        arm: &ArmPosition,
        gravity: &Vector3<f64>,
        body_mass: f64,
        segments: &[SegmentParameters; NUM_SEGMENT],
    ) -> Result<Self, ModelError> {
        let joints = arm.joints();

        let cog: [Vector3<f64>; NUM_SEGMENT] = std::array::from_fn(|idx| {
            joints[idx] + (joints[idx + 1] - joints[idx]) * segments[idx].cog_ratio
        });
        let moments: [Vector3<f64>; NUM_SEGMENT] = std::array::from_fn(|idx| {
            cog[idx].cross(gravity) * Self::weight(body_mass, &segments[idx])
        });
        let total_moment: Vector3<f64> = moments.iter().sum();

        let reach = arm.hand.norm();
        let assist = normalize(&total_moment, "total moment")?
            .cross(&normalize(&arm.hand, "reach")?);
        let assist_direction = normalize(&assist, "gravity assist direction")?;

        Ok(Self {
            cog: cog,
            moments: moments,
            total_moment: total_moment,
            reach: reach,
            assist_direction: assist_direction,
            gravity_force_effect: assist_direction * (total_moment.norm() / reach),
        })
    }

    /// Weight of the segment.
    ///
    /// # Arguments
    /// * `body_mass` - Body mass in kg.
    /// * `segment` - Segment parameters.
    ///
    /// # Returns
    /// Weight in Newton.
    pub fn weight(body_mass: f64, segment: &SegmentParameters) -> f64 {
        body_mass * segment.mass_ratio * GRAVITY_ACCELERATION
    }

    /// Magnitude of the gravity force effect (GFE) in Newton.
    pub fn gravity_force_effect_resultant(&self) -> f64 {
        self.gravity_force_effect.norm()
    }

    /// Component of the gravity force effect (GFE) along the force direction.
    ///
    /// # Arguments
    /// * `force_direction` - Unit force direction in the SAS of the arm.
    ///
    /// # Returns
    /// Gravity assist in Newton. It is positive when the gravity helps the
    /// hand to exert the force.
    pub fn gravity_assist(&self, force_direction: &Vector3<f64>) -> f64 {
        self.gravity_force_effect.dot(force_direction)
    }
}
