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

use log::debug;
use nalgebra::Vector3;
use serde::Serialize;

use crate::config::Config;
use crate::enums::{Landmark, Side};
use crate::error::ModelError;
use crate::posture::{Bilateral, Posture};
use crate::strength::bound_table::{BoundCode, StrengthBound};
use crate::strength::feature::{extract_features, Features};
use crate::strength::frame::ShoulderAxisSystem;
use crate::strength::gravity_moment::{ArmPosition, GravityMoment};
use crate::strength::math_tool::normalize;
use crate::strength::population::{validate_percent_capable, PopulationStrength};

/// Intermediate quantities of an arm.
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct ArmMechanics {
    // Hand, wrist, and elbow relative to the shoulder in the shoulder axis
    // system (SAS) of the arm in m.
    pub position: ArmPosition,
    // Unit force direction in the SAS of the arm.
    pub force_direction: Vector3<f64>,
    // Unit gravity vector in the SAS.
    pub gravity: Vector3<f64>,
    pub gravity_moment: GravityMoment,
    // Inputs of the strength network.
    pub features: Features,
}

/// Strength of an arm.
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct ArmResult {
    // Zero-gravity mean strength from the network in N.
    pub raw_strength: f64,
    // Raw strength saturated to the bound in N.
    pub bounded_strength: f64,
    // Standard deviation of the strength in the population in N.
    pub standard_deviation: f64,
    // Zero-gravity strength that the percent capable can reach in N.
    pub zero_gravity_strength_at_percentile: f64,
    // Component of the gravity force effect along the force in N.
    pub gravity_assist: f64,
    // Strength with the gravity that the percent capable can reach in N.
    pub gravity_adjusted_strength_at_percentile: f64,
    // Percentage of the population capable of the actual load.
    pub percent_capable_of_actual_load: f64,
    pub bound_code: BoundCode,
    pub bound: StrengthBound,
    pub mechanics: ArmMechanics,
}

pub struct Model {
    // Configuration shared by both arms.
    pub config: Config,
}

impl Model {
    /// Create a new model.
    ///
    /// # Arguments
    /// * `config` - Configuration.
    ///
    /// # Returns
    /// A new model.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Evaluate the strength of both arms.
    ///
    /// # Arguments
    /// * `posture` - Posture and hand loads.
    /// * `percent_capable` - Percentage of the population that should be
    /// capable of the strength, in (0, 100).
    ///
    /// # Returns
    /// Strength of the left and right arms.
    ///
    /// # Errors
    /// If the percent capable is out of range or the geometry is degenerate.
    pub fn evaluate(
        &self,
        posture: &Posture,
        percent_capable: f64,
    ) -> Result<Bilateral<ArmResult>, ModelError> {
        validate_percent_capable(percent_capable)?;

        let landmarks = &posture.landmarks;
        let sas = ShoulderAxisSystem::new(
            landmarks.get(Landmark::LeftShoulder),
            landmarks.get(Landmark::RightShoulder),
            landmarks.get(Landmark::C7T1),
            landmarks.get(Landmark::L5S1),
        )?;

        Ok(Bilateral {
            left: self.evaluate_arm(posture, &sas, Side::Left, percent_capable)?,
            right: self.evaluate_arm(posture, &sas, Side::Right, percent_capable)?,
        })
    }

    /// Evaluate the strength of an arm.
    ///
    /// # Arguments
    /// * `posture` - Posture and hand loads.
    /// * `sas` - Shoulder axis system (SAS).
    /// * `side` - Side of the arm.
    /// * `percent_capable` - Percentage of the population that should be
    /// capable of the strength, in (0, 100).
    ///
    /// # Returns
    /// Strength of the arm.
    ///
    /// # Errors
    /// If the percent capable is out of range or the geometry is degenerate.
    pub fn evaluate_arm(
        &self,
        posture: &Posture,
        sas: &ShoulderAxisSystem,
        side: Side,
        percent_capable: f64,
    ) -> Result<ArmResult, ModelError> {
        let mechanics = self.arm_mechanics(posture, sas, side)?;

        let raw_strength = self.config.network.evaluate(&mechanics.features);

        let bound_code =
            BoundCode::classify(&mechanics.position.hand, &mechanics.force_direction);
        let bound = self
            .config
            .bound_table
            .get(&bound_code)
            .ok_or_else(|| ModelError::degenerate(&format!("{side} force direction")))?;
        let bounded_strength = bound.clamp(raw_strength);

        let population = PopulationStrength::new(
            bounded_strength,
            self.config.population.coefficient_of_variation,
        )?;
        let zero_gravity_strength_at_percentile =
            population.strength_at_percent_capable(percent_capable)?;

        // Gravity helps when the assist is positive, so the hand needs less
        // zero-gravity strength to hold the same load.
        let gravity_assist = mechanics
            .gravity_moment
            .gravity_assist(&mechanics.force_direction);
        let percent_capable_of_actual_load =
            population.percent_capable(posture.actual_load.get(side) - gravity_assist);

        debug!(
            "{side} arm: code {bound_code:?}, raw strength {raw_strength:.3} N, bounded strength {bounded_strength:.3} N, gravity assist {gravity_assist:.3} N."
        );

        Ok(ArmResult {
            raw_strength,
            bounded_strength,
            standard_deviation: population.standard_deviation(),
            zero_gravity_strength_at_percentile,
            gravity_assist,
            gravity_adjusted_strength_at_percentile: zero_gravity_strength_at_percentile
                + gravity_assist,
            percent_capable_of_actual_load,
            bound_code,
            bound,
            mechanics,
        })
    }

    /// Calculate the intermediate quantities of an arm.
    ///
    /// # Notes
    /// The positions and force direction are mirrored for the left arm, but
    /// the gravity is not.
    ///
    /// # Arguments
    /// * `posture` - Posture and hand loads.
    /// * `sas` - Shoulder axis system (SAS).
    /// * `side` - Side of the arm.
    ///
    /// # Returns
    /// Intermediate quantities.
    ///
    /// # Errors
    /// If the force direction or gravity moment is degenerate.
    fn arm_mechanics(
        &self,
        posture: &Posture,
        sas: &ShoulderAxisSystem,
        side: Side,
    ) -> Result<ArmMechanics, ModelError> {
        let [hand, wrist, elbow, shoulder] =
            Landmark::arm(side).map(|landmark| posture.landmarks.get(landmark));
        let to_arm = |point: &Vector3<f64>| sas.transform_arm(&(point - shoulder), side);

        let position = ArmPosition {
            hand: to_arm(hand),
            wrist: to_arm(wrist),
            elbow: to_arm(elbow),
        };

        let force_direction = sas.transform_arm(
            &normalize(
                posture.force_direction.get(side),
                &format!("{side} force direction"),
            )?,
            side,
        );
        let gravity = sas.transform(&self.config.population.gravity);

        let gravity_moment = GravityMoment::new(
            &position,
            &gravity,
            self.config.population.body_mass,
            &self.config.population.segments,
        )
        .map_err(|error| match error {
            ModelError::DegenerateGeometry { vector } => {
                ModelError::degenerate(&format!("{side} {vector}"))
            }
            _ => error,
        })?;

        Ok(ArmMechanics {
            features: extract_features(&position.hand, &force_direction),
            position,
            force_direction,
            gravity,
            gravity_moment,
        })
    }
}
