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

use config::Config as ConfigFile;
use log::info;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use strum::IntoEnumIterator;

use crate::constants::NUM_SEGMENT;
use crate::enums::Segment;
use crate::error::ModelError;
use crate::strength::bound_table::BoundTable;
use crate::strength::gravity_moment::SegmentParameters;
use crate::strength::math_tool::normalize;
use crate::strength::network::StrengthNetwork;
use crate::strength::population::validate_percent_capable;
use crate::utility::{get_config, get_config_value, get_config_vector3, path_to_string};

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct PopulationParameters {
    // Name of the reference population, e.g. "female_50th".
    pub profile: String,
    // Body mass in kg.
    pub body_mass: f64,
    // Stature in m. It is not used by the strength model.
    pub stature: f64,
    // Coefficient of variation of the strength.
    pub coefficient_of_variation: f64,
    // Default percentage of the population capable of the strength.
    pub percent_capable: f64,
    // Unit gravity vector in the global axis system.
    pub gravity: Vector3<f64>,
    // Upper arm, forearm, and hand.
    pub segments: [SegmentParameters; NUM_SEGMENT],
}

impl PopulationParameters {
    /// Read the population parameters from the file.
    ///
    /// # Arguments
    /// * `filepath` - Path to the population file.
    ///
    /// # Returns
    /// Population parameters. The gravity is normalized.
    ///
    /// # Errors
    /// If the file can not be read or any value is invalid.
    pub fn from_file(filepath: &Path) -> Result<Self, ModelError> {
        let config = get_config(filepath)?;

        let mut segments = [SegmentParameters {
            cog_ratio: 0.0,
            mass_ratio: 0.0,
        }; NUM_SEGMENT];
        for segment in Segment::iter() {
            segments[segment as usize] = Self::read_segment(&config, segment)?;
        }

        let parameters = Self {
            profile: get_config_value(&config, "profile")?,
            body_mass: get_config_value(&config, "body_mass")?,
            stature: get_config_value(&config, "stature")?,
            coefficient_of_variation: get_config_value(&config, "coefficient_of_variation")?,
            percent_capable: get_config_value(&config, "percent_capable")?,
            gravity: normalize(&get_config_vector3(&config, "gravity")?, "gravity")?,
            segments: segments,
        };
        parameters.validate()?;

        Ok(parameters)
    }

    /// Read the parameters of the segment.
    ///
    /// # Arguments
    /// * `config` - Configuration.
    /// * `segment` - Segment.
    ///
    /// # Returns
    /// Segment parameters.
    ///
    /// # Errors
    /// If the ratios are missing.
    fn read_segment(config: &ConfigFile, segment: Segment) -> Result<SegmentParameters, ModelError> {
        Ok(SegmentParameters {
            cog_ratio: get_config_value(config, &format!("cog_ratio_{}", segment.as_ref()))?,
            mass_ratio: get_config_value(config, &format!("mass_ratio_{}", segment.as_ref()))?,
        })
    }

    /// Validate the parameters.
    ///
    /// # Errors
    /// If the body mass, stature, or coefficient of variation is not
    /// positive, a ratio is not in (0, 1], or the percent capable is not in
    /// (0, 100).
    pub fn validate(&self) -> Result<(), ModelError> {
        for (name, value) in [
            ("body mass", self.body_mass),
            ("stature", self.stature),
            ("coefficient of variation", self.coefficient_of_variation),
        ] {
            if !(value.is_finite() && (value > 0.0)) {
                return Err(ModelError::InvalidConfiguration(format!(
                    "The {name} should be positive instead of {value}."
                )));
            }
        }

        for segment in Segment::iter() {
            let parameters = &self.segments[segment as usize];
            for (name, value) in [
                ("center of gravity ratio", parameters.cog_ratio),
                ("mass ratio", parameters.mass_ratio),
            ] {
                if !((value > 0.0) && (value <= 1.0)) {
                    return Err(ModelError::InvalidConfiguration(format!(
                        "The {name} of the {} should be in (0, 1] instead of {value}.",
                        segment.as_ref()
                    )));
                }
            }
        }

        validate_percent_capable(self.percent_capable)
    }
}

pub struct Config {
    // Application configuration filename.
    pub filename: String,
    // Reference population.
    pub population: PopulationParameters,
    // Strength network.
    pub network: StrengthNetwork,
    // Bound table of the strength.
    pub bound_table: BoundTable,
}

impl Config {
    /// Create a new config object.
    ///
    /// # Arguments
    /// * `filepath_parameters_app` - Path to the application parameters file.
    /// * `filepath_population` - Path to the population file. If None, the
    /// file in the application parameters is used.
    ///
    /// # Returns
    /// A new config object.
    ///
    /// # Errors
    /// If any of the files can not be read or is invalid.
    pub fn new(
        filepath_parameters_app: &Path,
        filepath_population: Option<&Path>,
    ) -> Result<Self, ModelError> {
        let parameters_app = get_config(filepath_parameters_app)?;
        let get_path = |key: &str| -> Result<String, ModelError> {
            get_config_value::<String>(&parameters_app, key)
        };

        let population = match filepath_population {
            Some(filepath) => PopulationParameters::from_file(filepath)?,
            None => PopulationParameters::from_file(Path::new(&get_path("population")?))?,
        };
        info!(
            "Use the {} population: body mass {} kg, coefficient of variation {}.",
            population.profile, population.body_mass, population.coefficient_of_variation
        );

        Ok(Self {
            filename: path_to_string(filepath_parameters_app)?,
            population: population,
            network: StrengthNetwork::from_file(Path::new(&get_path("network")?))?,
            bound_table: BoundTable::from_file(Path::new(&get_path("bound_table")?))?,
        })
    }
}
