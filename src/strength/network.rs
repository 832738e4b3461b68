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

use log::info;
use nalgebra::{SMatrix, SVector};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{NUM_HIDDEN_NODE, NUM_INPUT};
use crate::error::ModelError;
use crate::strength::feature::Features;
use crate::utility::read_file_json;

/// Coefficients of the strength network as stored in the coefficient file.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct NetworkCoefficients {
    pub version: String,
    #[serde(default)]
    pub description: String,
    pub num_input: usize,
    pub num_hidden: usize,
    // Affine normalization of each input:
    // gain * (input - offset) + min
    pub input_offset: Vec<f64>,
    pub input_gain: Vec<f64>,
    pub input_min: f64,
    // Hidden layer. Each row of the weight is a node.
    pub hidden_bias: Vec<f64>,
    pub hidden_weight: Vec<Vec<f64>>,
    // Output node.
    pub output_bias: f64,
    pub output_weight: Vec<f64>,
    // De-normalization of the output:
    // (output - min) / gain + offset
    pub output_min: f64,
    pub output_gain: f64,
    pub output_offset: f64,
}

/// Pretrained feed-forward network that estimates the zero-gravity mean
/// strength from the features. It has one hidden layer of tanh nodes and a
/// linear output node.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct StrengthNetwork {
    // Version of the coefficient table.
    pub version: String,
    _input_offset: SVector<f64, NUM_INPUT>,
    _input_gain: SVector<f64, NUM_INPUT>,
    _input_min: f64,
    _hidden_bias: SVector<f64, NUM_HIDDEN_NODE>,
    _hidden_weight: SMatrix<f64, NUM_HIDDEN_NODE, NUM_INPUT>,
    _output_bias: f64,
    _output_weight: SVector<f64, NUM_HIDDEN_NODE>,
    _output_min: f64,
    _output_gain: f64,
    _output_offset: f64,
}

impl StrengthNetwork {
    /// Load the strength network from the coefficient file.
    ///
    /// # Arguments
    /// * `filepath` - Path to the JSON coefficient file.
    ///
    /// # Returns
    /// Strength network.
    ///
    /// # Errors
    /// If the file can not be read or the coefficients are malformed.
    pub fn from_file(filepath: &Path) -> Result<Self, ModelError> {
        let network = Self::new(read_file_json(filepath)?)?;
        info!(
            "The strength network (version {}) is loaded from {:?}.",
            network.version, filepath
        );

        Ok(network)
    }

    /// Create the strength network from the coefficients.
    ///
    /// # Arguments
    /// * `coefficients` - Network coefficients.
    ///
    /// # Returns
    /// Strength network.
    ///
    /// # Errors
    /// If the dimensions do not match the network or any coefficient is not
    /// finite.
    pub fn new(coefficients: NetworkCoefficients) -> Result<Self, ModelError> {
        if (coefficients.num_input != NUM_INPUT) || (coefficients.num_hidden != NUM_HIDDEN_NODE) {
            return Err(ModelError::InvalidConfiguration(format!(
                "The network should have {NUM_INPUT} inputs and {NUM_HIDDEN_NODE} hidden nodes instead of {} and {}.",
                coefficients.num_input, coefficients.num_hidden
            )));
        }

        check_length("input_offset", &coefficients.input_offset, NUM_INPUT)?;
        check_length("input_gain", &coefficients.input_gain, NUM_INPUT)?;
        check_length("hidden_bias", &coefficients.hidden_bias, NUM_HIDDEN_NODE)?;
        check_length("output_weight", &coefficients.output_weight, NUM_HIDDEN_NODE)?;

        if coefficients.hidden_weight.len() != NUM_HIDDEN_NODE {
            return Err(ModelError::InvalidConfiguration(format!(
                "hidden_weight should have {NUM_HIDDEN_NODE} rows instead of {}.",
                coefficients.hidden_weight.len()
            )));
        }
        for row in coefficients.hidden_weight.iter() {
            check_length("hidden_weight row", row, NUM_INPUT)?;
        }

        let scalars = [
            coefficients.input_min,
            coefficients.output_bias,
            coefficients.output_min,
            coefficients.output_gain,
            coefficients.output_offset,
        ];
        if scalars.iter().any(|x| !x.is_finite()) {
            return Err(ModelError::InvalidConfiguration(String::from(
                "The scalar coefficients of the network should be finite.",
            )));
        }
        if coefficients.output_gain == 0.0 {
            return Err(ModelError::InvalidConfiguration(String::from(
                "output_gain should not be zero.",
            )));
        }

        Ok(Self {
            version: coefficients.version,
            _input_offset: SVector::from_column_slice(&coefficients.input_offset),
            _input_gain: SVector::from_column_slice(&coefficients.input_gain),
            _input_min: coefficients.input_min,
            _hidden_bias: SVector::from_column_slice(&coefficients.hidden_bias),
            _hidden_weight: SMatrix::from_row_iterator(
                coefficients
                    .hidden_weight
                    .iter()
                    .flat_map(|row| row.iter().copied()),
            ),
            _output_bias: coefficients.output_bias,
            _output_weight: SVector::from_column_slice(&coefficients.output_weight),
            _output_min: coefficients.output_min,
            _output_gain: coefficients.output_gain,
            _output_offset: coefficients.output_offset,
        })
    }

    /// Normalize the features to the range used in the training.
    ///
    /// # Arguments
    /// * `features` - Raw features.
    ///
    /// # Returns
    /// Normalized features.
    pub fn normalize(&self, features: &Features) -> Features {
        self._input_gain
            .component_mul(&(features - self._input_offset))
            .add_scalar(self._input_min)
    }

    /// Evaluate the network.
    ///
    /// # Arguments
    /// * `features` - Raw features.
    ///
    /// # Returns
    /// Raw zero-gravity mean strength in Newton.
    pub fn evaluate(&self, features: &Features) -> f64 {
        let hidden = (self._hidden_bias + self._hidden_weight * self.normalize(features))
            .map(|x: f64| x.tanh());
        let output = self._output_bias + self._output_weight.dot(&hidden);

        (output - self._output_min) / self._output_gain + self._output_offset
    }
}

/// Check the length of the coefficients.
///
/// # Arguments
/// * `name` - Name of the coefficients.
/// * `values` - Coefficients.
/// * `expected` - Expected length.
///
/// # Errors
/// If the length is different from the expected one or any value is not
/// finite.
fn check_length(name: &str, values: &[f64], expected: usize) -> Result<(), ModelError> {
    if values.len() != expected {
        return Err(ModelError::InvalidConfiguration(format!(
            "{name} should have {expected} values instead of {}.",
            values.len()
        )));
    }

    if values.iter().any(|x| !x.is_finite()) {
        return Err(ModelError::InvalidConfiguration(format!(
            "{name} should be finite."
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const FILEPATH: &str = "config/network/ann_coefficients.json";

    fn get_features() -> Features {
        Features::from_column_slice(&[
            -0.11153475397111795,
            0.4328642699852991,
            0.14599119018179246,
            0.45682042844054405,
            0.1837210629026898,
            0.44700277132620075,
            0.9972257844219977,
            -0.04480143370991666,
            0.0594438089414446,
            0.03227171559174542,
            0.1522162297531292,
            -0.4266664942979564,
            0.45415365415682823,
            0.20625554158399995,
            0.09367170790046922,
            0.4555531100916146,
            -0.008230967020750286,
            0.026571547335010926,
        ])
    }

    fn get_coefficients() -> NetworkCoefficients {
        read_file_json(Path::new(FILEPATH)).unwrap()
    }

    #[test]
    fn test_from_file() {
        let network = StrengthNetwork::from_file(Path::new(FILEPATH)).unwrap();

        assert_eq!(network.version, "1.0");
        assert_relative_eq!(network._hidden_weight[(0, 0)], 0.039646819703628, epsilon = 1e-15);
        assert_relative_eq!(network._hidden_weight[(0, 1)], 0.513591491340921, epsilon = 1e-15);
        assert_relative_eq!(
            network._hidden_weight[(12, 17)],
            -0.533528238115198,
            epsilon = 1e-15
        );
        assert_relative_eq!(network._output_weight[12], 1.69729115635384, epsilon = 1e-15);
    }

    #[test]
    fn test_from_file_error() {
        assert!(matches!(
            StrengthNetwork::from_file(Path::new("wrong.json")),
            Err(ModelError::Io(_))
        ));
    }

    #[test]
    fn test_new_wrong_dimension() {
        let mut coefficients = get_coefficients();
        coefficients.num_hidden = 12;
        assert!(StrengthNetwork::new(coefficients)
            .unwrap_err()
            .is_invalid_configuration());

        let mut coefficients = get_coefficients();
        coefficients.input_gain.pop();
        assert!(StrengthNetwork::new(coefficients)
            .unwrap_err()
            .is_invalid_configuration());

        let mut coefficients = get_coefficients();
        coefficients.hidden_weight[3].push(0.1);
        assert!(StrengthNetwork::new(coefficients)
            .unwrap_err()
            .is_invalid_configuration());

        let mut coefficients = get_coefficients();
        coefficients.hidden_weight.pop();
        assert!(StrengthNetwork::new(coefficients)
            .unwrap_err()
            .is_invalid_configuration());
    }

    #[test]
    fn test_new_wrong_value() {
        let mut coefficients = get_coefficients();
        coefficients.output_gain = 0.0;
        assert!(StrengthNetwork::new(coefficients)
            .unwrap_err()
            .is_invalid_configuration());

        let mut coefficients = get_coefficients();
        coefficients.hidden_bias[0] = f64::NAN;
        assert!(StrengthNetwork::new(coefficients)
            .unwrap_err()
            .is_invalid_configuration());
    }

    #[test]
    fn test_normalize() {
        let network = StrengthNetwork::new(get_coefficients()).unwrap();

        let normalized = network.normalize(&get_features());

        // gain * (input - offset) - 1
        assert_relative_eq!(
            normalized[0],
            2.24379895561358 * (-0.11153475397111795 + 0.414545454545454) - 1.0,
            epsilon = 1e-12
        );
        // Direction cosines are kept
        assert_relative_eq!(normalized[6], 0.9972257844219977, epsilon = 1e-12);
    }

    #[test]
    fn test_evaluate() {
        let network = StrengthNetwork::new(get_coefficients()).unwrap();

        let strength = network.evaluate(&get_features());

        assert_relative_eq!(strength, 95.56843725287573, epsilon = 1e-9);

        // Deterministic
        assert_eq!(network.evaluate(&get_features()), strength);
    }
}
