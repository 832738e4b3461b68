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

use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::ModelError;

/// Check the target percentage of the population capable of the strength.
///
/// # Arguments
/// * `percent_capable` - Percent capable in %.
///
/// # Errors
/// If the value is not in the open interval (0, 100).
pub fn validate_percent_capable(percent_capable: f64) -> Result<(), ModelError> {
    if (percent_capable > 0.0) && (percent_capable < 100.0) {
        Ok(())
    } else {
        Err(ModelError::InvalidConfiguration(format!(
            "The percent capable should be in (0, 100) instead of {percent_capable}."
        )))
    }
}

/// Normal distribution of the zero-gravity strength in the population.
#[derive(Clone, Debug)]
pub struct PopulationStrength {
    _mean: f64,
    _standard_deviation: f64,
    _distribution: Normal,
}

impl PopulationStrength {
    /// Create a new population strength.
    ///
    /// # Arguments
    /// * `bounded_strength` - Bounded mean strength in Newton.
    /// * `coefficient_of_variation` - Coefficient of variation of the
    /// population.
    ///
    /// # Returns
    /// Population strength.
    ///
    /// # Errors
    /// If the standard deviation is not positive and finite.
    pub fn new(bounded_strength: f64, coefficient_of_variation: f64) -> Result<Self, ModelError> {
        let standard_deviation = bounded_strength * coefficient_of_variation;
        let distribution = Normal::new(bounded_strength, standard_deviation).map_err(|error| {
            ModelError::InvalidInput(format!(
                "No normal distribution with the mean {bounded_strength} and standard deviation {standard_deviation}: {error}."
            ))
        })?;

        Ok(Self {
            _mean: bounded_strength,
            _standard_deviation: standard_deviation,
            _distribution: distribution,
        })
    }

    /// Mean strength in Newton.
    pub fn mean(&self) -> f64 {
        self._mean
    }

    /// Standard deviation in Newton.
    pub fn standard_deviation(&self) -> f64 {
        self._standard_deviation
    }

    /// Strength that the percentage of the population can reach.
    ///
    /// # Arguments
    /// * `percent_capable` - Percent capable in (0, 100).
    ///
    /// # Returns
    /// Zero-gravity strength in Newton.
    ///
    /// # Errors
    /// If the percent capable is out of range.
    pub fn strength_at_percent_capable(&self, percent_capable: f64) -> Result<f64, ModelError> {
        validate_percent_capable(percent_capable)?;

        Ok(self
            ._distribution
            .inverse_cdf(1.0 - percent_capable / 100.0))
    }

    /// Percentage of the population that is stronger than the load.
    ///
    /// # Arguments
    /// * `load` - Zero-gravity load in Newton.
    ///
    /// # Returns
    /// Percent capable in %.
    pub fn percent_capable(&self, load: f64) -> f64 {
        (1.0 - self._distribution.cdf(load)) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // statrs and the reference tables differ in the last digits of the
    // normal distribution functions.
    const NORMAL_TOLERANCE: f64 = 1e-8;

    fn create_population_strength() -> PopulationStrength {
        PopulationStrength::new(100.0, 0.2).unwrap()
    }

    #[test]
    fn test_validate_percent_capable() {
        assert!(validate_percent_capable(75.0).is_ok());
        assert!(validate_percent_capable(0.1).is_ok());

        for percent_capable in [0.0, 100.0, -5.0, 120.0, f64::NAN] {
            assert!(validate_percent_capable(percent_capable)
                .unwrap_err()
                .is_invalid_configuration());
        }
    }

    #[test]
    fn test_new() {
        let population_strength = create_population_strength();

        assert_eq!(population_strength.mean(), 100.0);
        assert_relative_eq!(population_strength.standard_deviation(), 20.0);
    }

    #[test]
    fn test_new_error() {
        assert!(PopulationStrength::new(0.0, 0.277).is_err());
        assert!(PopulationStrength::new(100.0, -0.1).is_err());
        assert!(PopulationStrength::new(f64::NAN, 0.277).is_err());
    }

    #[test]
    fn test_strength_at_percent_capable() {
        let population_strength = create_population_strength();

        assert_relative_eq!(
            population_strength.strength_at_percent_capable(75.0).unwrap(),
            86.51020499607837,
            max_relative = NORMAL_TOLERANCE
        );
        assert_relative_eq!(
            population_strength.strength_at_percent_capable(95.0).unwrap(),
            67.10292746097055,
            max_relative = NORMAL_TOLERANCE
        );
        assert_relative_eq!(
            population_strength.strength_at_percent_capable(50.0).unwrap(),
            100.0,
            max_relative = NORMAL_TOLERANCE
        );

        assert!(population_strength
            .strength_at_percent_capable(100.0)
            .is_err());
    }

    #[test]
    fn test_strength_at_percent_capable_monotonic() {
        let population_strength = create_population_strength();

        let strengths: Vec<f64> = (1..100)
            .map(|percent_capable| {
                population_strength
                    .strength_at_percent_capable(percent_capable as f64)
                    .unwrap()
            })
            .collect();

        strengths
            .windows(2)
            .for_each(|pair| assert!(pair[1] < pair[0]));
    }

    #[test]
    fn test_percent_capable() {
        let population_strength = create_population_strength();

        assert_relative_eq!(
            population_strength.percent_capable(100.0),
            50.0,
            max_relative = NORMAL_TOLERANCE
        );
        assert_relative_eq!(
            population_strength.percent_capable(120.0),
            15.865525393145708,
            max_relative = NORMAL_TOLERANCE
        );
        assert_relative_eq!(
            population_strength.percent_capable(60.0),
            97.72498680518208,
            max_relative = NORMAL_TOLERANCE
        );
    }

    #[test]
    fn test_percent_capable_inverse() {
        let population_strength = create_population_strength();

        for percent_capable in [5.0, 25.0, 75.0, 99.0] {
            let strength = population_strength
                .strength_at_percent_capable(percent_capable)
                .unwrap();

            assert_relative_eq!(
                population_strength.percent_capable(strength),
                percent_capable,
                epsilon = 1e-6
            );
        }
    }
}
