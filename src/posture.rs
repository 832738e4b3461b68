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

use config::Config;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use strum::IntoEnumIterator;

use crate::constants::{MIN_NORM, NUM_LANDMARK};
use crate::enums::{Landmark, Side};
use crate::error::ModelError;
use crate::utility::{get_config, get_config_value, get_config_vector3};

/// Pair of the left and right values.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct Bilateral<T> {
    pub left: T,
    pub right: T,
}

impl<T> Bilateral<T> {
    /// Get the value of the side.
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Exchange the left and right values.
    pub fn swapped(self) -> Self {
        Self {
            left: self.right,
            right: self.left,
        }
    }
}

/// Landmarks in the global axis system (x: +lateral left, y: +superior,
/// z: +anterior) in m.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct Landmarks {
    _points: [Vector3<f64>; NUM_LANDMARK],
}

impl Landmarks {
    /// Create the landmarks.
    ///
    /// # Arguments
    /// * `points` - Points in the order of the `Landmark` values.
    ///
    /// # Returns
    /// Landmarks.
    ///
    /// # Errors
    /// If any coordinate is not finite.
    pub fn new(points: [Vector3<f64>; NUM_LANDMARK]) -> Result<Self, ModelError> {
        for landmark in Landmark::iter() {
            if points[landmark as usize].iter().any(|x| !x.is_finite()) {
                return Err(ModelError::InvalidInput(format!(
                    "{} should be finite: {:?}",
                    landmark.as_ref(),
                    points[landmark as usize]
                )));
            }
        }

        Ok(Self { _points: points })
    }

    /// Read the landmarks from the configuration. Each landmark is keyed by
    /// its name under the section, e.g. "landmarks.left_hand".
    ///
    /// # Arguments
    /// * `config` - Configuration.
    /// * `section` - Section of the landmarks.
    ///
    /// # Returns
    /// Landmarks.
    ///
    /// # Errors
    /// If any landmark is missing or invalid.
    pub fn from_config(config: &Config, section: &str) -> Result<Self, ModelError> {
        let mut points = [Vector3::zeros(); NUM_LANDMARK];
        for landmark in Landmark::iter() {
            points[landmark as usize] =
                get_config_vector3(config, &format!("{section}.{}", landmark.as_ref()))?;
        }

        Self::new(points)
    }

    /// Get the landmark.
    pub fn get(&self, landmark: Landmark) -> &Vector3<f64> {
        &self._points[landmark as usize]
    }

    /// Reflect the landmarks across the mid-sagittal plane. The left and
    /// right landmarks are exchanged.
    ///
    /// # Returns
    /// Reflected landmarks.
    pub fn mirrored(&self) -> Self {
        let mut points = [Vector3::zeros(); NUM_LANDMARK];
        for landmark in Landmark::iter() {
            points[landmark as usize] = reflect(self.get(landmark.contralateral()));
        }

        Self { _points: points }
    }
}

/// Reflect the vector across the mid-sagittal plane of the global axis
/// system.
///
/// # Arguments
/// * `vector` - Vector in the global axis system.
///
/// # Returns
/// Reflected vector.
pub fn reflect(vector: &Vector3<f64>) -> Vector3<f64> {
    Vector3::new(-vector.x, vector.y, vector.z)
}

/// Posture and hand loads to evaluate.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct Posture {
    // Landmarks in the global axis system.
    pub landmarks: Landmarks,
    // Direction of the force applied by each hand in the global axis system.
    // It does not need to be a unit vector.
    pub force_direction: Bilateral<Vector3<f64>>,
    // Actual load of each hand in N.
    pub actual_load: Bilateral<f64>,
}

impl Posture {
    /// Create a new posture.
    ///
    /// # Arguments
    /// * `landmarks` - Landmarks.
    /// * `force_direction` - Force direction of each hand.
    /// * `actual_load` - Actual load of each hand in N.
    ///
    /// # Returns
    /// Posture.
    ///
    /// # Errors
    /// If a force direction has zero length or is not finite, or a load is
    /// negative or not finite.
    pub fn new(
        landmarks: Landmarks,
        force_direction: Bilateral<Vector3<f64>>,
        actual_load: Bilateral<f64>,
    ) -> Result<Self, ModelError> {
        for side in Side::iter() {
            let direction = force_direction.get(side);
            if direction.iter().any(|x| !x.is_finite()) {
                return Err(ModelError::InvalidInput(format!(
                    "The {side} force direction should be finite: {direction:?}"
                )));
            }

            if direction.norm() < MIN_NORM {
                return Err(ModelError::degenerate(&format!("{side} force direction")));
            }

            let load = *actual_load.get(side);
            if !(load.is_finite() && (load >= 0.0)) {
                return Err(ModelError::InvalidInput(format!(
                    "The {side} actual load should be finite and non-negative instead of {load}"
                )));
            }
        }

        Ok(Self {
            landmarks,
            force_direction,
            actual_load,
        })
    }

    /// Read the posture from the scenario file.
    ///
    /// # Arguments
    /// * `filepath` - Path to the scenario file.
    ///
    /// # Returns
    /// Posture.
    ///
    /// # Errors
    /// If the file can not be read or any value is missing or invalid.
    pub fn from_file(filepath: &Path) -> Result<Self, ModelError> {
        let config = get_config(filepath)?;

        Self::new(
            Landmarks::from_config(&config, "landmarks")?,
            Bilateral {
                left: get_config_vector3(&config, "force_direction.left")?,
                right: get_config_vector3(&config, "force_direction.right")?,
            },
            Bilateral {
                left: get_config_value(&config, "actual_load.left")?,
                right: get_config_value(&config, "actual_load.right")?,
            },
        )
    }

    /// Reflect the posture across the mid-sagittal plane. The left arm of the
    /// reflected posture does what the right arm of this posture does and vice
    /// versa.
    ///
    /// # Returns
    /// Reflected posture.
    pub fn mirrored(&self) -> Self {
        Self {
            landmarks: self.landmarks.mirrored(),
            force_direction: Bilateral {
                left: reflect(&self.force_direction.right),
                right: reflect(&self.force_direction.left),
            },
            actual_load: self.actual_load.swapped(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILEPATH: &str = "config/scenario/example.yaml";

    fn create_posture() -> Posture {
        Posture::from_file(Path::new(FILEPATH)).unwrap()
    }

    #[test]
    fn test_bilateral() {
        let pair = Bilateral {
            left: 1.0,
            right: 2.0,
        };

        assert_eq!(*pair.get(Side::Left), 1.0);
        assert_eq!(*pair.get(Side::Right), 2.0);

        let swapped = pair.swapped();

        assert_eq!(swapped.left, 2.0);
        assert_eq!(swapped.right, 1.0);
    }

    #[test]
    fn test_from_file() {
        let posture = create_posture();

        assert_eq!(
            *posture.landmarks.get(Landmark::LeftHand),
            Vector3::new(0.29034, 0.91934, 0.29134)
        );
        assert_eq!(
            *posture.landmarks.get(Landmark::RightShoulder),
            Vector3::new(-0.21538, 1.32291, -0.06481)
        );
        assert_eq!(
            *posture.landmarks.get(Landmark::C7T1),
            Vector3::new(-0.06385, 1.35457, -0.06182)
        );
        assert_eq!(
            *posture.landmarks.get(Landmark::L5S1),
            Vector3::new(-0.06300, 0.95253, -0.07984)
        );

        assert_eq!(posture.force_direction.left, Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(posture.force_direction.right, Vector3::new(0.0, 1.0, 0.0));

        assert_eq!(posture.actual_load.left, 50.0);
        assert_eq!(posture.actual_load.right, 50.0);
    }

    #[test]
    fn test_from_file_error() {
        assert!(Posture::from_file(Path::new("config/population/female_50th.yaml")).is_err());
    }

    #[test]
    fn test_new_zero_force() {
        let posture = create_posture();

        let error = Posture::new(
            posture.landmarks,
            Bilateral {
                left: Vector3::new(0.0, 1.0, 0.0),
                right: Vector3::zeros(),
            },
            posture.actual_load,
        )
        .unwrap_err();

        assert!(error.is_degenerate_geometry());
        assert_eq!(
            error.to_string(),
            "Degenerate geometry: the right force direction has zero length."
        );
    }

    #[test]
    fn test_new_invalid_load() {
        let posture = create_posture();

        for load in [-1.0, f64::NAN, f64::INFINITY] {
            let error = Posture::new(
                posture.landmarks,
                posture.force_direction,
                Bilateral {
                    left: load,
                    right: 50.0,
                },
            )
            .unwrap_err();

            assert!(matches!(error, ModelError::InvalidInput(_)));
        }
    }

    #[test]
    fn test_landmarks_new_not_finite() {
        let mut points = [Vector3::new(0.1, 1.0, 0.0); NUM_LANDMARK];
        points[Landmark::LeftElbow as usize].y = f64::NAN;

        assert!(matches!(
            Landmarks::new(points).unwrap_err(),
            ModelError::InvalidInput(_)
        ));
    }

    #[test]
    fn test_reflect() {
        assert_eq!(
            reflect(&Vector3::new(0.1, -0.2, 0.3)),
            Vector3::new(-0.1, -0.2, 0.3)
        );
    }

    #[test]
    fn test_mirrored() {
        let posture = create_posture();
        let mirrored = posture.mirrored();

        assert_eq!(
            *mirrored.landmarks.get(Landmark::LeftHand),
            Vector3::new(0.37368, 1.20097, 0.360862)
        );
        assert_eq!(
            *mirrored.landmarks.get(Landmark::RightShoulder),
            Vector3::new(-0.09191, 1.30461, -0.06136)
        );
        assert_eq!(
            *mirrored.landmarks.get(Landmark::C7T1),
            Vector3::new(0.06385, 1.35457, -0.06182)
        );

        assert_eq!(mirrored.mirrored(), posture);
    }
}
