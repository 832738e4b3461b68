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
use num_traits::Float;

use crate::constants::MIN_NORM;
use crate::error::ModelError;

/// Clip the value between the lower and upper bounds.
///
/// # Arguments
/// * `value` - The value to be clipped.
/// * `lower` - The lower bound.
/// * `upper` - The upper bound.
///
/// # Returns
/// The clipped value.
pub fn clip<T>(value: T, lower: T, upper: T) -> T
where
    T: PartialOrd,
{
    if value < lower {
        lower
    } else if value > upper {
        upper
    } else {
        value
    }
}

/// Classify the value into a ternary code.
///
/// # Arguments
/// * `value` - The value to classify.
/// * `threshold` - Half width of the band around zero that gives the code 0.
/// Use 0 to get the sign of the value.
///
/// # Returns
/// -1 if the value is below -threshold, 1 if the value is above threshold, 0
/// otherwise.
pub fn classify_code<T>(value: T, threshold: T) -> i8
where
    T: Float,
{
    if value < -threshold {
        -1
    } else if value > threshold {
        1
    } else {
        0
    }
}

/// Normalize the vector.
///
/// # Arguments
/// * `vector` - The vector to normalize.
/// * `name` - Name of the vector used in the error.
///
/// # Returns
/// The unit vector.
///
/// # Errors
/// If the vector has zero length.
pub fn normalize(vector: &Vector3<f64>, name: &str) -> Result<Vector3<f64>, ModelError> {
    vector
        .try_normalize(MIN_NORM)
        .ok_or_else(|| ModelError::degenerate(name))
}

/// Norm of the 2D vector.
///
/// # Arguments
/// * `x` - The first component.
/// * `y` - The second component.
///
/// # Returns
/// The norm.
pub fn norm_2d(x: f64, y: f64) -> f64 {
    (x.powi(2) + y.powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clip() {
        assert_eq!(clip(1.0, 2.0, 3.0), 2.0);
        assert_eq!(clip(4.0, 2.0, 3.0), 3.0);
        assert_eq!(clip(2.5, 2.0, 3.0), 2.5);
    }

    #[test]
    fn test_classify_code() {
        assert_eq!(classify_code(-0.02, 0.01), -1);
        assert_eq!(classify_code(-0.01, 0.01), 0);
        assert_eq!(classify_code(0.005, 0.01), 0);
        assert_eq!(classify_code(0.01, 0.01), 0);
        assert_eq!(classify_code(0.011, 0.01), 1);
    }

    #[test]
    fn test_classify_code_sign() {
        assert_eq!(classify_code(-1e-9, 0.0), -1);
        assert_eq!(classify_code(0.0, 0.0), 0);
        assert_eq!(classify_code(-0.0, 0.0), 0);
        assert_eq!(classify_code(0.3_f32, 0.0), 1);
    }

    #[test]
    fn test_normalize() {
        let unit = normalize(&Vector3::new(3.0, 0.0, 4.0), "test").unwrap();

        assert_relative_eq!(unit, Vector3::new(0.6, 0.0, 0.8), epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_error() {
        let error = normalize(&Vector3::zeros(), "trunk axis").unwrap_err();

        assert!(error.is_degenerate_geometry());
        assert_eq!(
            error.to_string(),
            "Degenerate geometry: the trunk axis has zero length."
        );
    }

    #[test]
    fn test_norm_2d() {
        assert_eq!(norm_2d(3.0, 4.0), 5.0);
        assert_eq!(norm_2d(0.0, 0.0), 0.0);
    }
}
