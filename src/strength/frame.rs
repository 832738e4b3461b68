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

use nalgebra::{Matrix3, Vector3};

use crate::constants::{INDEX_ANTERIOR, INDEX_LATERAL, INDEX_SUPERIOR};
use crate::enums::Side;
use crate::error::ModelError;
use crate::strength::math_tool::normalize;

/// Shoulder axis system (SAS).
///
/// # Notes
/// The rows of the basis are the anterior, superior, and lateral unit vectors
/// in the global axis system. The lateral axis points from the left shoulder
/// to the right shoulder. Any vector in the global axis system is projected to
/// the SAS with the basis, and the components are in the order of (anterior,
/// superior, lateral).
#[derive(Clone, PartialEq, Debug)]
pub struct ShoulderAxisSystem {
    _basis: Matrix3<f64>,
}

impl ShoulderAxisSystem {
    /// Build the shoulder axis system (SAS) from the landmarks.
    ///
    /// # Notes
    /// lateral = normalize(right_shoulder - left_shoulder)
    /// trunk = normalize(c7t1 - l5s1)
    /// anterior = normalize(trunk x lateral)
    /// superior = lateral x anterior
    ///
    /// # Arguments
    /// * `left_shoulder` - Left shoulder in the global axis system.
    /// * `right_shoulder` - Right shoulder in the global axis system.
    /// * `c7t1` - C7/T1 joint in the global axis system.
    /// * `l5s1` - L5/S1 joint in the global axis system.
    ///
    /// # Returns
    /// A new SAS.
    ///
    /// # Errors
    /// If the shoulders coincide, the trunk has zero length, or the trunk is
    /// parallel to the lateral axis.
    pub fn new(
        left_shoulder: &Vector3<f64>,
        right_shoulder: &Vector3<f64>,
        c7t1: &Vector3<f64>,
        l5s1: &Vector3<f64>,
    ) -> Result<Self, ModelError> {
        let lateral = normalize(&(right_shoulder - left_shoulder), "lateral axis")?;
        let trunk = normalize(&(c7t1 - l5s1), "trunk axis")?;
        let anterior = normalize(&trunk.cross(&lateral), "anterior axis")?;
        let superior = lateral.cross(&anterior);

        let mut basis = Matrix3::zeros();
        basis.set_row(INDEX_ANTERIOR, &anterior.transpose());
        basis.set_row(INDEX_SUPERIOR, &superior.transpose());
        basis.set_row(INDEX_LATERAL, &lateral.transpose());

        Ok(Self { _basis: basis })
    }

    /// Get the basis. Each row is an axis in the global axis system.
    pub fn basis(&self) -> &Matrix3<f64> {
        &self._basis
    }

    /// Transform the vector from the global axis system to the SAS.
    ///
    /// # Arguments
    /// * `vector` - Vector in the global axis system.
    ///
    /// # Returns
    /// Vector in the SAS: (anterior, superior, lateral).
    pub fn transform(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self._basis * vector
    }

    /// Transform the vector from the global axis system to the SAS of the
    /// arm. The lateral component is reversed for the left arm so that the
    /// positive lateral always points away from the body.
    ///
    /// # Arguments
    /// * `vector` - Vector in the global axis system.
    /// * `side` - Side of the arm.
    ///
    /// # Returns
    /// Vector in the SAS of the arm: (anterior, superior, lateral).
    pub fn transform_arm(&self, vector: &Vector3<f64>, side: Side) -> Vector3<f64> {
        mirror_lateral(&self.transform(vector), side)
    }
}

/// Mirror the lateral component of the vector in the shoulder axis system
/// (SAS) for the arm.
///
/// # Arguments
/// * `vector` - Vector in the SAS.
/// * `side` - Side of the arm.
///
/// # Returns
/// Vector with the lateral component multiplied by the lateral sign of the
/// side.
pub fn mirror_lateral(vector: &Vector3<f64>, side: Side) -> Vector3<f64> {
    let mut mirrored = *vector;
    mirrored[INDEX_LATERAL] *= side.lateral_sign();

    mirrored
}
