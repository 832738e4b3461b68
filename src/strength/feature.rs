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

use nalgebra::{SVector, Vector3};

use crate::constants::{INDEX_ANTERIOR, INDEX_LATERAL, INDEX_SUPERIOR, NUM_INPUT};
use crate::strength::math_tool::norm_2d;

/// Input features of the strength network.
pub type Features = SVector<f64, NUM_INPUT>;

/// Extract the input features of the strength network.
///
/// # Notes
/// Both vectors are reordered to (superior, anterior, lateral) first, written
/// as r = (r0, r1, r2) and F = (F0, F1, F2). The order of the features is
/// fixed by the trained network:
///
/// 0-2: r
/// 3: |(r1, r2)|, 4: |(r0, r2)|, 5: |(r0, r1)| (2D projections of r)
/// 6-8: F
/// 9-11: m = r x F (3D moment arm)
/// 12: |m|, 13: |m|^2, 14: |m|^3
/// 15: feature 3 * F0, 16: feature 4 * F1, 17: feature 5 * F2
///
/// # Arguments
/// * `hand` - Hand position relative to the shoulder in the shoulder axis
/// system (SAS) of the arm: (anterior, superior, lateral).
/// * `force_direction` - Unit force direction in the SAS of the arm.
///
/// # Returns
/// Features.
pub fn extract_features(hand: &Vector3<f64>, force_direction: &Vector3<f64>) -> Features {
    let r = reorder(hand);
    let force = reorder(force_direction);

    let projection = Vector3::new(
        norm_2d(r[1], r[2]),
        norm_2d(r[0], r[2]),
        norm_2d(r[0], r[1]),
    );
    let moment_arm = r.cross(&force);
    let moment_arm_norm = moment_arm.norm();

    let mut features = Features::zeros();
    features.fixed_rows_mut::<3>(0).copy_from(&r);
    features.fixed_rows_mut::<3>(3).copy_from(&projection);
    features.fixed_rows_mut::<3>(6).copy_from(&force);
    features.fixed_rows_mut::<3>(9).copy_from(&moment_arm);
    features[12] = moment_arm_norm;
    features[13] = moment_arm_norm.powi(2);
    features[14] = moment_arm_norm.powi(3);
    features
        .fixed_rows_mut::<3>(15)
        .copy_from(&projection.component_mul(&force));

    features
}

/// Reorder the vector in the shoulder axis system (SAS) to (superior,
/// anterior, lateral).
fn reorder(vector: &Vector3<f64>) -> Vector3<f64> {
    Vector3::new(
        vector[INDEX_SUPERIOR],
        vector[INDEX_ANTERIOR],
        vector[INDEX_LATERAL],
    )
}
