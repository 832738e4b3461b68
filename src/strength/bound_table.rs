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
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{
    HEIGHT_BAND, INDEX_ANTERIOR, INDEX_LATERAL, INDEX_SUPERIOR, NUM_BOUND_CELL, NUM_CODE_AXIS,
    NUM_CODE_VALUE,
};
use crate::error::ModelError;
use crate::strength::math_tool::{classify_code, clip};
use crate::utility::read_file_table;

/// Posture and force code that selects the cell of the bound table. Each
/// axis is in {-1, 0, 1}.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct BoundCode {
    // Hand below (-1), at (0), or above (1) the shoulder.
    pub height: i8,
    // Posterior (-1) or anterior (1) force.
    pub anterior_posterior: i8,
    // Inferior (-1) or superior (1) force.
    pub superior_inferior: i8,
    // Medial (-1) or lateral (1) force.
    pub medial_lateral: i8,
}

impl BoundCode {
    /// Classify the hand position and force direction.
    ///
    /// # Arguments
    /// * `hand` - Hand position relative to the shoulder in the shoulder axis
    /// system (SAS) of the arm.
    /// * `force_direction` - Force direction in the SAS of the arm.
    ///
    /// # Returns
    /// Bound code.
    pub fn classify(hand: &Vector3<f64>, force_direction: &Vector3<f64>) -> Self {
        Self {
            height: classify_code(hand[INDEX_SUPERIOR], HEIGHT_BAND),
            anterior_posterior: classify_code(force_direction[INDEX_ANTERIOR], 0.0),
            superior_inferior: classify_code(force_direction[INDEX_SUPERIOR], 0.0),
            // TODO: Confirm the medial/lateral sign convention of the left arm
            // against the study data. The left arm uses the mirrored lateral
            // component here.
            medial_lateral: classify_code(force_direction[INDEX_LATERAL], 0.0),
        }
    }

    /// Index of the cell in the flattened table:
    /// 27 * (height + 1) + 9 * (anterior_posterior + 1) +
    /// 3 * (superior_inferior + 1) + (medial_lateral + 1).
    ///
    /// # Returns
    /// Index of the cell. None if any axis is out of {-1, 0, 1}.
    pub fn index(&self) -> Option<usize> {
        let codes: [i8; NUM_CODE_AXIS] = [
            self.height,
            self.anterior_posterior,
            self.superior_inferior,
            self.medial_lateral,
        ];

        codes
            .iter()
            .try_fold(0, |acc, &code| {
                if (-1..=1).contains(&code) {
                    Some(acc * NUM_CODE_VALUE + ((code + 1) as usize))
                } else {
                    None
                }
            })
    }
}

/// Observed minimum and maximum strength of a cell in Newton.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct StrengthBound {
    pub min: f64,
    pub max: f64,
}

impl StrengthBound {
    /// Saturate the strength to the bound.
    ///
    /// # Arguments
    /// * `strength` - Strength in Newton.
    ///
    /// # Returns
    /// Bounded strength in Newton.
    pub fn clamp(&self, strength: f64) -> f64 {
        clip(strength, self.min, self.max)
    }
}

/// Row of the bound table file.
#[derive(Deserialize, Debug)]
struct BoundRecord {
    height: i8,
    anterior_posterior: i8,
    superior_inferior: i8,
    medial_lateral: i8,
    min: f64,
    max: f64,
}

/// Lookup table of the observed strength bounds.
///
/// # Notes
/// A cell with the minimum larger than the maximum was not observed in the
/// studies (the published table uses 9999 and -9999). These are the cells
/// that have no force component at all.
#[derive(Clone, PartialEq, Debug)]
pub struct BoundTable {
    _cells: Vec<Option<StrengthBound>>,
}

impl BoundTable {
    /// Load the bound table from the file.
    ///
    /// # Arguments
    /// * `filepath` - Path to the CSV file with the columns: height,
    /// anterior_posterior, superior_inferior, medial_lateral, min, max.
    ///
    /// # Returns
    /// Bound table.
    ///
    /// # Errors
    /// If the file can not be read or does not have each code exactly once.
    pub fn from_file(filepath: &Path) -> Result<Self, ModelError> {
        let records: Vec<BoundRecord> = read_file_table(filepath)?;
        let table = Self::new(
            records
                .iter()
                .map(|record| {
                    (
                        BoundCode {
                            height: record.height,
                            anterior_posterior: record.anterior_posterior,
                            superior_inferior: record.superior_inferior,
                            medial_lateral: record.medial_lateral,
                        },
                        record.min,
                        record.max,
                    )
                })
                .collect(),
        )?;

        info!(
            "The bound table is loaded from {:?} with {} observed cells.",
            filepath,
            table.num_observed()
        );

        Ok(table)
    }

    /// Create the bound table.
    ///
    /// # Arguments
    /// * `rows` - Code, minimum, and maximum of each cell.
    ///
    /// # Returns
    /// Bound table.
    ///
    /// # Errors
    /// If there is an invalid, duplicated, or missing code, or a value is not
    /// finite.
    pub fn new(rows: Vec<(BoundCode, f64, f64)>) -> Result<Self, ModelError> {
        let mut cells: Vec<Option<StrengthBound>> = vec![None; NUM_BOUND_CELL];
        let mut is_filled = vec![false; NUM_BOUND_CELL];

        for (code, min, max) in rows {
            let idx = code.index().ok_or_else(|| {
                ModelError::InvalidConfiguration(format!(
                    "The code {code:?} should only have -1, 0, or 1."
                ))
            })?;

            if is_filled[idx] {
                return Err(ModelError::InvalidConfiguration(format!(
                    "The code {code:?} is duplicated in the bound table."
                )));
            }

            if !min.is_finite() || !max.is_finite() {
                return Err(ModelError::InvalidConfiguration(format!(
                    "The bound of the code {code:?} should be finite."
                )));
            }

            is_filled[idx] = true;
            if min <= max {
                cells[idx] = Some(StrengthBound { min, max });
            }
        }

        let num_missing = is_filled.iter().filter(|&&filled| !filled).count();
        if num_missing != 0 {
            return Err(ModelError::InvalidConfiguration(format!(
                "The bound table misses {num_missing} of {NUM_BOUND_CELL} cells."
            )));
        }

        Ok(Self { _cells: cells })
    }

    /// Get the bound of the cell.
    ///
    /// # Arguments
    /// * `code` - Bound code.
    ///
    /// # Returns
    /// Bound of the cell. None if the cell was not observed or the code is
    /// invalid.
    pub fn get(&self, code: &BoundCode) -> Option<StrengthBound> {
        code.index().and_then(|idx| self._cells[idx])
    }

    /// Number of the observed cells.
    pub fn num_observed(&self) -> usize {
        self._cells.iter().filter(|cell| cell.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FILEPATH: &str = "config/bound_table.csv";

    fn code(height: i8, ap: i8, si: i8, ml: i8) -> BoundCode {
        BoundCode {
            height,
            anterior_posterior: ap,
            superior_inferior: si,
            medial_lateral: ml,
        }
    }

    fn get_rows() -> Vec<(BoundCode, f64, f64)> {
        let mut rows = Vec::new();
        for height in -1..=1 {
            for ap in -1..=1 {
                for si in -1..=1 {
                    for ml in -1..=1 {
                        rows.push((code(height, ap, si, ml), 50.0, 200.0));
                    }
                }
            }
        }

        rows
    }

    #[test]
    fn test_index() {
        assert_eq!(code(-1, -1, -1, -1).index(), Some(0));
        assert_eq!(code(-1, -1, 1, 1).index(), Some(8));
        assert_eq!(code(0, 0, 0, 0).index(), Some(40));
        assert_eq!(code(1, 1, 1, 1).index(), Some(80));
        assert_eq!(code(1, 0, -1, 0).index(), Some(64));

        assert_eq!(code(2, 0, 0, 0).index(), None);
        assert_eq!(code(0, 0, -2, 0).index(), None);
    }

    #[test]
    fn test_classify() {
        // Right arm of the example posture
        let bound_code = BoundCode::classify(
            &Vector3::new(0.4328642699852991, -0.11153475397111795, 0.14599119018179246),
            &Vector3::new(-0.04480143370991666, 0.9972257844219977, 0.0594438089414446),
        );

        assert_eq!(bound_code, code(-1, -1, 1, 1));

        // Hand at the shoulder height, pure anterior force
        let bound_code = BoundCode::classify(
            &Vector3::new(0.5, 0.005, 0.1),
            &Vector3::new(1.0, 0.0, 0.0),
        );

        assert_eq!(bound_code, code(0, 1, 0, 0));

        // Hand above the shoulder, medial and inferior force
        let bound_code = BoundCode::classify(
            &Vector3::new(0.3, 0.2, 0.1),
            &Vector3::new(0.0, -0.6, -0.8),
        );

        assert_eq!(bound_code, code(1, 0, -1, -1));
    }

    #[test]
    fn test_from_file() {
        let table = BoundTable::from_file(Path::new(FILEPATH)).unwrap();

        assert_eq!(table.num_observed(), NUM_BOUND_CELL - 3);

        assert_eq!(
            table.get(&code(-1, -1, 1, 1)),
            Some(StrengthBound {
                min: 49.9,
                max: 223.2
            })
        );
        assert_eq!(
            table.get(&code(-1, 0, -1, 0)),
            Some(StrengthBound {
                min: 64.3,
                max: 120.0
            })
        );
        assert_eq!(
            table.get(&code(1, 1, 1, 1)),
            Some(StrengthBound {
                min: 52.9,
                max: 170.2
            })
        );

        // No force component
        for height in -1..=1 {
            assert_eq!(table.get(&code(height, 0, 0, 0)), None);
        }
    }

    #[test]
    fn test_from_file_bound_order() {
        let table = BoundTable::from_file(Path::new(FILEPATH)).unwrap();

        table
            ._cells
            .iter()
            .flatten()
            .for_each(|bound| assert!(bound.min <= bound.max));
    }

    #[test]
    fn test_from_file_error() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(
            b"height,anterior_posterior,superior_inferior,medial_lateral,min,max\n0,0,0,1,50.0,100.0\n",
        )
        .unwrap();

        let error = BoundTable::from_file(file.path()).unwrap_err();

        assert!(error.is_invalid_configuration());
        assert_eq!(
            error.to_string(),
            "Invalid configuration: The bound table misses 80 of 81 cells."
        );
    }

    #[test]
    fn test_new() {
        let table = BoundTable::new(get_rows()).unwrap();

        assert_eq!(table.num_observed(), NUM_BOUND_CELL);
    }

    #[test]
    fn test_new_duplicated() {
        let mut rows = get_rows();
        rows[5] = rows[4];

        assert!(BoundTable::new(rows).unwrap_err().is_invalid_configuration());
    }

    #[test]
    fn test_new_invalid_code() {
        let mut rows = get_rows();
        rows.push((code(0, 3, 0, 0), 50.0, 100.0));

        assert!(BoundTable::new(rows).unwrap_err().is_invalid_configuration());
    }

    #[test]
    fn test_new_not_finite() {
        let mut rows = get_rows();
        rows[0].2 = f64::INFINITY;

        assert!(BoundTable::new(rows).unwrap_err().is_invalid_configuration());
    }

    #[test]
    fn test_clamp() {
        let bound = StrengthBound {
            min: 49.9,
            max: 223.2,
        };

        assert_eq!(bound.clamp(10.0), 49.9);
        assert_eq!(bound.clamp(300.0), 223.2);
        assert_eq!(bound.clamp(95.5), 95.5);
        assert_eq!(bound.clamp(49.9), 49.9);
    }
}
