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

use thiserror::Error;

/// Errors of the arm strength model.
///
/// There is no retry for any of them: the model is deterministic and the
/// same input always gives the same error.
#[derive(Error, Debug)]
pub enum ModelError {
    /// A vector that must be normalized has zero length, e.g. coincident
    /// shoulders or a zero force direction. The field names the vector.
    #[error("Degenerate geometry: the {vector} has zero length.")]
    DegenerateGeometry { vector: String },
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Failed to read the configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Failed to read the table: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to parse the coefficients: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ModelError {
    /// Create a degenerate geometry error.
    ///
    /// # Arguments
    /// * `vector` - Name of the vector that can not be normalized.
    ///
    /// # Returns
    /// The error.
    pub fn degenerate(vector: &str) -> Self {
        ModelError::DegenerateGeometry {
            vector: String::from(vector),
        }
    }

    /// Is this a degenerate geometry error or not.
    pub fn is_degenerate_geometry(&self) -> bool {
        matches!(self, ModelError::DegenerateGeometry { .. })
    }

    /// Is this an invalid configuration error or not.
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, ModelError::InvalidConfiguration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate() {
        let error = ModelError::degenerate("lateral axis");

        assert!(error.is_degenerate_geometry());
        assert!(!error.is_invalid_configuration());
        assert_eq!(
            error.to_string(),
            "Degenerate geometry: the lateral axis has zero length."
        );
    }

    #[test]
    fn test_invalid_configuration() {
        let error = ModelError::InvalidConfiguration(String::from("body mass is -1"));

        assert!(error.is_invalid_configuration());
        assert_eq!(error.to_string(), "Invalid configuration: body mass is -1");
    }
}
