use approx::assert_relative_eq;
use config::Config;
use csv::ReaderBuilder;
use nalgebra::Vector3;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::ModelError;

/// Trait for parsing the configuration value.
///
/// # Parameters
/// * `Self` - Type of the configuration value.
pub trait ConfigValue: Sized {
    /// Parse the configuration value.
    ///
    /// # Parameters
    /// * `s` - String to parse.
    ///
    /// # Returns
    /// The parsed configuration value.
    ///
    /// # Errors
    /// If the string can not be parsed as the type.
    fn parse_value(s: &str) -> Result<Self, ModelError>;
}

/// Implement the trait ConfigValue for String.
impl ConfigValue for String {
    fn parse_value(s: &str) -> Result<Self, ModelError> {
        Ok(s.to_string())
    }
}

/// Implement the trait ConfigValue for f64.
impl ConfigValue for f64 {
    fn parse_value(s: &str) -> Result<Self, ModelError> {
        s.trim().parse::<f64>().map_err(|_| {
            ModelError::InvalidConfiguration(format!("{s} should parse as f64"))
        })
    }
}

/// Convert the path to a string.
///
/// # Parameters
/// * `filepath` - Path.
///
/// # Returns
/// Path as a string.
///
/// # Errors
/// If the path is not valid unicode.
pub fn path_to_string(filepath: &Path) -> Result<String, ModelError> {
    filepath.to_str().map(String::from).ok_or_else(|| {
        ModelError::InvalidConfiguration(format!("{:?} is not a valid file name", filepath))
    })
}

/// Get the configuation from the file.
///
/// # Parameters
/// * `filepath` - Path to the config file.
///
/// # Returns
/// The configuration.
///
/// # Errors
/// If the file can not be read.
pub fn get_config(filepath: &Path) -> Result<Config, ModelError> {
    let name = path_to_string(filepath)?;

    Ok(Config::builder()
        .add_source(config::File::with_name(&name))
        .build()?)
}

/// Get the value from the configuration.
///
/// # Parameters
/// * `config` - Configuration.
/// * `key` - Key to find the value.
///
/// # Returns
/// The value.
///
/// # Errors
/// If the key does not exist or the value can not be parsed.
pub fn get_config_value<T: ConfigValue>(config: &Config, key: &str) -> Result<T, ModelError> {
    T::parse_value(&config.get_string(key)?)
}

/// Get the array value from the configuration.
///
/// # Parameters
/// * `config` - Configuration.
/// * `key` - Key to find the array.
///
/// # Returns
/// The array value.
///
/// # Errors
/// If the key does not exist or any element can not be parsed.
pub fn get_config_array<T: ConfigValue>(config: &Config, key: &str) -> Result<Vec<T>, ModelError> {
    config
        .get_array(key)?
        .into_iter()
        .map(|x| T::parse_value(&x.into_string()?))
        .collect()
}

/// Get the parameter from the file.
///
/// # Parameters
/// * `filepath` - Path to the config file.
/// * `key` - Key to find the parameter in the config file.
///
/// # Returns
/// The parameter.
///
/// # Errors
/// If the file can not be read or the parameter is not found.
pub fn get_parameter<T: ConfigValue>(filepath: &Path, key: &str) -> Result<T, ModelError> {
    get_config_value(&get_config(filepath)?, key)
}

/// Get the 3D vector from the configuration.
///
/// # Parameters
/// * `config` - Configuration.
/// * `key` - Key to find the vector.
///
/// # Returns
/// The 3D vector.
///
/// # Errors
/// If the key does not exist or the array does not have three finite values.
pub fn get_config_vector3(config: &Config, key: &str) -> Result<Vector3<f64>, ModelError> {
    to_vector3(&get_config_array(config, key)?, key)
}

/// Convert the values to a 3D vector.
///
/// # Parameters
/// * `values` - Values.
/// * `name` - Name of the vector used in the error message.
///
/// # Returns
/// The 3D vector.
///
/// # Errors
/// If there are not exactly three values or any of them is not finite.
pub fn to_vector3(values: &[f64], name: &str) -> Result<Vector3<f64>, ModelError> {
    if values.len() != 3 {
        return Err(ModelError::InvalidInput(format!(
            "{name} should have 3 components instead of {}",
            values.len()
        )));
    }

    if values.iter().any(|x| !x.is_finite()) {
        return Err(ModelError::InvalidInput(format!(
            "{name} should be finite: {values:?}"
        )));
    }

    Ok(Vector3::from_column_slice(values))
}

/// Read the table file with a header. Each row is deserialized to a record.
///
/// # Parameters
/// * `filepath` - Path to the CSV file.
///
/// # Returns
/// Records of the table.
///
/// # Errors
/// If the file can not be opened or any row can not be deserialized.
pub fn read_file_table<T: DeserializeOwned>(filepath: &Path) -> Result<Vec<T>, ModelError> {
    let file = File::open(filepath)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut records = Vec::new();
    for result in reader.deserialize() {
        records.push(result?);
    }

    Ok(records)
}

/// Read the JSON file.
///
/// # Parameters
/// * `filepath` - Path to the JSON file.
///
/// # Returns
/// Deserialized content.
///
/// # Errors
/// If the file can not be opened or deserialized.
pub fn read_file_json<T: DeserializeOwned>(filepath: &Path) -> Result<T, ModelError> {
    let file = File::open(filepath)?;

    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Assert that two vectors are equal within a relative tolerance.
///
/// # Parameters
/// * `v1` - First vector.
/// * `v2` - Second vector.
/// * `epsilon` - Relative tolerance.
///
/// # Panics
/// If the two vectors are not equal within the relative tolerance.
pub fn assert_relative_eq_vector(v1: &[f64], v2: &[f64], epsilon: f64) {
    assert_eq!(v1.len(), v2.len());
    for (a, b) in v1.iter().zip(v2.iter()) {
        assert_relative_eq!(a, b, epsilon = epsilon);
    }
}
