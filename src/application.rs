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
use std::path::{Path, PathBuf};

use crate::config::{Config, PopulationParameters};
use crate::error::ModelError;
use crate::model::{ArmResult, Model};
use crate::posture::{Bilateral, Posture};
use crate::utility::get_parameter;

/// Run the application.
///
/// # Arguments
/// * `filepath_scenario` - Scenario file. If None, the scenario in the
/// application parameters is used.
/// * `percent_capable` - Percentage of the population that should be capable
/// of the strength. If the value is 0, it is read from the population file.
/// * `filepath_population` - Population file. If None, the population in the
/// application parameters is used.
/// * `is_json` - Print the result as JSON or not.
///
/// # Errors
/// If any file can not be read or the evaluation fails.
pub fn run(
    filepath_scenario: Option<&Path>,
    percent_capable: f64,
    filepath_population: Option<&Path>,
    is_json: bool,
) -> Result<(), ModelError> {
    let config_file = Path::new("config/parameters_app.yaml");
    let config = Config::new(config_file, filepath_population)?;

    // Decide the percent capable and scenario
    let final_percent_capable = get_final_percent_capable(&config.population, percent_capable);
    let final_filepath_scenario = match filepath_scenario {
        Some(filepath) => filepath.to_path_buf(),
        None => PathBuf::from(get_parameter::<String>(config_file, "scenario")?),
    };

    info!(
        "Evaluate the scenario {:?} for {final_percent_capable}% capable.",
        final_filepath_scenario
    );
    let posture = Posture::from_file(&final_filepath_scenario)?;

    let model = Model::new(config);
    let results = model.evaluate(&posture, final_percent_capable)?;

    if is_json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print!("{}", format_report(&results, final_percent_capable));
    }

    info!("Evaluation is done.");

    Ok(())
}

/// Get the final percent capable.
///
/// # Arguments
/// * `population` - Population parameters.
/// * `percent_capable` - Percent capable. If the value is 0, the value of the
/// population is used.
///
/// # Returns
/// Final percent capable.
fn get_final_percent_capable(population: &PopulationParameters, percent_capable: f64) -> f64 {
    if percent_capable == 0.0 {
        population.percent_capable
    } else {
        percent_capable
    }
}

/// Format the report of both arms.
///
/// # Arguments
/// * `results` - Results of the left and right arms.
/// * `percent_capable` - Percent capable used in the evaluation.
///
/// # Returns
/// Report as a table.
pub fn format_report(results: &Bilateral<ArmResult>, percent_capable: f64) -> String {
    let rows: [(&str, fn(&ArmResult) -> f64); 9] = [
        ("Raw strength (N)", |result| result.raw_strength),
        ("Bound minimum (N)", |result| result.bound.min),
        ("Bound maximum (N)", |result| result.bound.max),
        ("Bounded strength (N)", |result| result.bounded_strength),
        ("Standard deviation (N)", |result| result.standard_deviation),
        ("Gravity force effect (N)", |result| {
            result
                .mechanics
                .gravity_moment
                .gravity_force_effect_resultant()
        }),
        ("Gravity assist (N)", |result| result.gravity_assist),
        ("Strength with gravity (N)", |result| {
            result.gravity_adjusted_strength_at_percentile
        }),
        ("Percent capable of load (%)", |result| {
            result.percent_capable_of_actual_load
        }),
    ];

    let mut lines = vec![
        format!("Maximum arm strength for {percent_capable}% capable"),
        format!("{:<30}{:>10}{:>10}", "", "left", "right"),
    ];
    lines.extend(rows.iter().map(|(name, value)| {
        format!(
            "{:<30}{:>10.2}{:>10.2}",
            name,
            value(&results.left),
            value(&results.right)
        )
    }));

    let code = |result: &ArmResult| {
        format!(
            "{},{},{},{}",
            result.bound_code.height,
            result.bound_code.anterior_posterior,
            result.bound_code.superior_inferior,
            result.bound_code.medial_lateral
        )
    };
    lines.push(format!(
        "{:<30}{:>10}{:>10}",
        "Bound code",
        code(&results.left),
        code(&results.right)
    ));

    lines.iter().map(|line| format!("{line}\n")).collect()
}
