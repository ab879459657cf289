//! Validate command handler

use super::{terminate, USAGE_HINT};
use crate::args::InputArgs;
use my_school::config::Config;
use my_school::core::loader::load_records;
use my_school::error;

/// Load the input files and print record counts without rendering a report
pub fn run(inputs: &InputArgs, config: &Config) {
    let Some(files) = inputs.resolve(&config.paths.data_dir) else {
        terminate(USAGE_HINT);
    };
    let defaults = config
        .record_defaults()
        .unwrap_or_else(|msg| terminate(&msg));

    match load_records(&files, &defaults) {
        Ok(store) => {
            let dangling = store.dangling_references().len();
            println!(
                "✓ {} result(s), {} course(s), {} student(s) are valid",
                store.results().len(),
                store.total_courses(),
                store.total_students()
            );
            if dangling > 0 {
                println!("  {dangling} result(s) reference unknown students or courses");
            }
        }
        Err(err) => {
            error!("Validation failed: {err}");
            terminate(&err.to_string());
        }
    }
}
