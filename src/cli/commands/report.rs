//! Report command handler
//!
//! Loads the three input files, applies the enrolment checks, renders the
//! report once and emits it to the console and the append-only report file.

use super::{terminate, USAGE_HINT};
use crate::args::InputArgs;
use my_school::config::Config;
use my_school::core::{
    loader::{load_records, InputFiles},
    models::RecordDefaults,
    ranking::{apply_enrolment_checks, EnrolmentPolicy},
    report::{AppendFileSink, ConsoleSink, ReportContext, ReportGenerator, TeeSink, TextReporter},
    SchoolError,
};
use my_school::{error, info};
use std::path::PathBuf;

/// Run the report command, terminating the process on any failure
pub fn run(inputs: &InputArgs, no_save: bool, config: &Config) {
    let Some(files) = inputs.resolve(&config.paths.data_dir) else {
        terminate(USAGE_HINT);
    };
    let defaults = config
        .record_defaults()
        .unwrap_or_else(|msg| terminate(&msg));
    let report_file = (!no_save).then(|| PathBuf::from(&config.paths.report_file));

    if let Err(err) = generate_report(&files, &defaults, &config.enrolment_policy(), report_file) {
        error!("Report generation failed: {err}");
        terminate(&err.to_string());
    }
}

/// Load, check, render and emit one report
///
/// # Errors
/// Returns the first loading error, or an I/O error from a sink
pub fn generate_report(
    files: &InputFiles,
    defaults: &RecordDefaults,
    policy: &EnrolmentPolicy,
    report_file: Option<PathBuf>,
) -> Result<(), SchoolError> {
    let mut store = load_records(files, defaults)?;
    let marked = apply_enrolment_checks(&mut store, policy);
    if marked > 0 {
        info!("{marked} student(s) below their minimum enrolment");
    }

    let ctx = ReportContext::build(&store);
    let mut sink = TeeSink::new().with(ConsoleSink);
    if let Some(path) = &report_file {
        sink = sink.with(AppendFileSink::new(path.clone()));
    }

    TextReporter::new()
        .generate(&ctx, &mut sink)
        .map_err(|source| SchoolError::Io {
            path: report_file.clone().unwrap_or_else(|| PathBuf::from("<stdout>")),
            source,
        })?;

    if let Some(path) = report_file {
        info!("Report appended to: {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_inputs(dir: &TempDir, results: &str) -> InputFiles {
        fs::write(dir.path().join("results.txt"), results).unwrap();
        fs::write(dir.path().join("courses.txt"), "COSC111, C, Programming, 12\n").unwrap();
        fs::write(dir.path().join("students.txt"), "S001, Ann, UG\n").unwrap();
        InputFiles::in_dir(dir.path())
    }

    #[test]
    fn test_invalid_record_writes_no_report() {
        let dir = TempDir::new().unwrap();
        let files = write_inputs(&dir, "S001, COSC111, abc\n");
        let report_file = dir.path().join("reports.txt");

        let outcome = generate_report(
            &files,
            &RecordDefaults::default(),
            &EnrolmentPolicy::default(),
            Some(report_file.clone()),
        );

        assert!(matches!(outcome, Err(SchoolError::Record { line: 1, .. })));
        assert!(!report_file.exists());
    }

    #[test]
    fn test_missing_inputs_are_all_listed() {
        let dir = TempDir::new().unwrap();
        let report_file = dir.path().join("reports.txt");

        let outcome = generate_report(
            &InputFiles::in_dir(dir.path()),
            &RecordDefaults::default(),
            &EnrolmentPolicy::default(),
            Some(report_file.clone()),
        );

        let missing = match outcome {
            Err(SchoolError::MissingInputs(missing)) => missing,
            other => panic!("expected missing inputs, got {other:?}"),
        };
        assert_eq!(missing, vec!["'Results' file", "'Course' file", "'Student' file"]);
        assert!(!report_file.exists());
    }

    #[test]
    fn test_valid_inputs_append_to_report_file() {
        let dir = TempDir::new().unwrap();
        let files = write_inputs(&dir, "S001, COSC111, 72\n");
        let report_file = dir.path().join("out").join("reports.txt");

        generate_report(
            &files,
            &RecordDefaults::default(),
            &EnrolmentPolicy::default(),
            Some(report_file.clone()),
        )
        .unwrap();

        let saved = fs::read_to_string(&report_file).unwrap();
        assert!(saved.contains("This report was generated on: "));
        assert!(saved.contains("Pass Rate: 100.00%."));
    }
}
