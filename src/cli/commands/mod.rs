//! CLI command handlers for `MySchool`.
//!
//! Each command is implemented in its own submodule.

pub mod config;
pub mod report;
pub mod validate;

/// Usage diagnostic for a wrong number of input paths
pub const USAGE_HINT: &str = "Insufficient command line arguments.\n\
The correct format is <result_file> <course_file> <student_file>.";

/// Print a diagnostic and stop the process with a failure status
pub fn terminate(message: &str) -> ! {
    eprintln!("{message}");
    eprintln!("The program will be terminated.");
    std::process::exit(1);
}
