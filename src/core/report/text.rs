//! Plain-text report with fixed-width tables

use crate::core::models::RecordStore;
use crate::core::ranking::{RankedCourse, RankedStudent};
use crate::core::report::{ReportContext, ReportGenerator};
use std::fmt::Write;

/// Embedded report layout; `{{name}}` marks a generated section
const TEXT_TEMPLATE: &str = include_str!("templates/report.txt");

/// Placeholder for a value that cannot be computed yet
pub const MISSING: &str = "--";

const GAP: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
struct Column {
    header: &'static str,
    width: usize,
    align: Align,
}

const fn col(header: &'static str, width: usize, align: Align) -> Column {
    Column {
        header,
        width,
        align,
    }
}

const COURSE_COLUMNS: [Column; 8] = [
    col("CourseID", 10, Align::Left),
    col("Name", 20, Align::Left),
    col("Type", 4, Align::Right),
    col("Credit", 8, Align::Right),
    col("Semester", 8, Align::Right),
    col("Average", 8, Align::Right),
    col("Nfinish", 8, Align::Right),
    col("Nongoing", 8, Align::Right),
];

const STUDENT_COLUMNS: [Column; 9] = [
    col("StudentID", 10, Align::Left),
    col("Name", 20, Align::Left),
    col("Type", 4, Align::Right),
    col("Mode", 4, Align::Right),
    col("GPA(100)", 8, Align::Right),
    col("GPA(4)", 6, Align::Right),
    col("WGPA(4)", 7, Align::Right),
    col("Nfinish", 8, Align::Right),
    col("Nongoing", 8, Align::Right),
];

/// Width of the grid's leading id column and of each grade cell
const GRID_ID_WIDTH: usize = 10;
const GRID_CELL_WIDTH: usize = 8;

fn pad(value: &str, width: usize, align: Align) -> String {
    match align {
        Align::Left => format!("{value:<width$}"),
        Align::Right => format!("{value:>width$}"),
    }
}

fn rule_width(columns: &[Column]) -> usize {
    columns.iter().map(|c| c.width).sum::<usize>() + GAP.len() * columns.len().saturating_sub(1)
}

fn render_row(columns: &[Column], cells: &[String]) -> String {
    let row: Vec<String> = columns
        .iter()
        .zip(cells)
        .map(|(column, cell)| pad(cell, column.width, column.align))
        .collect();
    row.join(GAP).trim_end().to_string()
}

fn render_table(columns: &[Column], rows: &[Vec<String>]) -> String {
    let rule = "-".repeat(rule_width(columns));
    let headers: Vec<String> = columns.iter().map(|c| c.header.to_string()).collect();

    let mut table = String::new();
    let _ = writeln!(table, "{rule}");
    let _ = writeln!(table, "{}", render_row(columns, &headers));
    let _ = writeln!(table, "{rule}");
    for row in rows {
        let _ = writeln!(table, "{}", render_row(columns, row));
    }
    table
}

fn two_places(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{v:.2}"))
}

/// Fill every `{{key}}` in `template` in a single pass; unknown keys are kept verbatim
fn fill_template(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            output.push_str(&rest[start..]);
            return output;
        };
        let key = &after[..end];
        match lookup(key) {
            Some(value) => output.push_str(&value),
            None => {
                output.push_str("{{");
                output.push_str(key);
                output.push_str("}}");
            }
        }
        rest = &after[end + 2..];
    }
    output.push_str(rest);
    output
}

/// Fixed-width text reporter
#[derive(Debug, Default, Clone, Copy)]
pub struct TextReporter;

impl TextReporter {
    /// Create a text reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Students by courses, in input order; `--` for ongoing, blank for no enrolment
    fn results_grid(store: &RecordStore) -> String {
        let width = GRID_ID_WIDTH + (GAP.len() + GRID_CELL_WIDTH) * store.total_courses();
        let rule = "-".repeat(width);

        let mut grid = String::new();
        let _ = writeln!(grid, "{rule}");
        let mut header = format!("{:<GRID_ID_WIDTH$}", "Student ID");
        for course in store.courses() {
            let _ = write!(header, "{GAP}{:>GRID_CELL_WIDTH$}", course.id().as_str());
        }
        let _ = writeln!(grid, "{}", header.trim_end());
        let _ = writeln!(grid, "{rule}");

        for student in store.students() {
            let mut row = format!("{:<GRID_ID_WIDTH$}", student.id().as_str());
            for course in store.courses() {
                let cell = store
                    .find_result(student.id(), course.id())
                    .map_or_else(String::new, |result| {
                        result
                            .grade()
                            .map_or_else(|| MISSING.to_string(), |grade| grade.to_string())
                    });
                let _ = write!(row, "{GAP}{cell:>GRID_CELL_WIDTH$}");
            }
            let _ = writeln!(grid, "{}", row.trim_end());
        }
        grid
    }

    fn results_summary(ctx: &ReportContext) -> String {
        let pass_rate = ctx
            .pass_rate
            .map_or_else(|| "N/A".to_string(), |rate| format!("{rate:.2}%"));
        format!(
            "Total Students: {}. Total Courses: {}.\nPass Rate: {pass_rate}.\n",
            ctx.total_students(),
            ctx.total_courses()
        )
    }

    fn course_table(ranked: &[RankedCourse]) -> String {
        let rows: Vec<Vec<String>> = ranked
            .iter()
            .map(|r| {
                vec![
                    r.course.id().to_string(),
                    r.course.name().to_string(),
                    r.course.category().code().to_string(),
                    r.course.credit_points().to_string(),
                    r.course.semester().to_string(),
                    two_places(r.summary.average),
                    r.summary.finished.to_string(),
                    r.summary.ongoing.to_string(),
                ]
            })
            .collect();
        render_table(&COURSE_COLUMNS, &rows)
    }

    fn student_table(ranked: &[RankedStudent]) -> String {
        let rows: Vec<Vec<String>> = ranked
            .iter()
            .map(|r| {
                let level = r.student.level();
                vec![
                    r.student.id().to_string(),
                    r.student.name().to_string(),
                    level.code().to_string(),
                    level.mode().code().to_string(),
                    two_places(r.metrics.gpa_100),
                    format!("{:.2}", r.metrics.gpa_4),
                    two_places(r.metrics.weighted_gpa),
                    r.metrics.enrolment.finished.to_string(),
                    r.metrics.enrolment.ongoing.to_string(),
                ]
            })
            .collect();
        render_table(&STUDENT_COLUMNS, &rows)
    }

    fn hardest_block(title: &str, hardest: &[RankedCourse]) -> String {
        let mut block = format!("Hardest {title} Course(s):\n");
        if hardest.is_empty() {
            block.push_str("None\n");
        }
        for r in hardest {
            let _ = writeln!(
                block,
                "{} ({}), Average score: {}.",
                r.course.id(),
                r.course.name(),
                two_places(r.summary.average)
            );
        }
        block
    }

    fn best_block(title: &str, best: &[RankedStudent]) -> String {
        let mut block = format!("Best {title} Student(s):\n");
        if best.is_empty() {
            block.push_str("None\n");
        }
        for r in best {
            let _ = writeln!(
                block,
                "{} ({}), GPA: {:.2}.",
                r.student.id(),
                r.student.name(),
                r.metrics.gpa_4
            );
        }
        block
    }

    fn section(ctx: &ReportContext, key: &str) -> Option<String> {
        let text = match key {
            "results_grid" => Self::results_grid(ctx.store),
            "results_summary" => Self::results_summary(ctx),
            "core_courses" => Self::course_table(&ctx.core_courses),
            "elective_courses" => Self::course_table(&ctx.elective_courses),
            "course_summary" => format!(
                "{}\n{}",
                Self::hardest_block("Core", &ctx.hardest_core()),
                Self::hardest_block("Elective", &ctx.hardest_elective())
            ),
            "undergraduate_students" => Self::student_table(&ctx.undergraduates),
            "postgraduate_students" => Self::student_table(&ctx.postgraduates),
            "student_summary" => format!(
                "{}\n{}",
                Self::best_block("UG", &ctx.best_undergraduates()),
                Self::best_block("PG", &ctx.best_postgraduates())
            ),
            _ => return None,
        };
        Some(text)
    }
}

impl ReportGenerator for TextReporter {
    fn render(&self, ctx: &ReportContext) -> String {
        fill_template(TEXT_TEMPLATE, |key| Self::section(ctx, key))
    }
}
