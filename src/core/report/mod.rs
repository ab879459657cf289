//! Report generation
//!
//! A report is rendered once from a [`ReportContext`] and then handed to one
//! or more [`ReportSink`]s (console, append-only report file, or both).

pub mod sink;
pub mod text;

use crate::core::metrics;
use crate::core::models::{CategoryCode, LevelCode, RecordStore};
use crate::core::ranking::{self, RankedCourse, RankedStudent};
use std::io;

pub use sink::{AppendFileSink, ConsoleSink, ReportSink, TeeSink};
pub use text::TextReporter;

/// Everything a report shows, computed from one record store
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Records in input order
    pub store: &'a RecordStore,
    /// Core courses, ranked by average
    pub core_courses: Vec<RankedCourse<'a>>,
    /// Elective courses, ranked by average
    pub elective_courses: Vec<RankedCourse<'a>>,
    /// Undergraduates, ranked by weighted GPA
    pub undergraduates: Vec<RankedStudent<'a>>,
    /// Postgraduates, ranked by weighted GPA
    pub postgraduates: Vec<RankedStudent<'a>>,
    /// Percentage of graded results that pass
    pub pass_rate: Option<f64>,
}

impl<'a> ReportContext<'a> {
    /// Compute every ranking and summary figure for `store`
    #[must_use]
    pub fn build(store: &'a RecordStore) -> Self {
        Self {
            store,
            core_courses: ranking::rank_courses(store, CategoryCode::Core),
            elective_courses: ranking::rank_courses(store, CategoryCode::Elective),
            undergraduates: ranking::rank_students(store, LevelCode::Undergraduate),
            postgraduates: ranking::rank_students(store, LevelCode::Postgraduate),
            pass_rate: metrics::pass_rate(store.results()),
        }
    }

    /// Number of students loaded
    #[must_use]
    pub fn total_students(&self) -> usize {
        self.store.total_students()
    }

    /// Number of courses loaded
    #[must_use]
    pub fn total_courses(&self) -> usize {
        self.store.total_courses()
    }

    /// Core course(s) with the lowest average
    #[must_use]
    pub fn hardest_core(&self) -> Vec<RankedCourse<'a>> {
        ranking::hardest_courses(&self.core_courses)
    }

    /// Elective course(s) with the lowest average
    #[must_use]
    pub fn hardest_elective(&self) -> Vec<RankedCourse<'a>> {
        ranking::hardest_courses(&self.elective_courses)
    }

    /// Undergraduate(s) with the highest 4-point GPA
    #[must_use]
    pub fn best_undergraduates(&self) -> Vec<RankedStudent<'a>> {
        ranking::best_students(&self.undergraduates)
    }

    /// Postgraduate(s) with the highest 4-point GPA
    #[must_use]
    pub fn best_postgraduates(&self) -> Vec<RankedStudent<'a>> {
        ranking::best_students(&self.postgraduates)
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render the full report text
    fn render(&self, ctx: &ReportContext) -> String;

    /// Render once and emit the same text to `sink`
    ///
    /// # Errors
    /// Returns an error if the sink cannot be written
    fn generate(&self, ctx: &ReportContext, sink: &mut dyn ReportSink) -> io::Result<()> {
        sink.emit(&self.render(ctx))
    }
}
