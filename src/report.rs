use std::collections::HashSet;

use serde::Serialize;

use crate::content::State;
use crate::tree::{Chapter, Course, Courses, Page, Stats};

const TOTAL: &str = "Total";
const HEADERS: [&str; 7] = ["Course", "All", "Stub", "Incomplete", "Complete", "Errors", "Percent"];
const WIDTHS: [usize; 7] = [15, 5, 4, 10, 8, 6, 7];

/// Which pages `render` prints.
#[derive(Debug, Clone)]
pub struct ReportFilter {
    /// Empty means every state.
    pub states: HashSet<State>,
    pub index: bool,
    pub non_index: bool,
}

impl Default for ReportFilter {
    fn default() -> Self {
        ReportFilter {
            states: HashSet::new(),
            index: true,
            non_index: true,
        }
    }
}

impl ReportFilter {
    pub fn accepts(&self, page: &Page) -> bool {
        if page.is_index() && !self.index {
            return false;
        }
        if !page.is_index() && !self.non_index {
            return false;
        }
        self.states.is_empty() || self.states.contains(&page.state())
    }
}

/// Course, chapter and page lines with each page's issues indented below it.
pub fn render(courses: &mut Courses, filter: &ReportFilter) -> String {
    let mut out = String::new();
    for course in courses.iter_mut() {
        render_course(&mut out, course, filter);
    }
    out
}

fn render_course(out: &mut String, course: &mut Course, filter: &ReportFilter) {
    push_line(out, &course.title);
    for chapter in course.chapters.values_mut() {
        render_chapter(out, chapter, filter);
    }
}

fn render_chapter(out: &mut String, chapter: &mut Chapter, filter: &ReportFilter) {
    chapter.prepare();

    push_line(out, &format!("  {}", chapter.title));
    for page in chapter.pages.iter().filter(|page| filter.accepts(page)) {
        push_line(out, &format!("    {} - {}", page.file_path, page.state()));
        for issue in page.issues() {
            push_line(out, &format!("        - {issue}"));
        }
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsRow {
    pub title: String,
    #[serde(flatten)]
    pub stats: Stats,
    pub percent: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    pub courses: Vec<StatsRow>,
    pub total: StatsRow,
}

impl StatsReport {
    pub fn new(courses: &mut Courses) -> Self {
        let per_course = courses.stats();

        let mut total = Stats::default();
        for (_, stats) in &per_course {
            total += *stats;
        }

        let row = |title: String, stats: Stats| StatsRow {
            title,
            stats,
            percent: stats.percent_of(total.total),
        };

        StatsReport {
            courses: per_course
                .into_iter()
                .map(|(title, stats)| row(title, stats))
                .collect(),
            total: row(TOTAL.to_string(), total),
        }
    }

    /// Fixed-width table, one row per course followed by the total.
    pub fn table(&self) -> String {
        let mut out = String::new();

        push_row(&mut out, HEADERS.map(String::from));
        push_rule(&mut out);
        for row in &self.courses {
            push_row(&mut out, cells(row));
        }
        push_rule(&mut out);
        push_row(&mut out, cells(&self.total));

        out
    }
}

fn cells(row: &StatsRow) -> [String; 7] {
    [
        row.title.clone(),
        row.stats.total.to_string(),
        row.stats.stub.to_string(),
        row.stats.incomplete.to_string(),
        row.stats.complete.to_string(),
        row.stats.errors.to_string(),
        row.percent.to_string(),
    ]
}

fn push_row(out: &mut String, cells: [String; 7]) {
    let line = cells
        .iter()
        .zip(WIDTHS)
        .map(|(cell, width)| {
            let cell: String = cell.chars().take(width).collect();
            format!("{cell:<width$}")
        })
        .collect::<Vec<_>>()
        .join(" | ");
    push_line(out, &line);
}

fn push_rule(out: &mut String) {
    let line = WIDTHS
        .iter()
        .enumerate()
        .map(|(i, width)| {
            if i == 0 {
                "-".repeat(width + 1)
            } else {
                format!("+{}", "-".repeat(width + 2))
            }
        })
        .collect::<String>();
    push_line(out, &line);
}
