use std::ops::AddAssign;

use indexmap::IndexMap;
use itertools::Itertools;
use serde::Serialize;

use crate::content::{Body, Content, State};

/// One markdown document at its place in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub file_path: String,
    pub title: String,
    pub content: Content,
}

impl Page {
    /// Declared state, or the derived one for chapter index pages.
    pub fn state(&self) -> State {
        match &self.content.body {
            Body::Index(body) => body.calculate_state(),
            Body::Default(_) | Body::Practice(_) => self.content.state,
        }
    }

    pub fn is_index(&self) -> bool {
        self.content.body.is_index()
    }

    pub fn issues(&self) -> Vec<String> {
        self.content.issues(&self.file_path)
    }

    pub fn errors(&self) -> Vec<String> {
        self.issues()
            .into_iter()
            .map(|issue| format!("{} - {}", self.file_path, issue))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chapter {
    pub title: String,
    pub pages: Vec<Page>,
    /// Compute-once guard for `prepare`.
    prepared: bool,
}

impl Chapter {
    pub fn new(title: impl Into<String>) -> Self {
        Chapter {
            title: title.into(),
            ..Chapter::default()
        }
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Upgrade the chapter index to `Complete` when every other page is complete.
    /// Runs once; pages added afterwards do not re-trigger it.
    pub fn prepare(&mut self) {
        if self.prepared {
            return;
        }
        self.prepared = true;

        let mut index = None;
        let mut pages_exist = false;
        let mut incomplete = false;

        for (i, page) in self.pages.iter().enumerate() {
            if page.is_index() {
                if index.is_none() {
                    index = Some(i);
                } else {
                    tracing::warn!(
                        chapter = %self.title,
                        page = %page.file_path,
                        "more than one index page, ignoring"
                    );
                }
                continue;
            }

            pages_exist = true;
            if page.state() != State::Complete {
                incomplete = true;
            }
        }

        let Some(index) = index else {
            return;
        };
        if !pages_exist || incomplete {
            return;
        }

        if let Body::Index(body) = &mut self.pages[index].content.body {
            body.mark_complete();
            tracing::debug!(chapter = %self.title, "chapter index marked complete");
        }
    }

    pub fn errors(&self) -> Vec<String> {
        self.pages.iter().flat_map(Page::errors).collect()
    }

    pub fn stats(&mut self) -> Stats {
        self.prepare();

        let counts = self.pages.iter().map(Page::state).counts();
        let count = |state: State| counts.get(&state).copied().unwrap_or_default();

        Stats {
            total: self.pages.len(),
            stub: count(State::Stub),
            incomplete: count(State::Incomplete),
            complete: count(State::Complete),
            errors: self.pages.iter().filter(|page| !page.issues().is_empty()).count(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Course {
    pub title: String,
    pub chapters: IndexMap<String, Chapter>,
}

impl Course {
    pub fn new(title: impl Into<String>) -> Self {
        Course {
            title: title.into(),
            chapters: IndexMap::new(),
        }
    }

    pub fn prepare(&mut self) {
        self.chapters.values_mut().for_each(Chapter::prepare);
    }

    pub fn errors(&self) -> Vec<String> {
        self.chapters.values().flat_map(Chapter::errors).collect()
    }

    pub fn stats(&mut self) -> Stats {
        let mut stats = Stats::default();
        for chapter in self.chapters.values_mut() {
            stats += chapter.stats();
        }
        stats
    }
}

/// Courses in insertion order, keyed by title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Courses {
    courses: IndexMap<String, Course>,
}

impl Courses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find or create the course and chapter, then append the page.
    pub fn add(&mut self, file_path: &str, course: &str, chapter: &str, page: &str, content: Content) {
        let course = self
            .courses
            .entry(course.to_string())
            .or_insert_with(|| Course::new(course));
        let chapter = course
            .chapters
            .entry(chapter.to_string())
            .or_insert_with(|| Chapter::new(chapter));

        chapter.pages.push(Page {
            file_path: file_path.to_string(),
            title: page.to_string(),
            content,
        });
    }

    pub fn get(&self, title: &str) -> Option<&Course> {
        self.courses.get(title)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Course> {
        self.courses.values_mut()
    }

    pub fn page_count(&self) -> usize {
        self.iter()
            .flat_map(|course| course.chapters.values())
            .map(|chapter| chapter.pages.len())
            .sum()
    }

    pub fn prepare(&mut self) {
        self.courses.values_mut().for_each(Course::prepare);
    }

    pub fn errors(&self) -> Vec<String> {
        self.iter().flat_map(Course::errors).collect()
    }

    /// Per-course stats in insertion order.
    pub fn stats(&mut self) -> Vec<(String, Stats)> {
        self.courses
            .values_mut()
            .map(|course| (course.title.clone(), course.stats()))
            .collect()
    }
}

/// Page counts by state plus the number of pages with at least one issue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub stub: usize,
    pub incomplete: usize,
    pub complete: usize,
    pub errors: usize,
}

impl Stats {
    /// Share of `of` taken by this row, truncated to a whole percent.
    pub fn percent_of(&self, of: usize) -> usize {
        if of == 0 {
            return 0;
        }
        self.total * 100 / of
    }
}

impl AddAssign for Stats {
    fn add_assign(&mut self, other: Stats) {
        self.total += other.total;
        self.stub += other.stub;
        self.incomplete += other.incomplete;
        self.complete += other.complete;
        self.errors += other.errors;
    }
}
