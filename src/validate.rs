use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::content::{Audience, Badge, Body, Content, DefaultBody, Importance, MainVideo, State};
use crate::parser::body::{
    SECTION_CODE, SECTION_EXERCISES, SECTION_MAIN_VIDEO, SECTION_NOTES, SECTION_RELATED_ARTICLES,
    SECTION_RELATED_LESSONS, SECTION_RELATED_LINKS, SECTION_RELATED_VIDEOS, SECTION_SUMMARY,
    SECTION_TOPICS,
};
use crate::parser::sections::ROOT;

static DASHES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").unwrap());
static SLUG_REDUCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[:,/?! ]").unwrap());
static SLUG_REMOVE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[.'"/\\]"#).unwrap());

const UNSORTED_TAG: &str = "unsorted";

/// Canonical order of default page sections.
pub const DEFAULT_SECTION_ORDER: &[&str] = &[
    ROOT,
    SECTION_MAIN_VIDEO,
    SECTION_SUMMARY,
    SECTION_TOPICS,
    SECTION_CODE,
    SECTION_RELATED_LESSONS,
    SECTION_RELATED_VIDEOS,
    SECTION_RELATED_ARTICLES,
    SECTION_RELATED_LINKS,
    SECTION_EXERCISES,
    SECTION_NOTES,
];

/// URL slug derived from a title. `.` is stripped, `#` becomes `-sharp-`.
pub fn slugify(title: &str) -> String {
    let slug = title.to_lowercase().replace('#', "-sharp-");
    let slug = SLUG_REMOVE_RE.replace_all(&slug, "");
    let slug = SLUG_REDUCE_RE.replace_all(&slug, "-");
    let slug = DASHES_RE.replace_all(&slug, "-");

    slug.trim_matches('-').to_string()
}

/// Returns the first duplicate, out-of-place or unknown title, if any.
pub fn is_ordered_correctly<'a>(golden: &[&str], given: &'a [String]) -> Result<(), &'a str> {
    let mut found = HashSet::with_capacity(given.len());
    let mut last_index = None;

    for item in given {
        if !found.insert(item.as_str()) {
            return Err(item.as_str());
        }

        let Some(index) = golden.iter().position(|g| g == item) else {
            return Err(item.as_str());
        };

        if last_index.is_some_and(|last| index < last) {
            return Err(item.as_str());
        }
        last_index = Some(index);
    }

    Ok(())
}

impl DefaultBody {
    /// `declared` is the front matter text; anything but an exact state name mismatches.
    pub fn issues(&self, declared: &str) -> Vec<String> {
        let mut issues: Vec<String> = self
            .related_videos
            .iter()
            .flat_map(|video| video.issues.iter().cloned())
            .collect();

        let has_alternative = self.has_related_badge(Badge::Alternative);
        match self.main_video {
            MainVideo::ReallyMissing if self.useful_without_video => issues.push(
                "main video is NOT REALLY missing (Remove the useful-without-video tag?)".to_string(),
            ),
            MainVideo::ReallyMissing if has_alternative => issues
                .push("main video is NOT REALLY missing (an alternative video is linked)".to_string()),
            MainVideo::Missing if !has_alternative && !self.useful_without_video => issues.push(
                "main video is REALLY missing (Add a useful-without-video tag?)".to_string(),
            ),
            _ => {}
        }

        let calculated = self.calculate_state();
        if State::parse(declared) != calculated {
            issues.push(format!("state mismatch. got: {declared}, want: {calculated}"));
        }

        if let Err(item) = is_ordered_correctly(DEFAULT_SECTION_ORDER, &self.section_titles) {
            issues.push(format!(
                "sections are not in the correct order, first out of order: {item}"
            ));
        }

        if !self.is_project {
            if !self.has_summary {
                issues.push("summary section is missing".to_string());
            }
            if !self.has_topics {
                issues.push("topics section is missing".to_string());
            }
        }

        issues
    }
}

impl Body {
    pub fn issues(&self, declared: &str) -> Vec<String> {
        match self {
            Body::Default(body) => body.issues(declared),
            Body::Index(_) | Body::Practice(_) => Vec::new(),
        }
    }
}

impl Content {
    /// Every deviation between declared metadata and structure. Never short-circuits.
    pub fn issues(&self, file_path: &str) -> Vec<String> {
        let mut issues = self.body.issues(self.declared_state());

        if !self.body.is_index() {
            self.filename_issues(file_path, &mut issues);
        }

        if Audience::parse(&self.audience).is_none() {
            issues.push(format!("invalid audience: {}", self.audience));
        }

        self.importance_issues(&mut issues);
        self.tag_issues(&mut issues);

        issues
    }

    fn filename_issues(&self, file_path: &str, issues: &mut Vec<String>) {
        let filename = Path::new(file_path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        if !filename.starts_with(&self.weight) {
            issues.push("file name is not prefixed with the weight of the page".to_string());
        }

        if format!("{}-{}.md", self.weight, self.slug) != filename {
            issues.push("file name does not match the dash joined weight and slug".to_string());
        }

        let want = slugify(&self.title);
        if !self.body.is_slug_forced() && self.slug != want {
            issues.push(format!(
                "slug does not match the lowercase title with dashes (`{}`, `{}`)",
                self.slug, want
            ));
        }
    }

    fn importance_issues(&self, issues: &mut Vec<String>) {
        if Importance::level_of(&self.importance) < Importance::level_of(&self.outside_importance) {
            issues.push("importance is lower than outside importance".to_string());
        }

        let for_everyone = Audience::parse(&self.audience) == Some(Audience::All);
        if self.outside_importance.is_empty() && !for_everyone {
            issues.push("outside importance is invalid".to_string());
        }
        if for_everyone && !self.outside_importance.is_empty() {
            issues.push("audience is 'all', outside importance must be empty".to_string());
        }
    }

    fn tag_issues(&self, issues: &mut Vec<String>) {
        for tag in &self.tags {
            if tag == UNSORTED_TAG {
                issues.push(format!("tag is '{UNSORTED_TAG}'"));
            }
            if tag.to_lowercase() != *tag {
                issues.push(format!("tag is not lowercase: {tag}"));
            }
            if tag.contains(' ') {
                issues.push(format!("tag contains spaces: {tag}"));
            }
        }
    }
}
