use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::config::Settings;
use crate::content::Content;
use crate::error::ParseError;
use crate::parser::parse_markdown;
use crate::tree::Courses;

/// Pages live exactly at `<content>/<course>/<chapter>/<page>.md`.
const PAGE_DEPTH: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct CrawlOptions {
    pub skip_broken: bool,
    /// Stop once this many files reported issues.
    pub max_errors: Option<usize>,
    pub progress: bool,
}

impl From<&Settings> for CrawlOptions {
    fn from(settings: &Settings) -> Self {
        CrawlOptions {
            skip_broken: settings.skip_broken,
            max_errors: settings.error_limit(),
            progress: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct Crawl {
    pub courses: Courses,
    pub processed: usize,
    pub skipped: usize,
    pub with_issues: usize,
}

struct Loaded {
    path: PathBuf,
    parsed: Result<Content, ParseError>,
}

/// Markdown files three levels below `content_root`, sorted by name.
pub fn find_files(content_root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(content_root)
        .min_depth(PAGE_DEPTH)
        .max_depth(PAGE_DEPTH)
        .sort_by_file_name()
    {
        let entry =
            entry.with_context(|| format!("walk content directory {}", content_root.display()))?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "md") {
            files.push(path.to_owned());
        }
    }

    debug!("Found {} markdown files", files.len());
    Ok(files)
}

/// Course, chapter and page names from the last three path components.
pub fn split_path(path: &Path) -> Option<(String, String, String)> {
    let mut parts = path
        .iter()
        .rev()
        .take(PAGE_DEPTH)
        .map(|part| part.to_string_lossy().into_owned());

    let page = parts.next()?;
    let chapter = parts.next()?;
    let course = parts.next()?;

    Some((course, chapter, page))
}

/// Find, parse and aggregate every page below `root/content_dir`, then prepare the tree.
pub fn run(root: &Path, settings: &Settings, progress: bool) -> Result<Crawl> {
    let content_root = root.join(&settings.content_dir);
    let files = find_files(&content_root)?;

    let options = CrawlOptions {
        progress,
        ..CrawlOptions::from(settings)
    };

    let mut crawl = crawl(&files, &options)?;
    crawl.courses.prepare();

    info!(
        processed = crawl.processed,
        skipped = crawl.skipped,
        with_issues = crawl.with_issues,
        "Processed markdown files"
    );

    Ok(crawl)
}

/// Parse `files` and add them to a fresh tree. Broken documents abort unless
/// `skip_broken` is set; aggregation stops once `max_errors` files had issues.
pub fn crawl(files: &[PathBuf], options: &CrawlOptions) -> Result<Crawl> {
    let pb = progress_bar(files.len(), options.progress)?;
    let loaded = load_all(files, &pb)?;
    pb.finish_and_clear();

    let limit = options.max_errors.unwrap_or(usize::MAX);
    let mut crawl = Crawl::default();

    for Loaded { path, parsed } in loaded {
        if crawl.with_issues >= limit {
            info!(limit, "Error limit reached, stopping");
            break;
        }

        let file_path = path.to_string_lossy().into_owned();
        let Some((course, chapter, page)) = split_path(&path) else {
            warn!(path = %file_path, "Skipping file outside the course layout");
            crawl.skipped += 1;
            continue;
        };

        let content = match parsed {
            Ok(content) => content,
            Err(err) if options.skip_broken => {
                warn!(path = %file_path, error = %err, "Skipping broken markdown file");
                crawl.skipped += 1;
                continue;
            }
            Err(err) => {
                return Err(err).with_context(|| format!("parse markdown file {file_path}"));
            }
        };

        if !content.issues(&file_path).is_empty() {
            crawl.with_issues += 1;
        }

        crawl.courses.add(&file_path, &course, &chapter, &page, content);
        crawl.processed += 1;
    }

    Ok(crawl)
}

fn progress_bar(len: usize, visible: bool) -> Result<ProgressBar> {
    if !visible {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
            .context("progress bar template")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

fn load(path: &Path) -> Result<Loaded> {
    let bytes = fs::read(path).with_context(|| format!("read markdown file {}", path.display()))?;
    let raw = String::from_utf8_lossy(&bytes);

    Ok(Loaded {
        path: path.to_owned(),
        parsed: parse_markdown(&raw),
    })
}

#[cfg(feature = "rayon")]
fn load_all(files: &[PathBuf], pb: &ProgressBar) -> Result<Vec<Loaded>> {
    files
        .par_iter()
        .map(|path| {
            let loaded = load(path);
            pb.inc(1);
            loaded
        })
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn load_all(files: &[PathBuf], pb: &ProgressBar) -> Result<Vec<Loaded>> {
    files
        .iter()
        .map(|path| {
            let loaded = load(path);
            pb.inc(1);
            loaded
        })
        .collect()
}
