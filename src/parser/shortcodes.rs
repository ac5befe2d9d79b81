use std::sync::LazyLock;

use regex::Regex;

use crate::content::{Badge, MainVideo, RelatedVideo};

static MISSING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{<\s*main-missing\s*>\}\}").unwrap());
static REALLY_MISSING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{<\s*main-really-missing\s*>\}\}").unwrap());
static YOUTUBE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{<\s*youtube(-button)?\s+([^>]*)\s*>\}\}").unwrap());
static TIME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{<\s*time\s+(\d+)\s*>\}\}").unwrap());
static BADGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{<\s*badge-(\S*?)\s*>\}\}").unwrap());
static SUB_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#{3,5} ").unwrap());

/// Exactly one marker across all three families decides; anything else is `Problem`.
pub fn extract_main_video(content: &str) -> MainVideo {
    let missing = MISSING_RE.find_iter(content).count();
    let really_missing = REALLY_MISSING_RE.find_iter(content).count();
    let embedded = YOUTUBE_RE.find_iter(content).count();

    match (missing, really_missing, embedded) {
        (1, 0, 0) => MainVideo::Missing,
        (0, 1, 0) => MainVideo::ReallyMissing,
        (0, 0, 1) => MainVideo::Present,
        _ => MainVideo::Problem,
    }
}

/// Parse the "related videos" section, one entry per sub-header chunk.
/// Chunks without any video evidence are dropped.
pub fn extract_related_videos(content: &str) -> Vec<RelatedVideo> {
    if content.trim().is_empty() {
        return Vec::new();
    }

    split_sub_headers(content)
        .iter()
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| extract_related_video(chunk))
        .filter(|video| video.valid)
        .collect()
}

fn split_sub_headers(content: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = Vec::new();

    for line in content.lines() {
        if SUB_HEADER_RE.is_match(line) {
            chunks.push(current.join("\n"));
            current.clear();
            continue;
        }
        current.push(line);
    }
    chunks.push(current.join("\n"));

    chunks
}

fn extract_related_video(chunk: &str) -> RelatedVideo {
    let mut issues = Vec::new();

    let minutes = extract_time(chunk, &mut issues);
    let (badge, no_embed) = extract_badges(chunk, &mut issues);
    let embeds = extract_youtube(chunk, no_embed, &mut issues);

    if embeds == 0 && !no_embed && badge.is_none() && minutes == 0 {
        return RelatedVideo::default();
    }

    if minutes > 0 && badge.is_some() {
        let badge_at = BADGE_RE.find(chunk).map(|m| m.start());
        let time_at = TIME_RE.find(chunk).map(|m| m.start());
        if let (Some(badge_at), Some(time_at)) = (badge_at, time_at) {
            if badge_at < time_at {
                issues.push("badge should be placed after time".to_string());
            }
        }
    }

    RelatedVideo {
        badge,
        minutes,
        issues,
        valid: true,
    }
}

fn extract_time(chunk: &str, issues: &mut Vec<String>) -> u32 {
    let values: Vec<&str> = TIME_RE
        .captures_iter(chunk)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();

    let Some(first) = values.first() else {
        issues.push("missing time shortcode".to_string());
        return 0;
    };

    let minutes = first.parse::<u32>().unwrap_or_else(|_| {
        issues.push(format!("failed to parse duration: {first}"));
        0
    });

    if values.len() > 1 {
        issues.push("multiple time shortcodes found".to_string());
    }

    minutes
}

/// First valid badge plus whether `no-embed` was present.
fn extract_badges(chunk: &str, issues: &mut Vec<String>) -> (Option<Badge>, bool) {
    let mut badges = Vec::new();
    let mut no_embed = false;

    for caps in BADGE_RE.captures_iter(chunk) {
        let name = &caps[1];
        match Badge::parse(name) {
            Some(Badge::NoEmbed) => no_embed = true,
            Some(badge) => badges.push(badge),
            None => issues.push(format!("Unknown badge: '{name}'")),
        }
    }

    let Some((first, rest)) = badges.split_first() else {
        issues.push("missing badge shortcode".to_string());
        return (None, no_embed);
    };

    for badge in rest {
        issues.push(format!("unexpected badge shortcode found: {badge}"));
    }

    (Some(*first), no_embed)
}

fn extract_youtube(chunk: &str, no_embed: bool, issues: &mut Vec<String>) -> usize {
    let count = YOUTUBE_RE.find_iter(chunk).count();

    match count {
        0 if !no_embed => issues.push("missing youtube shortcode".to_string()),
        0 => {}
        1 if no_embed => {
            issues.push("unexpected youtube shortcode together with no-embed badge".to_string())
        }
        1 => {}
        _ => issues.push("multiple youtube shortcodes found".to_string()),
    }

    count
}
