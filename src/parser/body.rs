use crate::content::{Body, DefaultBody, IndexBody, PracticeBody};

use super::sections::Sections;
use super::shortcodes::{extract_main_video, extract_related_videos};

pub const SECTION_MAIN_VIDEO: &str = "main video";
pub const SECTION_SUMMARY: &str = "summary";
pub const SECTION_TOPICS: &str = "topics";
pub const SECTION_CODE: &str = "code";
pub const SECTION_RELATED_LESSONS: &str = "related lessons";
pub const SECTION_RELATED_VIDEOS: &str = "related videos";
pub const SECTION_RELATED_ARTICLES: &str = "related articles";
pub const SECTION_RELATED_LINKS: &str = "related links";
pub const SECTION_EXERCISES: &str = "exercises";
pub const SECTION_NOTES: &str = "notes";

pub const SECTION_EPISODES: &str = "episodes";

pub const SECTION_DESCRIPTION: &str = "description";
pub const SECTION_RECOMMENDED_CHALLENGES: &str = "recommended challenges";
pub const SECTION_ADDITIONAL_CHALLENGES: &str = "additional challenges";

pub const TAG_USEFUL_WITHOUT_VIDEO: &str = "useful-without-video";
pub const TAG_SLUG_FORCED: &str = "slug-forced";
pub const TAG_NO_EXERCISE: &str = "no-exercise";
pub const TAG_PROJECTS: &str = "projects";

/// Episodes wins over description; everything else is a default page.
pub fn build_body(sections: &Sections, tags: &[String]) -> Body {
    if sections.has_non_empty(SECTION_EPISODES) {
        Body::Index(index_body(sections))
    } else if sections.has_non_empty(SECTION_DESCRIPTION) {
        Body::Practice(practice_body(sections))
    } else {
        Body::Default(default_body(sections, tags))
    }
}

fn default_body(sections: &Sections, tags: &[String]) -> DefaultBody {
    let has_tag = |tag: &str| tags.iter().any(|t| t == tag);

    DefaultBody {
        main_video: extract_main_video(sections.content(SECTION_MAIN_VIDEO)),
        has_summary: sections.has_non_empty(SECTION_SUMMARY),
        has_topics: sections.has_non_empty(SECTION_TOPICS),
        has_exercises: sections.has_non_empty(SECTION_EXERCISES) || has_tag(TAG_NO_EXERCISE),
        has_related_links: sections.has_non_empty(SECTION_RELATED_LINKS),
        related_videos: extract_related_videos(sections.content(SECTION_RELATED_VIDEOS)),
        useful_without_video: has_tag(TAG_USEFUL_WITHOUT_VIDEO),
        slug_forced: has_tag(TAG_SLUG_FORCED),
        is_project: has_tag(TAG_PROJECTS),
        section_titles: sections.titles(),
    }
}

fn index_body(sections: &Sections) -> IndexBody {
    IndexBody {
        has_episodes: sections.has_non_empty(SECTION_EPISODES),
        ..IndexBody::default()
    }
}

fn practice_body(sections: &Sections) -> PracticeBody {
    PracticeBody {
        has_description: sections.has_non_empty(SECTION_DESCRIPTION),
        has_recommended_challenges: sections.has_non_empty(SECTION_RECOMMENDED_CHALLENGES),
        has_additional_challenges: sections.has_non_empty(SECTION_ADDITIONAL_CHALLENGES),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{MainVideo, State};
    use crate::parser::sections::extract_sections;

    fn tags(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn episodes_win_over_description() {
        let sections = extract_sections("## Description\n\nfoo\n\n## Episodes\n\n- bar\n");
        assert!(matches!(build_body(&sections, &[]), Body::Index(IndexBody { has_episodes: true, .. })));
    }

    #[test]
    fn empty_episodes_do_not_select_index() {
        let sections = extract_sections("## Episodes\n\n## Description\n\nfoo\n");
        assert!(matches!(build_body(&sections, &[]), Body::Practice(_)));
    }

    #[test]
    fn practice_body_fields() {
        let sections = extract_sections(
            "Description\n-----------\n\nfoo\n\nRecommended challenges\n----------------------\n\n### One\n",
        );
        let Body::Practice(body) = build_body(&sections, &[]) else {
            panic!("expected practice body");
        };
        assert!(body.has_description);
        assert!(body.has_recommended_challenges);
        assert!(!body.has_additional_challenges);
        assert_eq!(body.calculate_state(), State::Incomplete);
    }

    #[test]
    fn no_exercise_tag_forces_exercises() {
        let sections = extract_sections("## Main Video\n\n{{< youtube abc >}}\n\n## Summary\n\n- a\n");
        let Body::Default(body) = build_body(&sections, &tags(&["no-exercise"])) else {
            panic!("expected default body");
        };
        assert!(body.has_exercises);
        assert_eq!(body.main_video, MainVideo::Present);
        assert_eq!(body.calculate_state(), State::Complete);
    }

    #[test]
    fn tag_side_inputs() {
        let sections = extract_sections("## Main Video\n\n{{< main-missing >}}\n");
        let Body::Default(body) =
            build_body(&sections, &tags(&["useful-without-video", "slug-forced", "projects"]))
        else {
            panic!("expected default body");
        };
        assert!(body.useful_without_video);
        assert!(body.slug_forced);
        assert!(body.is_project);
        assert!(!body.has_exercises);
        assert_eq!(body.section_titles, vec!["main video"]);
    }
}
