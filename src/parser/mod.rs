pub mod body;
pub mod front_matter;
pub mod sections;
pub mod shortcodes;

use crate::content::{Content, State};
use crate::error::ParseError;

/// Shorter documents cannot hold both delimiters and are treated as empty.
const MIN_DOCUMENT_LEN: usize = front_matter::DELIMITER.len() * 2;

/// Three-pass pipeline: raw text → front matter + sections → body variant.
pub fn parse_markdown(raw: &str) -> Result<Content, ParseError> {
    if raw.len() < MIN_DOCUMENT_LEN {
        return Ok(Content::default());
    }

    let text = raw.replace("\r\n", "\n");
    let (header, body) = front_matter::split(&text)?;

    let sections = sections::extract_sections(body);
    let tags = header.values("tags");
    let raw_state = header.value_or_empty("state");
    tracing::debug!(sections = sections.len(), tags = tags.len(), "split document");

    Ok(Content {
        title: header.value_or_empty("title"),
        state: State::parse(&raw_state),
        raw_state,
        body: body::build_body(&sections, &tags),
        slug: header.value_or_empty("slug"),
        weight: header.value_or_empty("weight"),
        audience: header.value_or_empty("audience"),
        importance: header.value_or_empty("audienceImportance"),
        outside_importance: header.value_or_empty("outsideImportance"),
        tags,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Badge, Body, DefaultBody, IndexBody, MainVideo, PracticeBody, RelatedVideo};

    #[test]
    fn broken_front_matter_is_an_error() {
        assert_eq!(parse_markdown("+++\n???"), Err(ParseError::FrontMatterNotClosed));
    }

    #[test]
    fn unclosed_front_matter_on_full_document() {
        let raw = "+++\ntitle = \"Hello\"\nstate = \"complete\"\n\n## Summary\n\n- bar\n";
        assert_eq!(parse_markdown(raw), Err(ParseError::FrontMatterNotClosed));
    }

    #[test]
    fn empty_document() {
        let content = parse_markdown("").unwrap();
        assert_eq!(content, Content::default());
        assert_eq!(content.state, State::Unknown);
    }

    #[test]
    fn title_only() {
        let content = parse_markdown("+++\ntitle = \"Hello\"\n+++").unwrap();
        assert_eq!(content.title, "Hello");
        assert_eq!(content.state, State::Unknown);
        assert_eq!(
            content.body,
            Body::Default(DefaultBody {
                main_video: MainVideo::Problem,
                ..DefaultBody::default()
            })
        );
    }

    #[test]
    fn crlf_line_endings() {
        let content = parse_markdown("+++\r\ntitle = \"Hello\"\r\nstate = \"stub\"\r\n+++\r\n\r\n## Summary\r\n\r\n- a\r\n").unwrap();
        assert_eq!(content.title, "Hello");
        assert_eq!(content.state, State::Stub);
        let Body::Default(body) = content.body else {
            panic!("expected default body");
        };
        assert!(body.has_summary);
    }

    #[test]
    fn setext_chapter_index() {
        let raw = "+++\ntitle = \"Prepare\"\nstate = \"complete\"\n+++\nEpisodes\n--------\n\n- bar\n";
        let content = parse_markdown(raw).unwrap();
        assert_eq!(content.state, State::Complete);
        assert_eq!(
            content.body,
            Body::Index(IndexBody {
                has_episodes: true,
                complete_state: State::Incomplete,
            })
        );
    }

    #[test]
    fn empty_main_video_section_is_a_problem() {
        let raw = "+++\ntitle = \"Prepare\"\nstate = \"complete\"\n+++\nSummary\n-------\n\n- bar\n\nMain Video\n----------\n\nTopics\n------\n\n- bar\n\nRelated Videos\n--------------\n\n- bar\n\nRelated Links\n-------------\n\n- bar\n";
        let Body::Default(body) = parse_markdown(raw).unwrap().body else {
            panic!("expected default body");
        };
        assert_eq!(body.main_video, MainVideo::Problem);
        assert!(body.has_summary);
        assert!(body.has_topics);
        assert!(body.has_related_links);
        assert!(body.related_videos.is_empty());
        assert_eq!(
            body.section_titles,
            vec!["summary", "main video", "topics", "related videos", "related links"]
        );
    }

    #[test]
    fn real_page() {
        let raw = std::fs::read_to_string("tests/fixtures/text_editor.md").unwrap();
        let content = parse_markdown(&raw).unwrap();
        assert_eq!(content.title, "What Your Text Editor Says About You");
        assert_eq!(content.state, State::Complete);
        assert_eq!(content.weight, "60");
        assert_eq!(content.slug, "what-your-text-editor-says-about-you");
        assert_eq!(content.audience, "all");
        assert_eq!(content.importance, "irrelevant");
        assert_eq!(content.outside_importance, "");
        assert_eq!(content.tags, vec!["no-practice", "fun", "vim", "vscode", "goland", "jetbrains"]);

        let Body::Default(body) = content.body else {
            panic!("expected default body");
        };
        assert_eq!(body.main_video, MainVideo::Present);
        assert!(!body.has_summary);
        assert_eq!(
            body.related_videos,
            vec![RelatedVideo {
                badge: Some(Badge::Fun),
                minutes: 9,
                issues: Vec::new(),
                valid: true,
            }]
        );
    }

    #[test]
    fn practice_page() {
        let raw = std::fs::read_to_string("tests/fixtures/data_cleanup.md").unwrap();
        let content = parse_markdown(&raw).unwrap();
        assert_eq!(content.title, "Data Cleanup");
        assert_eq!(content.weight, "20");
        assert_eq!(
            content.body,
            Body::Practice(PracticeBody {
                has_description: true,
                has_recommended_challenges: true,
                has_additional_challenges: true,
            })
        );
        assert_eq!(content.body.calculate_state(), State::Complete);
    }
}
