use std::fmt;

use serde::Serialize;

/// Completion classification of a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    #[default]
    Unknown,
    Stub,
    Incomplete,
    Complete,
}

impl State {
    /// Anything outside the known vocabulary (including an empty value) is `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "stub" => State::Stub,
            "incomplete" => State::Incomplete,
            "complete" => State::Complete,
            _ => State::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            State::Unknown => "unknown",
            State::Stub => "stub",
            State::Incomplete => "incomplete",
            State::Complete => "complete",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Badge {
    Alternative,
    Extra,
    Fun,
    Hint,
    MustSee,
    Summary,
    Unchecked,
    /// Marks a related video that is linked rather than embedded.
    NoEmbed,
}

impl Badge {
    pub fn parse(raw: &str) -> Option<Self> {
        let badge = match raw {
            "alternative" => Badge::Alternative,
            "extra" => Badge::Extra,
            "fun" => Badge::Fun,
            "hint" => Badge::Hint,
            "must-see" => Badge::MustSee,
            "summary" => Badge::Summary,
            "unchecked" => Badge::Unchecked,
            "no-embed" => Badge::NoEmbed,
            _ => return None,
        };
        Some(badge)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Badge::Alternative => "alternative",
            Badge::Extra => "extra",
            Badge::Fun => "fun",
            Badge::Hint => "hint",
            Badge::MustSee => "must-see",
            Badge::Summary => "summary",
            Badge::Unchecked => "unchecked",
            Badge::NoEmbed => "no-embed",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    All,
    AllProfessionals,
    LinuxUsers,
    WindowsUsers,
    MacUsers,
    AllDevelopers,
    WebDevelopers,
    MobileDevelopers,
    DesktopDevelopers,
    GameDevelopers,
    SysAdmins,
}

impl Audience {
    pub fn parse(raw: &str) -> Option<Self> {
        let audience = match raw {
            "all" => Audience::All,
            "all professionals" => Audience::AllProfessionals,
            "Linux users" => Audience::LinuxUsers,
            "Windows users" => Audience::WindowsUsers,
            "Mac users" => Audience::MacUsers,
            "all developers" => Audience::AllDevelopers,
            "web developers" => Audience::WebDevelopers,
            "mobile developers" => Audience::MobileDevelopers,
            "desktop developers" => Audience::DesktopDevelopers,
            "game developers" => Audience::GameDevelopers,
            "sysadmins" => Audience::SysAdmins,
            _ => return None,
        };
        Some(audience)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Importance {
    Critical,
    Essential,
    Important,
    Relevant,
    Optional,
    Irrelevant,
}

impl Importance {
    pub fn parse(raw: &str) -> Option<Self> {
        let importance = match raw {
            "critical" => Importance::Critical,
            "essential" => Importance::Essential,
            "important" => Importance::Important,
            "relevant" => Importance::Relevant,
            "optional" => Importance::Optional,
            "irrelevant" => Importance::Irrelevant,
            _ => return None,
        };
        Some(importance)
    }

    pub fn level(self) -> i8 {
        match self {
            Importance::Critical => 5,
            Importance::Essential => 4,
            Importance::Important => 3,
            Importance::Relevant => 2,
            Importance::Optional => 1,
            Importance::Irrelevant => 0,
        }
    }

    /// Level of a raw front matter value; empty or unknown values rank below everything.
    pub fn level_of(raw: &str) -> i8 {
        Importance::parse(raw).map_or(-1, Importance::level)
    }
}

/// Classification of the "main video" section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MainVideo {
    Present,
    Missing,
    ReallyMissing,
    /// No marker, or more than one.
    #[default]
    Problem,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelatedVideo {
    pub badge: Option<Badge>,
    pub minutes: u32,
    pub issues: Vec<String>,
    pub valid: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DefaultBody {
    pub main_video: MainVideo,
    pub has_summary: bool,
    pub has_topics: bool,
    pub has_exercises: bool,
    pub has_related_links: bool,
    pub related_videos: Vec<RelatedVideo>,
    pub useful_without_video: bool,
    pub slug_forced: bool,
    pub is_project: bool,
    pub section_titles: Vec<String>,
}

impl DefaultBody {
    pub fn has_related_badge(&self, badge: Badge) -> bool {
        self.related_videos.iter().any(|video| video.badge == Some(badge))
    }

    pub fn calculate_state(&self) -> State {
        let has_video = self.main_video == MainVideo::Present;

        if has_video && self.has_summary && self.has_exercises {
            return State::Complete;
        }

        if has_video || self.has_related_badge(Badge::Alternative) || self.useful_without_video {
            return State::Incomplete;
        }

        State::Stub
    }
}

/// Body of a chapter's `_index.md`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexBody {
    pub has_episodes: bool,
    /// Starts `Incomplete`; only `Chapter::prepare` upgrades it.
    pub complete_state: State,
}

impl Default for IndexBody {
    fn default() -> Self {
        IndexBody {
            has_episodes: false,
            complete_state: State::Incomplete,
        }
    }
}

impl IndexBody {
    pub fn calculate_state(&self) -> State {
        if self.has_episodes {
            self.complete_state
        } else {
            State::Stub
        }
    }

    pub(crate) fn mark_complete(&mut self) {
        self.complete_state = State::Complete;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PracticeBody {
    pub has_description: bool,
    pub has_recommended_challenges: bool,
    pub has_additional_challenges: bool,
}

impl PracticeBody {
    pub fn calculate_state(&self) -> State {
        if !self.has_description {
            return State::Stub;
        }

        if self.has_recommended_challenges && self.has_additional_challenges {
            State::Complete
        } else {
            State::Incomplete
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Body {
    Default(DefaultBody),
    Index(IndexBody),
    Practice(PracticeBody),
}

impl Default for Body {
    fn default() -> Self {
        Body::Default(DefaultBody::default())
    }
}

impl Body {
    pub fn calculate_state(&self) -> State {
        match self {
            Body::Default(body) => body.calculate_state(),
            Body::Index(body) => body.calculate_state(),
            Body::Practice(body) => body.calculate_state(),
        }
    }

    pub fn is_index(&self) -> bool {
        matches!(self, Body::Index(_))
    }

    pub fn is_slug_forced(&self) -> bool {
        match self {
            Body::Default(body) => body.slug_forced,
            Body::Index(_) | Body::Practice(_) => false,
        }
    }
}

/// One parsed document: declared front matter plus the structural body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Content {
    pub title: String,
    pub state: State,
    /// `state` exactly as written in the front matter.
    pub raw_state: String,
    pub body: Body,
    pub slug: String,
    pub weight: String,
    pub audience: String,
    pub importance: String,
    pub outside_importance: String,
    pub tags: Vec<String>,
}

impl Content {
    /// Declared state as the author wrote it, falling back to the parsed name.
    pub fn declared_state(&self) -> &str {
        if self.raw_state.is_empty() {
            self.state.as_str()
        } else {
            &self.raw_state
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn present_body() -> DefaultBody {
        DefaultBody {
            main_video: MainVideo::Present,
            ..DefaultBody::default()
        }
    }

    #[test]
    fn default_body_complete_needs_video_summary_and_exercises() {
        let body = DefaultBody {
            has_summary: true,
            has_exercises: true,
            ..present_body()
        };
        assert_eq!(body.calculate_state(), State::Complete);

        let body = DefaultBody {
            has_summary: true,
            ..present_body()
        };
        assert_eq!(body.calculate_state(), State::Incomplete);
    }

    #[test]
    fn default_body_without_video_is_stub() {
        let body = DefaultBody {
            main_video: MainVideo::Missing,
            has_summary: true,
            has_exercises: true,
            ..DefaultBody::default()
        };
        assert_eq!(body.calculate_state(), State::Stub);
    }

    #[test]
    fn alternative_or_useful_without_video_is_incomplete() {
        let body = DefaultBody {
            main_video: MainVideo::Missing,
            related_videos: vec![RelatedVideo {
                badge: Some(Badge::Alternative),
                minutes: 4,
                issues: Vec::new(),
                valid: true,
            }],
            ..DefaultBody::default()
        };
        assert_eq!(body.calculate_state(), State::Incomplete);

        let body = DefaultBody {
            main_video: MainVideo::ReallyMissing,
            useful_without_video: true,
            ..DefaultBody::default()
        };
        assert_eq!(body.calculate_state(), State::Incomplete);
    }

    #[test]
    fn practice_body_states() {
        assert_eq!(PracticeBody::default().calculate_state(), State::Stub);

        let body = PracticeBody {
            has_description: true,
            has_recommended_challenges: true,
            ..PracticeBody::default()
        };
        assert_eq!(body.calculate_state(), State::Incomplete);

        let body = PracticeBody {
            has_additional_challenges: true,
            ..body
        };
        assert_eq!(body.calculate_state(), State::Complete);
    }

    #[test]
    fn index_body_reports_stored_state_only_with_episodes() {
        let mut body = IndexBody::default();
        assert_eq!(body.calculate_state(), State::Stub);

        body.has_episodes = true;
        assert_eq!(body.calculate_state(), State::Incomplete);

        body.mark_complete();
        assert_eq!(body.calculate_state(), State::Complete);
    }

    #[test]
    fn importance_levels() {
        assert_eq!(Importance::level_of("critical"), 5);
        assert_eq!(Importance::level_of("irrelevant"), 0);
        assert_eq!(Importance::level_of(""), -1);
        assert_eq!(Importance::level_of("whatever"), -1);
    }

    #[test]
    fn state_parse_falls_back_to_unknown() {
        assert_eq!(State::parse("complete"), State::Complete);
        assert_eq!(State::parse(""), State::Unknown);
        assert_eq!(State::parse("draft"), State::Unknown);
        assert_eq!(State::Incomplete.to_string(), "incomplete");
    }
}
