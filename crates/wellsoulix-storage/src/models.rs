use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Conversational persona - selects tone, visuals, playlist and a transcript partition
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Mode {
    #[default]
    Comfort,
    Cheer,
    Calm,
    StudyBuddy,
    CareerCoach,
    Spirit,
    AiMentor,
}

impl Mode {
    /// All modes in sidebar order
    pub const ALL: [Self; 7] = [
        Self::Comfort,
        Self::Cheer,
        Self::Calm,
        Self::StudyBuddy,
        Self::CareerCoach,
        Self::Spirit,
        Self::AiMentor,
    ];

    /// Human-readable name, also used inside prompts and welcome messages
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Comfort => "Comfort",
            Self::Cheer => "Cheer",
            Self::Calm => "Calm",
            Self::StudyBuddy => "Study Buddy",
            Self::CareerCoach => "Career Coach",
            Self::Spirit => "Spirit",
            Self::AiMentor => "AI Mentor",
        }
    }

    /// Lowercased display name, used as track id prefix
    #[must_use]
    pub fn slug(self) -> String {
        self.display_name().to_lowercase()
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();

        match normalized.as_str() {
            "comfort" => Ok(Self::Comfort),
            "cheer" => Ok(Self::Cheer),
            "calm" => Ok(Self::Calm),
            "studybuddy" => Ok(Self::StudyBuddy),
            "careercoach" => Ok(Self::CareerCoach),
            "spirit" => Ok(Self::Spirit),
            "aimentor" => Ok(Self::AiMentor),
            _ => Err(format!(
                "Unknown mode: {s}. Use: comfort, cheer, calm, study-buddy, career-coach, spirit, ai-mentor"
            )),
        }
    }
}

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

/// Content attached to an outgoing user message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Attachment {
    /// Base64 image, usually a full `data:<mime>;base64,` URI
    Image { data: String, mime_type: String },
    Link { url: String },
    /// Either a raw filename or a `[File: ..] Content Snippet: ..` text excerpt
    Doc {
        data: String,
        mime_type: Option<String>,
    },
}

impl Attachment {
    /// Short tag used when the attachment is flattened into prompt text
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Image { .. } => "image",
            Self::Link { .. } => "link",
            Self::Doc { .. } => "doc",
        }
    }

    /// Raw payload (base64 data, url or doc text)
    #[must_use]
    pub fn data(&self) -> &str {
        match self {
            Self::Image { data, .. } | Self::Doc { data, .. } => data,
            Self::Link { url } => url,
        }
    }

    /// Label shown next to a pending or sent attachment
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Image { .. } => "Visual Snippet".to_string(),
            Self::Link { url } => url
                .trim_start_matches("https://")
                .trim_start_matches("http://")
                .to_string(),
            Self::Doc { data, .. } => data
                .split("Content")
                .next()
                .unwrap_or_default()
                .replacen("[File: ", "", 1)
                .replacen(']', "", 1)
                .trim()
                .to_string(),
        }
    }
}

/// Transcript entry. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub mode: Option<Mode>,
    pub timestamp: DateTime<Utc>,
    pub attachment: Option<Attachment>,
}

impl Message {
    #[must_use]
    pub fn user(text: impl Into<String>, attachment: Option<Attachment>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::User,
            text: text.into(),
            mode: None,
            timestamp: Utc::now(),
            attachment,
        }
    }

    #[must_use]
    pub fn model(text: impl Into<String>, mode: Mode) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Model,
            text: text.into(),
            mode: Some(mode),
            timestamp: Utc::now(),
            attachment: None,
        }
    }

    /// Prefix the generated id, e.g. `welcome-<uuid>`
    #[must_use]
    pub fn with_id_prefix(mut self, prefix: &str) -> Self {
        self.id = format!("{prefix}-{}", self.id);
        self
    }
}

/// Gamification counters shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub stars: u32,
    pub level: u32,
    pub focus_minutes: u32,
    pub tasks_completed: u32,
    pub quizzes_solved: u32,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            stars: 5,
            level: 1,
            focus_minutes: 0,
            tasks_completed: 0,
            quizzes_solved: 0,
        }
    }
}

/// Micro-task entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
}

impl Task {
    #[must_use]
    pub fn new(text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            completed: false,
        }
    }
}

/// Where a track is played from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackSource {
    Local,
    Youtube,
}

/// Vibe track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub name: String,
    pub artist: String,
    /// Declared length as `mm:ss`
    pub time: String,
    pub url: String,
    pub source: TrackSource,
}

/// User-imported YouTube playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPlaylist {
    pub id: String,
    pub name: String,
    pub youtube_id: String,
}

impl UserPlaylist {
    /// Embeddable player url for the playlist
    #[must_use]
    pub fn embed_url(&self) -> String {
        format!(
            "https://www.youtube.com/embed/videoseries?list={}",
            self.youtube_id
        )
    }
}

/// Daily quiz question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
}

/// Generation backend configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub temperature: f32,
    pub top_p: f32,
    pub enabled: bool,
}

impl AiConfig {
    pub const DEFAULT_MODEL: &'static str = "gemini-3-flash-preview";
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com/v1beta";

    /// Configured model or the default Gemini model
    #[must_use]
    pub fn effective_model(&self) -> &str {
        self.model.as_deref().unwrap_or(Self::DEFAULT_MODEL)
    }

    /// Configured base url without a trailing slash
    #[must_use]
    pub fn effective_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(Self::DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    /// Stored key, falling back to `GEMINI_API_KEY` then `API_KEY`
    #[must_use]
    pub fn effective_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("API_KEY").ok())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: None,
            api_key: None,
            base_url: None,
            temperature: 0.8,
            top_p: 0.95,
            enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse_variants() {
        assert_eq!("Study Buddy".parse::<Mode>(), Ok(Mode::StudyBuddy));
        assert_eq!("study-buddy".parse::<Mode>(), Ok(Mode::StudyBuddy));
        assert_eq!("career_coach".parse::<Mode>(), Ok(Mode::CareerCoach));
        assert_eq!("AI Mentor".parse::<Mode>(), Ok(Mode::AiMentor));
        assert!("happy".parse::<Mode>().is_err());
    }

    #[test]
    fn test_mode_display_round_trip_all() {
        for mode in Mode::ALL {
            assert_eq!(mode.to_string().parse::<Mode>(), Ok(mode));
        }
    }

    #[test]
    fn test_attachment_serde_tag() {
        let link = Attachment::Link {
            url: "https://example.com".to_string(),
        };
        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(json["type"], "link");
    }

    #[test]
    fn test_attachment_labels() {
        let doc = Attachment::Doc {
            data: "[File: notes.md] Content Snippet: hello".to_string(),
            mime_type: Some("text/plain".to_string()),
        };
        assert_eq!(doc.label(), "notes.md");

        let raw = Attachment::Doc {
            data: "thesis.pdf".to_string(),
            mime_type: None,
        };
        assert_eq!(raw.label(), "thesis.pdf");

        let image = Attachment::Image {
            data: "data:image/png;base64,AAAA".to_string(),
            mime_type: "image/png".to_string(),
        };
        assert_eq!(image.label(), "Visual Snippet");

        let link = Attachment::Link {
            url: "https://example.com/a".to_string(),
        };
        assert_eq!(link.label(), "example.com/a");
    }

    #[test]
    fn test_message_id_prefix() {
        let msg = Message::model("hi", Mode::Calm).with_id_prefix("welcome");
        assert!(msg.id.starts_with("welcome-"));
        assert_eq!(msg.mode, Some(Mode::Calm));
        assert_eq!(msg.role, Role::Model);
    }

    #[test]
    fn test_default_stats() {
        let stats = UserStats::default();
        assert_eq!(stats.stars, 5);
        assert_eq!(stats.level, 1);
        assert_eq!(stats.focus_minutes, 0);
    }

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig {
            base_url: Some("http://localhost:8080/".to_string()),
            ..AiConfig::default()
        };
        assert_eq!(config.effective_model(), "gemini-3-flash-preview");
        assert_eq!(config.effective_base_url(), "http://localhost:8080");
    }
}
