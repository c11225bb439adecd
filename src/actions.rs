//! Placeholder actions behind the four menu entries.
//!
//! Each action writes one fixed line to the given output and returns the same
//! text. Real provider calls would replace the bodies without touching the
//! resolver or the dispatch table.

use std::io::Write;

pub const IMAGE_MESSAGE: &str = "[Image] Fonction image appelée. (stub)";
pub const VIDEO_MESSAGE: &str = "[Vidéo] Fonction vidéo appelée. (stub)";
pub const TRANSCRIPTION_MESSAGE: &str = "[Transcription] Fonction transcription appelée. (stub)";
pub const QUESTION_MESSAGE: &str = "[Question] Fonction question appelée. (stub)";

/// What a dispatched action produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResult {
    pub action: MenuAction,
    pub message: String,
}

/// One of the four menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Image,
    Video,
    Transcription,
    Question,
}

impl MenuAction {
    pub const ALL: [MenuAction; 4] = [
        MenuAction::Image,
        MenuAction::Video,
        MenuAction::Transcription,
        MenuAction::Question,
    ];

    /// Map a canonical CLI token ("1".."4") to its action.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "1" => Some(Self::Image),
            "2" => Some(Self::Video),
            "3" => Some(Self::Transcription),
            "4" => Some(Self::Question),
            _ => None,
        }
    }

    /// Map the web form value (`image`, `video`, ...) to its action.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    pub fn token(&self) -> &'static str {
        match self {
            Self::Image => "1",
            Self::Video => "2",
            Self::Transcription => "3",
            Self::Question => "4",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Transcription => "transcription",
            Self::Question => "question",
        }
    }

    /// Label shown in the menu and on the page buttons.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::Video => "Vidéo",
            Self::Transcription => "Transcription",
            Self::Question => "Question",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Image => IMAGE_MESSAGE,
            Self::Video => VIDEO_MESSAGE,
            Self::Transcription => TRANSCRIPTION_MESSAGE,
            Self::Question => QUESTION_MESSAGE,
        }
    }

    pub fn run(&self, out: &mut dyn Write) -> String {
        match self {
            Self::Image => menu_image(out),
            Self::Video => menu_video(out),
            Self::Transcription => menu_transcription(out),
            Self::Question => menu_question(out),
        }
    }
}

pub fn menu_image(out: &mut dyn Write) -> String {
    emit(out, IMAGE_MESSAGE)
}

pub fn menu_video(out: &mut dyn Write) -> String {
    emit(out, VIDEO_MESSAGE)
}

pub fn menu_transcription(out: &mut dyn Write) -> String {
    emit(out, TRANSCRIPTION_MESSAGE)
}

pub fn menu_question(out: &mut dyn Write) -> String {
    emit(out, QUESTION_MESSAGE)
}

// A closed or full output must not make a stub fail.
fn emit(out: &mut dyn Write, message: &str) -> String {
    let _ = writeln!(out, "{}", message);
    let _ = out.flush();
    message.to_string()
}
