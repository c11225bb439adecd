use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::actions::MenuAction;
use crate::menu::QuitReason;

/// Loggers created so far by this process; keeps same-millisecond names apart.
static SESSION_SEQ: AtomicUsize = AtomicUsize::new(0);

/// Appends timestamped lines to `<log_dir>/session_<timestamp>_<pid>_<seq>.log`.
#[derive(Debug, Clone)]
pub struct Logger {
    log_file: PathBuf,
}

/// Counters for one CLI session or one web server lifetime.
#[derive(Debug, Default, Clone, Serialize)]
pub struct SessionMetrics {
    pub image: usize,
    pub video: usize,
    pub transcription: usize,
    pub question: usize,
    pub invalid_choices: usize,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, action: MenuAction) {
        match action {
            MenuAction::Image => self.image += 1,
            MenuAction::Video => self.video += 1,
            MenuAction::Transcription => self.transcription += 1,
            MenuAction::Question => self.question += 1,
        }
    }

    pub fn record_invalid(&mut self) {
        self.invalid_choices += 1;
    }

    pub fn count(&self, action: MenuAction) -> usize {
        match action {
            MenuAction::Image => self.image,
            MenuAction::Video => self.video,
            MenuAction::Transcription => self.transcription,
            MenuAction::Question => self.question,
        }
    }

    pub fn total_actions(&self) -> usize {
        self.image + self.video + self.transcription + self.question
    }

    pub fn summary(&self) -> String {
        format!(
            "image={} video={} transcription={} question={} invalid={}",
            self.image, self.video, self.transcription, self.question, self.invalid_choices
        )
    }
}

impl Logger {
    pub fn new(log_dir: &str) -> Result<Self> {
        let dir = PathBuf::from(log_dir);
        if !dir.exists() {
            fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
        }

        let timestamp = Local::now().format("%Y%m%d_%H%M%S_%3f");
        let seq = SESSION_SEQ.fetch_add(1, Ordering::Relaxed);
        let log_file = dir.join(format!(
            "session_{}_{}_{}.log",
            timestamp,
            std::process::id(),
            seq
        ));

        Ok(Self { log_file })
    }

    pub fn path(&self) -> &Path {
        &self.log_file
    }

    pub fn log(&self, message: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file)?;

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(file, "[{}] {}", timestamp, message)?;
        Ok(())
    }

    pub fn log_choice(&self, token: &str) -> Result<()> {
        self.log(&format!("CHOICE: {:?}", token))
    }

    pub fn log_action(&self, action: MenuAction) -> Result<()> {
        self.log(&format!("ACTION: {}", action.name()))
    }

    pub fn log_invalid(&self, token: &str) -> Result<()> {
        self.log(&format!("INVALID CHOICE: {:?}", token))
    }

    pub fn log_web_action(&self, action: &str) -> Result<()> {
        self.log(&format!("WEB ACTION: {:?}", action))
    }

    pub fn log_quit(&self, reason: QuitReason, metrics: &SessionMetrics) -> Result<()> {
        let reason = match reason {
            QuitReason::Requested => "user quit",
            QuitReason::EndOfInput => "end of input",
        };
        self.log(&format!("SESSION END ({}): {}", reason, metrics.summary()))
    }

    pub fn log_error(&self, error: &str) -> Result<()> {
        self.log(&format!("ERROR: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_session_metrics_new() {
        let metrics = SessionMetrics::new();
        assert_eq!(metrics.total_actions(), 0);
        assert_eq!(metrics.invalid_choices, 0);
    }

    #[test]
    fn test_record_counts_per_action() {
        let mut metrics = SessionMetrics::new();
        metrics.record(MenuAction::Image);
        metrics.record(MenuAction::Image);
        metrics.record(MenuAction::Question);
        metrics.record_invalid();
        assert_eq!(metrics.count(MenuAction::Image), 2);
        assert_eq!(metrics.count(MenuAction::Video), 0);
        assert_eq!(metrics.count(MenuAction::Question), 1);
        assert_eq!(metrics.total_actions(), 3);
        assert_eq!(metrics.invalid_choices, 1);
        assert_eq!(
            metrics.summary(),
            "image=2 video=0 transcription=0 question=1 invalid=1"
        );
    }

    #[test]
    fn test_logger_creation() {
        let test_log_dir = "test_logs_temp";
        let logger = Logger::new(test_log_dir);
        assert!(logger.is_ok());

        let logger = logger.unwrap();
        assert!(logger.path().parent().unwrap().exists());

        // Clean up
        let _ = fs::remove_dir_all(test_log_dir);
    }

    #[test]
    fn test_loggers_get_distinct_files() {
        let test_log_dir = "test_logs_temp4";
        let first = Logger::new(test_log_dir).unwrap();
        let second = Logger::new(test_log_dir).unwrap();
        assert_ne!(first.path(), second.path());

        let _ = first.log("from first");
        let _ = second.log("from second");
        let content = fs::read_to_string(first.path()).unwrap();
        assert!(content.contains("from first"));
        assert!(!content.contains("from second"));

        let name = first.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("session_"));
        assert!(name.contains(&std::process::id().to_string()));

        // Clean up
        let _ = fs::remove_dir_all(test_log_dir);
    }

    #[test]
    fn test_logger_basic_log() {
        let test_log_dir = "test_logs_temp2";
        let logger = Logger::new(test_log_dir).unwrap();

        let result = logger.log("Test message");
        assert!(result.is_ok());

        let content = fs::read_to_string(logger.path()).unwrap();
        assert!(content.contains("Test message"));

        // Clean up
        let _ = fs::remove_dir_all(test_log_dir);
    }

    #[test]
    fn test_logger_menu_entries() {
        let test_log_dir = "test_logs_temp3";
        let logger = Logger::new(test_log_dir).unwrap();

        let _ = logger.log_choice("3");
        let _ = logger.log_action(MenuAction::Transcription);
        let _ = logger.log_invalid("x");
        let mut metrics = SessionMetrics::new();
        metrics.record(MenuAction::Transcription);
        let _ = logger.log_quit(QuitReason::Requested, &metrics);

        let content = fs::read_to_string(logger.path()).unwrap();
        assert!(content.contains("CHOICE: \"3\""));
        assert!(content.contains("ACTION: transcription"));
        assert!(content.contains("INVALID CHOICE: \"x\""));
        assert!(content.contains("SESSION END (user quit): image=0 video=0 transcription=1"));

        // Clean up
        let _ = fs::remove_dir_all(test_log_dir);
    }
}
