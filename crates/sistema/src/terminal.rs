//! Plain-text front-end writing to stdout

use sistema_api::{Attributes, Cycle, FeedbackSeverity, MissionBoard, MissionStatus};
use sistema_core::{Frontend, WeeklyStats};
use std::io::Write;

/// Renders the system as plain text
pub struct TerminalFrontend<W: Write> {
    out: W,
}

impl<W: Write> TerminalFrontend<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn line(&mut self, text: &str) {
        // Output errors (closed pipe) are not worth failing the action over
        let _ = writeln!(self.out, "{}", text);
    }

    fn board(&mut self, board: &MissionBoard) {
        for (key, status) in board.iter() {
            let mark = match status {
                MissionStatus::Completed => "[x]",
                MissionStatus::Failed => "[!]",
                MissionStatus::Unset => "[ ]",
            };
            self.line(&format!("  {} {}", mark, key));
        }
    }
}

impl<W: Write> Frontend for TerminalFrontend<W> {
    fn render_missions(&mut self, daily: &MissionBoard, rotating: &MissionBoard, cycle: Cycle) {
        self.line("Daily missions");
        self.board(daily);
        self.line(&format!("Cycle {} missions", cycle));
        self.board(rotating);
    }

    fn render_attributes(&mut self, attributes: &Attributes) {
        self.line("Attributes");
        for (attribute, value) in attributes.iter() {
            self.line(&format!("  {:<13}{:>3}/100", attribute.as_str(), value));
        }
    }

    fn render_weekly_stats(&mut self, stats: &WeeklyStats) {
        self.line(&format!(
            "Week: {}% completed, streak {} ({})",
            stats.rate_percent, stats.streak, stats.status
        ));
    }

    fn show_feedback(&mut self, message: &str, severity: FeedbackSeverity) {
        let prefix = match severity {
            FeedbackSeverity::Success => "+",
            FeedbackSeverity::Fail => "!",
            FeedbackSeverity::Info => "*",
        };
        self.line(&format!("{} {}", prefix, message));
    }

    fn mark_frozen(&mut self, frozen: bool) {
        if frozen {
            self.line("SYSTEM FROZEN");
        }
    }
}
