//! Hardcoded terminal UI settings: labels, glyphs, colors and timings.

use crossterm::style::Color;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

pub const LABEL_WARNING: &str = "warning:";
pub const LABEL_ERROR: &str = "error:";
pub const LABEL_EVALUATING: &str = "evaluating";
pub const GLYPH_PENDING: &str = "\u{2026}";

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// How long one terminal event poll blocks before checking for results.
pub const REPL_EVENT_POLL_MS: u64 = 80;

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

pub const COLOR_PROMPT_SYMBOL: Color = Color::White;
pub const COLOR_COMMAND: Color = Color::White;
pub const COLOR_RESPONSE: Color = Color::Grey;
pub const COLOR_STATUS_LINE: Color = Color::DarkGrey;
pub const COLOR_BANNER: Color = Color::DarkGrey;
pub const COLOR_WARNING: Color = Color::Yellow;
pub const COLOR_ERROR: Color = Color::Red;

// ---------------------------------------------------------------------------
// Small helpers
// ---------------------------------------------------------------------------

/// Compact elapsed time: one decimal below a minute, `XmYs` above.
pub fn format_elapsed(elapsed: Duration) -> String {
    if elapsed.as_secs() >= 60 {
        format!("{}m{}s", elapsed.as_secs() / 60, elapsed.as_secs() % 60)
    } else {
        format!("{:.1}s", elapsed.as_secs_f64())
    }
}

/// Status row shown while an evaluation is outstanding.
pub fn pending_status_text(elapsed: Duration) -> String {
    format!(
        "{LABEL_EVALUATING}{GLYPH_PENDING} {}",
        format_elapsed(elapsed)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_switches_to_minutes() {
        assert_eq!(format_elapsed(Duration::from_millis(1250)), "1.2s");
        assert_eq!(format_elapsed(Duration::from_secs(125)), "2m5s");
    }

    #[test]
    fn pending_status_mentions_elapsed_time() {
        assert_eq!(
            pending_status_text(Duration::from_secs(3)),
            "evaluating\u{2026} 3.0s"
        );
    }
}
