//! Human-readable progress rendering.
//!
//! An event sink that drives an indicatif bar instead of printing JSON
//! lines. For interactive use only; host processes should consume the
//! machine-readable stream.

use indicatif::{HumanBytes, ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};

use hfwatch_core::ports::ProgressEventSink;
use hfwatch_core::ProgressEvent;

/// Sink rendering the event stream as a terminal progress bar.
#[derive(Clone)]
pub struct PrettyProgressSink {
    bar: ProgressBar,
}

impl PrettyProgressSink {
    /// Create a sink drawing to stderr, leaving stdout untouched.
    #[must_use]
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(None, target);
        bar.set_style(Self::spinner_style());
        bar.set_message("Preparing download".to_string());
        bar.enable_steady_tick(std::time::Duration::from_millis(120));
        Self { bar }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("⬇ {msg} {spinner}").unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "⬇ {msg} {bar:28.cyan/blue} {human_bytes:>9} / {human_total:>9} ({percent:>3}%) ETA {eta}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .with_key("human_bytes", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let _ = write!(w, "{}", HumanBytes(state.pos()));
        })
        .with_key("human_total", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let value = state
                .len()
                .map_or_else(|| "?".to_string(), |len| HumanBytes(len).to_string());
            let _ = write!(w, "{value}");
        })
    }

    fn format_label(raw: &str) -> String {
        const MAX_LABEL: usize = 40;
        let char_count = raw.chars().count();
        if char_count <= MAX_LABEL {
            return raw.to_string();
        }
        let mut buf: String = raw.chars().take(MAX_LABEL - 1).collect();
        buf.push('…');
        buf
    }
}

impl Default for PrettyProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressEventSink for PrettyProgressSink {
    fn emit(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::Start { total_bytes } => {
                self.bar.set_style(Self::bar_style());
                self.bar.set_length(total_bytes);
            }
            ProgressEvent::FileStarted { path, .. } => {
                self.bar.set_message(Self::format_label(&path));
            }
            ProgressEvent::Progress {
                downloaded_bytes, ..
            } => {
                let capped = self
                    .bar
                    .length()
                    .map_or(downloaded_bytes, |len| downloaded_bytes.min(len));
                self.bar.set_position(capped);
            }
            ProgressEvent::Complete => {
                self.bar.finish_and_clear();
            }
            ProgressEvent::Error { message } => {
                self.bar.abandon_with_message(format!("failed: {message}"));
            }
        }
    }

    fn clone_box(&self) -> Box<dyn ProgressEventSink> {
        Box::new(self.clone())
    }
}
