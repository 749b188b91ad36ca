use console::style;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

use crate::ui::icons::CHECK;

/// Spinner shown on stderr while a backend call is in flight.
///
/// Drawn only on a terminal; when stderr is redirected the spinner is hidden
/// and only the final line is printed.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn start(message: impl Into<String>) -> Self {
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("progress bar template is a valid static string"),
        );
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// Stop without printing anything.
    pub fn clear(self) {
        self.bar.finish_and_clear();
    }

    pub fn success(self, message: impl AsRef<str>) {
        self.bar.finish_and_clear();
        eprintln!("{}{}", CHECK, style(message.as_ref()).green());
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
