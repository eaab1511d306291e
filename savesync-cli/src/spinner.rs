//! Single progress spinner driven by the sync executor's progress callback.
//!
//! The executor is single-threaded and cooperative (§5): one title is ever
//! in flight at a time here, so one spinner slot suffices.

use indicatif::{ProgressBar, ProgressStyle};

pub(crate) struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub(crate) fn new(quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                    .expect("static pattern")
                    .tick_chars("/-\\|"),
            );
            bar.enable_steady_tick(std::time::Duration::from_millis(100));
            bar
        };
        Self { bar }
    }

    /// Returns a callback suitable for `savesync_engine`'s `ProgressCb`.
    pub(crate) fn callback(&self) -> impl Fn(&str) + '_ {
        move |msg: &str| self.bar.set_message(msg.to_string())
    }

    pub(crate) fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
