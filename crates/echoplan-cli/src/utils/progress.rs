use echoplan::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

struct SpinnerState {
    bar: ProgressBar,
    current: Option<&'static str>,
    completed: usize,
}

/// Renders workflow phases as a numbered stderr spinner. A finished phase
/// leaves a `✓ <phase>` line; messages are printed under the running phase.
#[derive(Clone)]
pub struct CliProgressHandler {
    state: Arc<Mutex<SpinnerState>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr())
            .with_style(spinner_style());
        bar.finish_and_clear();

        Self {
            state: Arc::new(Mutex::new(SpinnerState {
                bar,
                current: None,
                completed: 0,
            })),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let state = Arc::clone(&self.state);

        Box::new(move |progress: Progress| {
            let Ok(mut state) = state.lock() else {
                warn!("Spinner state lock was poisoned; dropping progress event.");
                return;
            };
            state.apply(progress);
        })
    }
}

impl SpinnerState {
    fn apply(&mut self, progress: Progress) {
        match progress {
            Progress::PhaseStart { name } => {
                self.current = Some(name);
                self.bar.reset();
                self.bar
                    .set_message(format!("[{}] {}", self.completed + 1, name));
                self.bar
                    .enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
            }
            Progress::PhaseFinish => {
                self.completed += 1;
                let label = self.current.take().unwrap_or("Done");
                self.bar.disable_steady_tick();
                self.bar.finish_with_message(format!("✓ {}", label));
            }
            Progress::Message(msg) if self.bar.is_finished() => self.bar.set_message(msg),
            Progress::Message(msg) => self.bar.println(format!("  {}", msg)),
        }
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn handler_starts_idle() {
        let handler = CliProgressHandler::new();
        let state = handler.state.lock().unwrap();
        assert!(state.bar.is_finished());
        assert_eq!(state.current, None);
        assert_eq!(state.completed, 0);
    }

    #[test]
    fn phases_are_numbered_and_named_on_completion() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart {
            name: "Resolving Parts",
        });
        callback(Progress::PhaseFinish);
        callback(Progress::PhaseStart {
            name: "Calculating Volumes",
        });
        {
            let state = handler.state.lock().unwrap();
            assert_eq!(state.bar.message(), "[2] Calculating Volumes");
            assert!(!state.bar.is_finished());
        }

        callback(Progress::PhaseFinish);
        {
            let state = handler.state.lock().unwrap();
            assert!(state.bar.is_finished());
            assert_eq!(state.bar.message(), "✓ Calculating Volumes");
            assert_eq!(state.completed, 2);
        }

        callback(Progress::Message("Planned 2 transfers.".to_string()));
        let state = handler.state.lock().unwrap();
        assert_eq!(state.bar.message(), "Planned 2 transfers.");
    }

    #[test]
    fn callback_is_thread_safe() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::PhaseStart {
                name: "Filling Diluent",
            });
            callback(Progress::PhaseFinish);
        })
        .join()
        .unwrap();

        let state = handler.state.lock().unwrap();
        assert!(state.bar.is_finished());
        assert_eq!(state.bar.message(), "✓ Filling Diluent");
    }
}
