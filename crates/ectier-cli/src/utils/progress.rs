use ectier::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex};
use tracing::warn;

const PHASE_TEMPLATE: &str = "{prefix:>11.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} records";
const DONE_TEMPLATE: &str = "{prefix:>11.bold.green} {msg} ({elapsed})";

/// Terminal progress for a scoring run: one bar per phase (`Learning`,
/// `Classifying`), each left behind as a finished line, then the tier summary.
#[derive(Clone)]
pub struct CliProgressHandler {
    display: Arc<Mutex<PhaseDisplay>>,
}

struct PhaseDisplay {
    visible: bool,
    bar: ProgressBar,
    summary: Option<String>,
}

impl PhaseDisplay {
    fn start_phase(&mut self, name: &'static str) {
        let target = if self.visible {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        self.bar = ProgressBar::with_draw_target(Some(0), target)
            .with_style(phase_style())
            .with_prefix(name);
    }

    fn finish_phase(&mut self) {
        let records = self.bar.position();
        self.bar.set_style(done_style());
        self.bar.finish_with_message(format!("{records} records"));
    }

    fn show_summary(&mut self, summary: String) {
        self.bar.println(format!("{:>11} {summary}", "Tiers"));
        self.summary = Some(summary);
    }
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_visibility(true)
    }

    /// A handler that tracks state but never draws, used with `--quiet`.
    pub fn hidden() -> Self {
        Self::with_visibility(false)
    }

    fn with_visibility(visible: bool) -> Self {
        Self {
            display: Arc::new(Mutex::new(PhaseDisplay {
                visible,
                bar: ProgressBar::hidden(),
                summary: None,
            })),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let display = self.display.clone();

        Box::new(move |progress: Progress| {
            let Ok(mut display) = display.lock() else {
                warn!("Progress display mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => display.start_phase(name),
                Progress::TaskStart { total_steps } => {
                    display.bar.set_length(total_steps);
                    display.bar.set_position(0);
                }
                Progress::TaskIncrement => display.bar.inc(1),
                Progress::TaskFinish => {}
                Progress::PhaseFinish => display.finish_phase(),
                Progress::Message(summary) => display.show_summary(summary),
            }
        })
    }
}

fn phase_style() -> ProgressStyle {
    ProgressStyle::with_template(PHASE_TEMPLATE)
        .expect("Failed to create phase style template")
        .progress_chars("##-")
}

fn done_style() -> ProgressStyle {
    ProgressStyle::with_template(DONE_TEMPLATE).expect("Failed to create done style template")
}
