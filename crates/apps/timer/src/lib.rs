//! Pomodoro countdown widget.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::time::Duration;

use leptos::*;
use ordo_app_contract::{AppMountContext, AppServices, LocalAppModule, LocalWidget};

/// Length of one work session in seconds.
pub const POMODORO_SECONDS: u32 = 25 * 60;
/// Registration record for the timer widget.
pub const TIMER_MODULE: LocalAppModule =
    LocalAppModule::new("ordo.apps.timer.TimerWindow", build_timer_window);

const TICK: Duration = Duration::from_secs(1);

/// Countdown state. Advanced by one [`Self::tick`] per elapsed second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PomodoroTimer {
    remaining_secs: u32,
    running: bool,
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self {
            remaining_secs: POMODORO_SECONDS,
            running: false,
        }
    }
}

impl PomodoroTimer {
    /// Seconds left in the current session.
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Whether the countdown is advancing.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Starts or pauses the countdown. Starting a finished countdown does nothing.
    pub fn toggle(&mut self) {
        self.running = !self.running && self.remaining_secs > 0;
    }

    /// Stops the countdown and rewinds it to a full session.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advances one second. Returns `true` when this tick finished the session.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.running = false;
            return true;
        }
        false
    }

    /// `MM:SS` display of the remaining time.
    pub fn display(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_secs / 60,
            self.remaining_secs % 60
        )
    }

    /// Label of the start/pause button.
    pub fn toggle_label(&self) -> &'static str {
        if self.running {
            "[PAUSE]"
        } else {
            "[START]"
        }
    }
}

struct TimerWindow;

fn build_timer_window(_services: &AppServices) -> Result<Box<dyn LocalWidget>, String> {
    Ok(Box::new(TimerWindow))
}

impl LocalWidget for TimerWindow {
    fn component_name(&self) -> &'static str {
        "TimerWindow"
    }

    fn mount(&self, _context: AppMountContext) -> View {
        view! { <TimerView /> }.into_view()
    }
}

#[component]
fn TimerView() -> impl IntoView {
    let timer = create_rw_signal(PomodoroTimer::default());

    match set_interval_with_handle(
        move || {
            if timer.with_untracked(PomodoroTimer::is_running) {
                timer.update(|timer| {
                    if timer.tick() {
                        logging::log!("pomodoro session finished");
                    }
                });
            }
        },
        TICK,
    ) {
        Ok(interval) => on_cleanup(move || interval.clear()),
        Err(err) => logging::warn!("timer interval unavailable: {err:?}"),
    }

    view! {
        <div class="ordo-timer">
            <div class="ordo-timer-display" role="timer" aria-live="off">
                {move || timer.with(PomodoroTimer::display)}
            </div>
            <div class="ordo-timer-controls">
                <button type="button" on:click=move |_| timer.update(PomodoroTimer::toggle)>
                    {move || timer.with(PomodoroTimer::toggle_label)}
                </button>
                <button type="button" on:click=move |_| timer.update(PomodoroTimer::reset)>
                    "[RESET]"
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn starts_paused_at_twenty_five_minutes() {
        let timer = PomodoroTimer::default();
        assert_eq!(timer.display(), "25:00");
        assert_eq!(timer.toggle_label(), "[START]");
    }

    #[test]
    fn ticks_only_while_running() {
        let mut timer = PomodoroTimer::default();
        timer.tick();
        assert_eq!(timer.display(), "25:00");

        timer.toggle();
        assert_eq!(timer.toggle_label(), "[PAUSE]");
        timer.tick();
        timer.tick();
        assert_eq!(timer.display(), "24:58");

        timer.toggle();
        timer.tick();
        assert_eq!(timer.display(), "24:58");
    }

    #[test]
    fn stops_at_zero() {
        let mut timer = PomodoroTimer::default();
        timer.toggle();
        let finished = (0..POMODORO_SECONDS).filter(|_| timer.tick()).count();
        assert_eq!(finished, 1);
        assert_eq!(timer.display(), "00:00");
        assert!(!timer.is_running());

        assert!(!timer.tick());
        timer.toggle();
        assert!(!timer.is_running());
    }

    #[test]
    fn reset_rewinds_and_pauses() {
        let mut timer = PomodoroTimer::default();
        timer.toggle();
        (0..90).for_each(|_| {
            timer.tick();
        });
        assert_eq!(timer.display(), "23:30");
        timer.reset();
        assert_eq!(timer, PomodoroTimer::default());
    }

    #[test]
    fn factory_builds_timer_widget() {
        let services = AppServices::new(std::rc::Rc::new(
            ordo_platform_host::NoopTextStore,
        ));
        let widget = TIMER_MODULE.instantiate(&services).expect("timer builds");
        assert_eq!(widget.component_name(), "TimerWindow");
    }
}
