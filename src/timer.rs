use chrono::{Datelike, Local, NaiveDate};
use tracing::warn;

use crate::models::PomodoroStats;
use crate::storage::{Store, STATS_KEY};

/// One leg of the Pomodoro cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Focus,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Focus => "Focus",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }
}

/// Timer durations and policies.
#[derive(Debug, Clone)]
pub struct TimerConfig {
    /// Focus phase length in minutes, adjustable while paused.
    pub focus_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
    /// Completed focus phases before a long break.
    pub cycles_before_long_break: u32,
    /// Whether `reset` also clears the completed-cycle count.
    pub reset_clears_cycles: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        TimerConfig {
            focus_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            cycles_before_long_break: 4,
            reset_clears_cycles: true,
        }
    }
}

/// The Pomodoro countdown state machine.
///
/// The caller drives time by invoking [`tick`](Self::tick) once per elapsed
/// second; the engine itself never schedules anything, so exactly one tick
/// source exists per running view. Each completed phase is recorded into
/// the persisted stats record through the injected store.
pub struct PomodoroTimer<S: Store> {
    store: S,
    config: TimerConfig,
    phase: Phase,
    time_left_secs: u32,
    is_running: bool,
    cycles_completed: u32,
}

impl<S: Store> PomodoroTimer<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, TimerConfig::default())
    }

    pub fn with_config(store: S, config: TimerConfig) -> Self {
        let time_left_secs = config.focus_minutes * 60;
        PomodoroTimer {
            store,
            config,
            phase: Phase::Focus,
            time_left_secs,
            is_running: false,
            cycles_completed: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn time_left_secs(&self) -> u32 {
        self.time_left_secs
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn cycles_completed(&self) -> u32 {
        self.cycles_completed
    }

    pub fn cycles_before_long_break(&self) -> u32 {
        self.config.cycles_before_long_break
    }

    pub fn focus_minutes(&self) -> u32 {
        self.config.focus_minutes
    }

    pub fn start(&mut self) {
        self.is_running = true;
    }

    pub fn pause(&mut self) {
        self.is_running = false;
    }

    pub fn toggle(&mut self) {
        self.is_running = !self.is_running;
    }

    /// Stops the countdown and returns to a full focus phase. The cycle
    /// count is cleared only when the config says so.
    pub fn reset(&mut self) {
        self.is_running = false;
        self.phase = Phase::Focus;
        self.time_left_secs = self.config.focus_minutes * 60;
        if self.config.reset_clears_cycles {
            self.cycles_completed = 0;
        }
    }

    /// Changes the focus duration. Rejected while the timer is running;
    /// otherwise forces a paused focus phase at the new full duration.
    pub fn set_focus_duration(&mut self, minutes: u32) -> bool {
        if self.is_running || minutes == 0 {
            return false;
        }
        self.config.focus_minutes = minutes;
        self.phase = Phase::Focus;
        self.time_left_secs = minutes * 60;
        true
    }

    /// Advances the countdown by one second. Returns the phase that just
    /// completed when this tick was the terminal one.
    pub fn tick(&mut self) -> Option<Phase> {
        if !self.is_running {
            return None;
        }
        if self.time_left_secs > 0 {
            self.time_left_secs -= 1;
        }
        if self.time_left_secs == 0 {
            let finished = self.phase;
            self.complete_phase();
            Some(finished)
        } else {
            None
        }
    }

    /// Fraction of the current phase already elapsed, clamped to [0, 1].
    pub fn progress(&self) -> f64 {
        let total = self.phase_duration_secs();
        if total == 0 {
            return 1.0;
        }
        let elapsed = total.saturating_sub(self.time_left_secs);
        (elapsed as f64 / total as f64).clamp(0.0, 1.0)
    }

    fn phase_duration_secs(&self) -> u32 {
        match self.phase {
            Phase::Focus => self.config.focus_minutes * 60,
            Phase::ShortBreak => self.config.short_break_minutes * 60,
            Phase::LongBreak => self.config.long_break_minutes * 60,
        }
    }

    fn complete_phase(&mut self) {
        let finished = self.phase;
        match finished {
            Phase::Focus => {
                self.cycles_completed += 1;
                if self.cycles_completed >= self.config.cycles_before_long_break {
                    self.phase = Phase::LongBreak;
                    self.time_left_secs = self.config.long_break_minutes * 60;
                    self.cycles_completed = 0;
                } else {
                    self.phase = Phase::ShortBreak;
                    self.time_left_secs = self.config.short_break_minutes * 60;
                }
            }
            Phase::ShortBreak | Phase::LongBreak => {
                self.phase = Phase::Focus;
                self.time_left_secs = self.config.focus_minutes * 60;
            }
        }
        self.record_completion(finished);
    }

    fn record_completion(&self, finished: Phase) {
        let mut stats: PomodoroStats = self.store.get(STATS_KEY).unwrap_or_default();
        apply_completion(&mut stats, finished, self.config.focus_minutes, Local::now().date_naive());
        if let Err(e) = self.store.set(STATS_KEY, &stats) {
            warn!(error = %e, "failed to persist pomodoro stats");
        }
    }
}

/// Folds one completed phase into the stats record.
///
/// The daily and weekly counters restart when `today` crosses a day or ISO
/// week boundary relative to the recorded last session date; an unparsable
/// date counts as crossing both.
pub fn apply_completion(stats: &mut PomodoroStats, finished: Phase, focus_minutes: u32, today: NaiveDate) {
    let last = NaiveDate::parse_from_str(&stats.last_session_date, "%Y-%m-%d").ok();
    if last != Some(today) {
        stats.today_sessions = 0;
    }
    if !last.is_some_and(|d| d.iso_week() == today.iso_week()) {
        stats.weekly_sessions = 0;
    }
    stats.total_sessions += 1;
    stats.today_sessions += 1;
    stats.weekly_sessions += 1;
    if finished == Phase::Focus {
        stats.total_focus_time += focus_minutes as u64;
    }
    stats.last_session_date = today.format("%Y-%m-%d").to_string();
}

/// Formats a second count as MM:SS.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn minute_timer(store: MemoryStore) -> PomodoroTimer<MemoryStore> {
        PomodoroTimer::with_config(
            store,
            TimerConfig {
                focus_minutes: 1,
                short_break_minutes: 1,
                long_break_minutes: 1,
                ..TimerConfig::default()
            },
        )
    }

    fn run_to_completion(timer: &mut PomodoroTimer<MemoryStore>) -> Phase {
        timer.start();
        loop {
            if let Some(finished) = timer.tick() {
                return finished;
            }
        }
    }

    #[test]
    fn tick_does_nothing_while_paused() {
        let mut timer = minute_timer(MemoryStore::new());
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.time_left_secs(), 60);
    }

    #[test]
    fn focus_completion_moves_to_short_break() {
        let mut timer = minute_timer(MemoryStore::new());
        assert_eq!(run_to_completion(&mut timer), Phase::Focus);
        assert_eq!(timer.phase(), Phase::ShortBreak);
        assert_eq!(timer.cycles_completed(), 1);
        assert!(timer.is_running());
    }

    #[test]
    fn set_focus_duration_rejected_while_running() {
        let mut timer = minute_timer(MemoryStore::new());
        timer.start();
        assert!(!timer.set_focus_duration(50));
        timer.pause();
        assert!(timer.set_focus_duration(50));
        assert_eq!(timer.time_left_secs(), 50 * 60);
        assert_eq!(timer.phase(), Phase::Focus);
        assert!(!timer.is_running());
    }

    #[test]
    fn reset_clears_cycles_by_default() {
        let mut timer = minute_timer(MemoryStore::new());
        run_to_completion(&mut timer);
        assert_eq!(timer.cycles_completed(), 1);
        timer.reset();
        assert_eq!(timer.cycles_completed(), 0);
        assert_eq!(timer.phase(), Phase::Focus);
        assert_eq!(timer.time_left_secs(), 60);
        assert!(!timer.is_running());
    }

    #[test]
    fn reset_keeps_cycles_when_policy_disabled() {
        let mut timer = PomodoroTimer::with_config(
            MemoryStore::new(),
            TimerConfig {
                focus_minutes: 1,
                short_break_minutes: 1,
                long_break_minutes: 1,
                reset_clears_cycles: false,
                ..TimerConfig::default()
            },
        );
        run_to_completion(&mut timer);
        timer.reset();
        assert_eq!(timer.cycles_completed(), 1);
    }

    #[test]
    fn progress_runs_from_zero_to_one() {
        let mut timer = minute_timer(MemoryStore::new());
        assert_eq!(timer.progress(), 0.0);
        timer.start();
        for _ in 0..30 {
            timer.tick();
        }
        assert!((timer.progress() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn apply_completion_counts_focus_time_only_for_focus() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let mut stats = PomodoroStats::default();
        apply_completion(&mut stats, Phase::Focus, 25, today);
        apply_completion(&mut stats, Phase::ShortBreak, 25, today);
        assert_eq!(stats.total_sessions, 2);
        assert_eq!(stats.total_focus_time, 25);
        assert_eq!(stats.last_session_date, "2024-06-03");
    }

    #[test]
    fn apply_completion_restarts_daily_counter_on_new_day() {
        let mut stats = PomodoroStats::default();
        let monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();
        apply_completion(&mut stats, Phase::Focus, 25, monday);
        apply_completion(&mut stats, Phase::Focus, 25, monday);
        apply_completion(&mut stats, Phase::Focus, 25, tuesday);
        assert_eq!(stats.today_sessions, 1);
        assert_eq!(stats.weekly_sessions, 3);
        assert_eq!(stats.total_sessions, 3);
    }

    #[test]
    fn apply_completion_restarts_weekly_counter_on_new_week() {
        let mut stats = PomodoroStats::default();
        let friday = NaiveDate::from_ymd_opt(2024, 6, 7).unwrap();
        let next_monday = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        apply_completion(&mut stats, Phase::Focus, 25, friday);
        apply_completion(&mut stats, Phase::Focus, 25, next_monday);
        assert_eq!(stats.weekly_sessions, 1);
        assert_eq!(stats.total_sessions, 2);
    }

    #[test]
    fn format_clock_pads_both_fields() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(25 * 60), "25:00");
    }
}
