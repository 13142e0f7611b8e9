use chrono::Local;

use focust::models::PomodoroStats;
use focust::storage::{MemoryStore, Store, STATS_KEY};
use focust::timer::{Phase, PomodoroTimer, TimerConfig};

fn fast_config() -> TimerConfig {
    TimerConfig {
        focus_minutes: 1,
        short_break_minutes: 1,
        long_break_minutes: 1,
        ..TimerConfig::default()
    }
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
fn four_focus_phases_drive_the_full_cycle() {
    let mut timer = PomodoroTimer::with_config(MemoryStore::new(), fast_config());

    let mut entered = Vec::new();
    for _ in 0..8 {
        run_to_completion(&mut timer);
        entered.push(timer.phase());
    }

    assert_eq!(
        entered,
        vec![
            Phase::ShortBreak,
            Phase::Focus,
            Phase::ShortBreak,
            Phase::Focus,
            Phase::ShortBreak,
            Phase::Focus,
            Phase::LongBreak,
            Phase::Focus,
        ]
    );
    // Entering the long break reset the cycle count.
    assert_eq!(timer.cycles_completed(), 0);
}

#[test]
fn focus_time_counts_only_focus_phases() {
    let store = MemoryStore::new();
    let mut timer = PomodoroTimer::with_config(
        store.clone(),
        TimerConfig {
            focus_minutes: 2,
            short_break_minutes: 1,
            long_break_minutes: 1,
            ..TimerConfig::default()
        },
    );

    // Three focus phases interleaved with their breaks: six completions.
    for _ in 0..6 {
        run_to_completion(&mut timer);
    }

    let stats: PomodoroStats = store.get(STATS_KEY).unwrap();
    assert_eq!(stats.total_sessions, 6);
    assert_eq!(stats.total_focus_time, 3 * 2);
}

#[test]
fn every_completion_persists_the_stats_record() {
    let store = MemoryStore::new();
    let mut timer = PomodoroTimer::with_config(store.clone(), fast_config());

    assert!(store.get::<PomodoroStats>(STATS_KEY).is_none());
    run_to_completion(&mut timer);

    let stats: PomodoroStats = store.get(STATS_KEY).unwrap();
    assert_eq!(stats.total_sessions, 1);
    assert_eq!(stats.today_sessions, 1);
    assert_eq!(stats.weekly_sessions, 1);
    assert_eq!(stats.last_session_date, Local::now().date_naive().format("%Y-%m-%d").to_string());
}

#[test]
fn corrupt_stats_record_restarts_from_defaults() {
    let store = MemoryStore::new();
    store.set_raw(STATS_KEY, "{ this is not json").unwrap();

    let mut timer = PomodoroTimer::with_config(store.clone(), fast_config());
    run_to_completion(&mut timer);

    let stats: PomodoroStats = store.get(STATS_KEY).unwrap();
    assert_eq!(stats.total_sessions, 1);
}

#[test]
fn break_lengths_come_from_the_config() {
    let mut timer = PomodoroTimer::with_config(
        MemoryStore::new(),
        TimerConfig {
            focus_minutes: 1,
            ..TimerConfig::default()
        },
    );

    run_to_completion(&mut timer);
    assert_eq!(timer.phase(), Phase::ShortBreak);
    assert_eq!(timer.time_left_secs(), 5 * 60);

    timer.pause();
    timer.reset();
    assert_eq!(timer.phase(), Phase::Focus);
    assert_eq!(timer.time_left_secs(), 60);
}
