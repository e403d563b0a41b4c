use crate::commands::CmdResult;
use crate::error::Result;
use crate::settings::Settings;
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;

/// Collection stats, plus the settings so the reading goal can be shown.
pub fn run<B: StorageBackend>(store: &RecordStore<B>) -> Result<CmdResult> {
    let settings = Settings::load(store.backend());
    Ok(CmdResult::default()
        .with_stats(store.get_stats())
        .with_settings(settings))
}

/// Percentage of the reading goal reached, capped at 100.
pub fn goal_percent(pages_read: u64, goal: u32) -> f64 {
    if goal == 0 {
        return 100.0;
    }
    (pages_read as f64 / f64::from(goal) * 100.0).min(100.0)
}
