use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::model::population::Population;

/// Write the recorded history to `<out_dir>/<run_id>.csv` and the run
/// metadata (population size, day count, event indices) to
/// `<out_dir>/<run_id>.json`. Returns the CSV path.
pub fn write_run_report(
    out_dir: impl AsRef<Path>,
    run_id: &str,
    population: &Population,
) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(out_dir.as_ref()).context("create report dir failed")?;

    let csv_path = out_dir.as_ref().join(format!("{}.csv", run_id));
    let mut writer = csv::Writer::from_path(&csv_path)
        .with_context(|| format!("create report file failed (path={:?})", csv_path))?;
    writer.write_record(["day", "infected", "ic", "susceptible", "new_infected", "new_ic"])?;

    let history = population.history();
    for day in 0..history.len() {
        writer.write_record([
            day.to_string(),
            format!("{:.6}", history.infected()[day]),
            format!("{:.6}", history.ic()[day]),
            format!("{:.6}", history.susceptible()[day]),
            format!("{:.6}", history.new_infected()[day]),
            format!("{:.6}", history.new_ic()[day]),
        ])?;
    }
    writer.flush()?;

    let meta = serde_json::json!({
        "run_id": run_id,
        "size": population.size(),
        "days": history.len(),
        "lockdowns": population.events().lockdowns(),
        "openups": population.events().openups(),
    });
    let meta_path = out_dir.as_ref().join(format!("{}.json", run_id));
    std::fs::write(&meta_path, serde_json::to_string_pretty(&meta)?)
        .with_context(|| format!("write report metadata failed (path={:?})", meta_path))?;

    Ok(csv_path)
}
