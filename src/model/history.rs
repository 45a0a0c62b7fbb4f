use std::ops::Range;

use anyhow::Context;

/// Daily record of the population, one entry per simulated day starting at
/// the day-zero seed. The five series always have identical length; index 0
/// is the earliest recorded day.
#[derive(Debug, Clone, Default)]
pub struct History {
    infected: Vec<f64>,
    ic: Vec<f64>,
    susceptible: Vec<f64>,
    new_infected: Vec<f64>,
    new_ic: Vec<f64>,
}

impl History {
    pub fn len(&self) -> usize {
        self.infected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infected.is_empty()
    }

    pub fn infected(&self) -> &[f64] {
        &self.infected
    }

    pub fn ic(&self) -> &[f64] {
        &self.ic
    }

    pub fn susceptible(&self) -> &[f64] {
        &self.susceptible
    }

    pub fn new_infected(&self) -> &[f64] {
        &self.new_infected
    }

    pub fn new_ic(&self) -> &[f64] {
        &self.new_ic
    }

    /// Append one day to all five series at once.
    pub(crate) fn push_day(
        &mut self,
        infected: f64,
        ic: f64,
        susceptible: f64,
        new_infected: f64,
        new_ic: f64,
    ) {
        self.infected.push(infected);
        self.ic.push(ic);
        self.susceptible.push(susceptible);
        self.new_infected.push(new_infected);
        self.new_ic.push(new_ic);
    }

    /// New-infection count recorded `days` before the next (not yet recorded)
    /// day, or `None` when the record does not reach back that far.
    pub(crate) fn new_infected_back(&self, days: usize) -> Option<f64> {
        self.new_infected
            .len()
            .checked_sub(days)
            .map(|i| self.new_infected[i])
    }

    /// New-admission count recorded `days` back, or `None` past the record.
    pub(crate) fn new_ic_back(&self, days: usize) -> Option<f64> {
        self.new_ic.len().checked_sub(days).map(|i| self.new_ic[i])
    }

    /// Keep only the days in `keep`, dropping everything outside it from all
    /// five series. The retained window must be non-empty and in range.
    pub(crate) fn retain_window(&mut self, keep: Range<usize>) -> anyhow::Result<()> {
        anyhow::ensure!(
            keep.start < keep.end,
            "history window {}..{} is empty",
            keep.start,
            keep.end
        );
        anyhow::ensure!(
            keep.end <= self.len(),
            "history window {}..{} exceeds the {} recorded days",
            keep.start,
            keep.end,
            self.len()
        );
        for series in [
            &mut self.infected,
            &mut self.ic,
            &mut self.susceptible,
            &mut self.new_infected,
            &mut self.new_ic,
        ] {
            series.drain(keep.end..);
            series.drain(..keep.start);
        }
        Ok(())
    }

    /// Scale the new-infection entry recorded `days_back` days before the
    /// next day (1 = most recent).
    pub(crate) fn scale_new_infected(&mut self, days_back: usize, factor: f64) -> anyhow::Result<()> {
        anyhow::ensure!(days_back >= 1, "days_back must be >= 1");
        let index = self
            .new_infected
            .len()
            .checked_sub(days_back)
            .with_context(|| {
                format!(
                    "only {} recorded days, cannot reach {} back",
                    self.len(),
                    days_back
                )
            })?;
        self.new_infected[index] *= factor;
        Ok(())
    }
}
