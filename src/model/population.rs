use std::ops::Range;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use statrs::distribution::Normal;

use crate::math::delay::{day_probability, DelayDistribution};
use crate::model::events::EventLog;
use crate::model::history::History;

// Offsets scanned by the infection update: 1..TRANSMISSION_LOOKBACK_DAYS
// (exclusive upper bound, 14 offsets at most).
const TRANSMISSION_LOOKBACK_DAYS: usize = 15;

// Offsets scanned by the admission sum: 1..ADMISSION_LOOKBACK_DAYS
// (exclusive upper bound, 19 offsets at most).
const ADMISSION_LOOKBACK_DAYS: usize = 20;

/// Mean and standard deviation of a normally distributed delay, in days.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelayParams {
    pub mean: f64,
    pub sd: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    // Total population; constant over the run.
    #[serde(default = "default_size")]
    pub size: u64,
    #[serde(default = "default_initial_infected")]
    pub initial_infected: u64,

    // Delay from a primary infection to the secondary infections it causes.
    #[serde(default = "default_serial_interval")]
    pub serial_interval: DelayParams,
    // Delay from infection to ICU admission, for the cases that escalate.
    #[serde(default = "default_ic_admission_delay")]
    pub ic_admission_delay: DelayParams,

    // Average length of an ICU stay, in days.
    #[serde(default = "default_max_treatment_days")]
    pub max_treatment_days: usize,

    #[serde(default = "default_r0")]
    pub r0: f64,
    // Probability that an infection eventually needs ICU care.
    #[serde(default = "default_ic_admission_probability")]
    pub ic_admission_probability: f64,
}

fn default_size() -> u64 {
    17_000_000
}

fn default_initial_infected() -> u64 {
    100
}

fn default_serial_interval() -> DelayParams {
    DelayParams { mean: 7.5, sd: 3.5 }
}

fn default_ic_admission_delay() -> DelayParams {
    DelayParams { mean: 10.0, sd: 3.5 }
}

fn default_max_treatment_days() -> usize {
    30
}

fn default_r0() -> f64 {
    2.2
}

fn default_ic_admission_probability() -> f64 {
    0.005
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            initial_infected: default_initial_infected(),
            serial_interval: default_serial_interval(),
            ic_admission_delay: default_ic_admission_delay(),
            max_treatment_days: default_max_treatment_days(),
            r0: default_r0(),
            ic_admission_probability: default_ic_admission_probability(),
        }
    }
}

impl PopulationConfig {
    pub fn check(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.size >= 1, "size must be positive");
        anyhow::ensure!(
            self.initial_infected <= self.size,
            "initial_infected exceeds size"
        );
        anyhow::ensure!(
            self.max_treatment_days >= 1,
            "max_treatment_days must be >= 1"
        );
        anyhow::ensure!(
            self.r0.is_finite() && self.r0 >= 0.0,
            "r0 must be finite and >= 0"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.ic_admission_probability),
            "ic_admission_probability must be in [0, 1]"
        );
        for delay in [&self.serial_interval, &self.ic_admission_delay] {
            anyhow::ensure!(delay.mean.is_finite(), "delay mean must be finite");
            anyhow::ensure!(delay.sd > 0.0, "delay sd must be > 0");
        }
        Ok(())
    }
}

/// The population aggregate: current scalar state plus the full daily history
/// and the externally written event log. Stepped one day at a time; between
/// steps a caller may inspect state, change `r0`, or truncate history.
pub struct Population {
    size: f64,
    infected: f64,
    ic: f64,
    r0: f64,
    ic_admission_probability: f64,
    max_treatment_days: usize,

    si_delay: Box<dyn DelayDistribution>,
    ic_delay: Box<dyn DelayDistribution>,

    // Candidate values for the day being computed; recorded at the end of
    // each step.
    new_infected: f64,
    new_ic: f64,

    history: History,
    events: EventLog,
}

impl Population {
    pub fn new(cfg: PopulationConfig) -> anyhow::Result<Self> {
        cfg.check()?;
        let si = Normal::new(cfg.serial_interval.mean, cfg.serial_interval.sd)
            .context("invalid serial interval distribution")?;
        let icu = Normal::new(cfg.ic_admission_delay.mean, cfg.ic_admission_delay.sd)
            .context("invalid ic admission delay distribution")?;
        Self::with_delays(cfg, Box::new(si), Box::new(icu))
    }

    /// Build with caller-supplied delay distributions; the delay parameters
    /// in `cfg` are ignored in favor of the passed implementations.
    pub fn with_delays(
        cfg: PopulationConfig,
        si_delay: Box<dyn DelayDistribution>,
        ic_delay: Box<dyn DelayDistribution>,
    ) -> anyhow::Result<Self> {
        cfg.check()?;
        let infected = cfg.initial_infected as f64;
        let mut population = Self {
            size: cfg.size as f64,
            infected,
            ic: 0.0,
            r0: cfg.r0,
            ic_admission_probability: cfg.ic_admission_probability,
            max_treatment_days: cfg.max_treatment_days,
            si_delay,
            ic_delay,
            new_infected: infected,
            new_ic: 0.0,
            history: History::default(),
            events: EventLog::default(),
        };
        // Day zero.
        population.record_state();
        Ok(population)
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn infected(&self) -> f64 {
        self.infected
    }

    pub fn ic(&self) -> f64 {
        self.ic
    }

    pub fn new_infected(&self) -> f64 {
        self.new_infected
    }

    pub fn new_ic(&self) -> f64 {
        self.new_ic
    }

    pub fn r0(&self) -> f64 {
        self.r0
    }

    pub fn susceptible(&self) -> f64 {
        self.size - self.infected
    }

    /// Reproduction number scaled by the susceptible fraction of the previous
    /// recorded day.
    pub fn r_effective(&self) -> f64 {
        let susceptible = self
            .history
            .susceptible()
            .last()
            .copied()
            .unwrap_or(self.size);
        self.r0 * susceptible / self.size
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Reassign the reproduction number; takes effect from the next step.
    pub fn set_r0(&mut self, r0: f64) {
        self.r0 = r0;
    }

    /// Keep only the days in `keep` across all five history series. Used by
    /// drivers to line the simulated timeline up with observed data.
    pub fn retain_history_window(&mut self, keep: Range<usize>) -> anyhow::Result<()> {
        self.history.retain_window(keep)
    }

    /// Scale the new-infection count recorded `days_back` days ago
    /// (1 = most recent). Models interventions that remove recently detected
    /// cases from the transmission chain.
    pub fn discount_new_infections(&mut self, days_back: usize, factor: f64) -> anyhow::Result<()> {
        self.history.scale_new_infected(days_back, factor)
    }

    /// Record a lockdown event at the index the next recorded day will get.
    pub fn mark_lockdown(&mut self) {
        self.events.record_lockdown(self.history.len());
    }

    /// Record an open-up event at the index the next recorded day will get.
    pub fn mark_openup(&mut self) {
        self.events.record_openup(self.history.len());
    }

    /// Advance one simulated day: new infections first, then the ICU balance
    /// (which reads only already-recorded infection history), then record.
    pub fn step(&mut self) {
        self.update_infected();
        self.update_ic();
        self.record_state();
    }

    /// Repeated sequential `step`; `run(n)` records the same history as `n`
    /// single steps.
    pub fn run(&mut self, days: usize) {
        for _ in 0..days {
            self.step();
        }
    }

    fn update_infected(&mut self) {
        // Constant within the step: reads the previous recorded day.
        let re = self.r_effective();

        let mut new_infected = 0.0;
        for day in 1..TRANSMISSION_LOOKBACK_DAYS {
            // History is contiguous from day zero, so the scan ends at the
            // first offset past the record.
            let Some(past) = self.history.new_infected_back(day) else {
                break;
            };
            new_infected += re * day_probability(self.si_delay.as_ref(), day) * past;
        }

        self.new_infected = new_infected;
        self.infected += new_infected;
    }

    fn update_ic(&mut self) {
        // Discharges: every cohort inside the treatment window releases a
        // uniform share of its admissions per day. Scanned oldest cohort
        // first; offsets past the record are skipped and the scan continues.
        let release = 1.0 / self.max_treatment_days as f64;
        let mut dismissed = 0.0;
        for day in (1..=self.max_treatment_days).rev() {
            if let Some(admitted) = self.history.new_ic_back(day) {
                dismissed += admitted * release;
            }
        }

        // Admissions: recorded infections escalate to ICU after the
        // admission delay. Same stop-at-the-record-edge scan as the
        // infection update.
        let mut new_ic = 0.0;
        for day in 1..ADMISSION_LOOKBACK_DAYS {
            let Some(past) = self.history.new_infected_back(day) else {
                break;
            };
            new_ic +=
                past * self.ic_admission_probability * day_probability(self.ic_delay.as_ref(), day);
        }

        let previous = self.history.ic().last().copied().unwrap_or(self.ic);
        self.new_ic = new_ic;
        self.ic = previous + (new_ic - dismissed);
    }

    fn record_state(&mut self) {
        self.history.push_day(
            self.infected,
            self.ic,
            self.susceptible(),
            self.new_infected,
            self.new_ic,
        );
    }
}
