use icucast::io::report::write_run_report;
use icucast::{Population, PopulationConfig};

// Observed daily new ICU admissions at the synchronization point.
const SYNC_NEW_IC: f64 = 80.0;

const LOCKDOWN_R0: f64 = 0.9;
const OPEN_R0: f64 = 2.2;
const IC_RELAX_BELOW: f64 = 300.0;

fn main() -> anyhow::Result<()> {
    let strategy = std::env::args().nth(1).unwrap_or_else(|| "open_up".to_string());
    let days: usize = std::env::args()
        .nth(2)
        .and_then(|v| v.parse().ok())
        .unwrap_or(365);

    let mut population = Population::new(PopulationConfig::default())?;
    bootstrap(&mut population)?;

    // Lockdown starts at the end of the synchronized window.
    population.set_r0(LOCKDOWN_R0);
    population.mark_lockdown();
    population.run(60);

    match strategy.as_str() {
        "initial_outbreak" => {}
        "open_up" => {
            population.set_r0(OPEN_R0);
            population.mark_openup();
            population.run(days);
        }
        "interrupted_braking" => {
            // Flip between lockdown and open depending on the daily new
            // admissions and the current occupancy.
            for _ in 0..days {
                if population.new_ic() > SYNC_NEW_IC && population.r0() != LOCKDOWN_R0 {
                    population.set_r0(LOCKDOWN_R0);
                    population.mark_lockdown();
                } else if population.ic() < IC_RELAX_BELOW && population.r0() != OPEN_R0 {
                    population.set_r0(OPEN_R0);
                    population.mark_openup();
                }
                population.step();
            }
        }
        "titration" => {
            // Ease the reproduction number up while occupancy stays low and
            // the effective reproduction is below one.
            for _ in 0..days {
                if population.ic() < IC_RELAX_BELOW && population.r_effective() < 1.0 {
                    population.set_r0(population.r0() + 0.4);
                }
                population.step();
            }
        }
        "extensive_testing" => {
            population.set_r0(OPEN_R0);
            for _ in 0..days {
                // Half of the infections from three days ago are found and
                // isolated before they transmit further.
                population.discount_new_infections(3, 0.5)?;
                population.step();
            }
        }
        other => anyhow::bail!("unknown strategy '{}'", other),
    }

    let path = write_run_report("reports", &strategy, &population)?;

    let history = population.history();
    let (peak_day, peak_ic) = history
        .ic()
        .iter()
        .copied()
        .enumerate()
        .fold((0, 0.0_f64), |best, (day, v)| {
            if v > best.1 {
                (day, v)
            } else {
                best
            }
        });

    println!("strategy,days,peak_ic,peak_ic_day,report");
    println!(
        "{},{},{:.0},{},{}",
        strategy,
        history.len(),
        peak_ic,
        peak_day,
        path.display()
    );

    Ok(())
}

/// Step until simulated daily new admissions cross the observed value, then
/// keep the two weeks of history leading up to that point.
fn bootstrap(population: &mut Population) -> anyhow::Result<()> {
    for _ in 0..3650 {
        population.step();
        if population.new_ic() > SYNC_NEW_IC {
            let len = population.history().len();
            population.retain_history_window(len - 20..len - 5)?;
            return Ok(());
        }
    }
    anyhow::bail!("no outbreak within ten simulated years");
}
