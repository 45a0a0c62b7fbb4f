use std::time::Instant;

use icucast::{Population, PopulationConfig};

fn main() -> anyhow::Result<()> {
    let days = 20_000;
    let mut population = Population::new(PopulationConfig::default())?;

    let start = Instant::now();
    population.run(days);
    let elapsed = start.elapsed();

    println!("days,total_ms,us_per_day");
    let ms = elapsed.as_secs_f64() * 1000.0;
    println!("{},{:.3},{:.3}", days, ms, ms * 1000.0 / days as f64);

    Ok(())
}
