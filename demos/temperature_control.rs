//! Fan controller driven by room temperature and humidity
//!
//! Demonstrates: variables → propositions → rules → query
//!
//! Run with:
//! ```bash
//! RUST_LOG=fuzzy_rule_engine=debug cargo run --example temperature_control
//! ```

use fuzzy_rule_engine::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    // 1. Inputs
    let mut system = InferenceSystem::new(EngineConfig::default().with_default_sample_count(200))?;

    let temperature = system.add_variable("temperature")?;
    let cold = temperature.add_trapezoid_set(-10.0, -10.0, 10.0, 20.0)?;
    let hot = temperature.add_trapezoid_set(15.0, 25.0, 40.0, 40.0)?;

    let humidity = system.add_variable("humidity")?;
    let dry = humidity.add_left_trapezoid_set(0.0, 30.0, 60.0)?;
    let humid = humidity.add_right_trapezoid_set(40.0, 70.0, 100.0)?;

    // 2. Output
    let speed = system.add_variable("speed")?;
    let low = speed.add_triangle_set(0.0, 10.0, 40.0)?;
    let medium = speed.add_triangle_set(20.0, 50.0, 80.0)?;
    let high = speed.add_triangle_set(60.0, 90.0, 100.0)?;

    // 3. Rules
    //   IF cold THEN low
    //   IF hot AND dry THEN medium
    //   IF hot AND fairly humid THEN high
    let if_cold = system.term(cold)?;
    let then_low = system.term(low)?;
    system.add_rule(if_cold, then_low)?;

    let if_hot = system.term(hot)?;
    let if_dry = system.term(dry)?;
    let hot_and_dry = system.and(&[if_hot, if_dry])?;
    let then_medium = system.term(medium)?;
    system.add_rule(hot_and_dry, then_medium)?;

    let hot_again = system.duplicate(if_hot)?;
    let if_humid = system.term(humid)?;
    let fairly_humid = system.fairly(if_humid)?;
    let sticky = system.and(&[hot_again, fairly_humid])?;
    let then_high = system.term(high)?;
    system.add_rule(sticky, then_high)?;

    println!(
        "{} variables, {} rules",
        system.variable_count(),
        system.rule_count()
    );

    // 4. Queries
    println!("\n{:>6} {:>6} {:>10} {:>10}", "temp", "hum", "mean-max", "centroid");
    for (t, h) in [(5.0, 50.0), (17.5, 20.0), (22.0, 45.0), (30.0, 80.0), (35.0, 10.0)] {
        system.fuzzify("temperature", t)?;
        system.fuzzify("humidity", h)?;
        let mean_max = system.defuzzify_mean_max("speed")?;
        let centroid = system.defuzzify_centroid_default("speed")?;
        println!("{:>6.1} {:>6.1} {:>10.2} {:>10.2}", t, h, mean_max, centroid);
    }

    // 5. Configuration round trip
    println!("\nconfig:\n{}", system.config().to_json()?);

    Ok(())
}
