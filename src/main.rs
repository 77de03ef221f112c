use log::info;
use simple_logger::SimpleLogger;

use dd_rust::{Estimator, EstimatorConfig, TokenSet, CENTER};

/// Duck counts reported by the driver
const DUCK_COUNTS: std::ops::RangeInclusive<usize> = 2..=3;

fn main() {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Warn)
        .init()
        .unwrap();

    let estimator = Estimator::new(EstimatorConfig::default());
    info!("starting: {} trials per duck count", estimator.config().trials);

    for n_ducks in DUCK_COUNTS {
        let ducks = TokenSet::uniform(CENTER, n_ducks).unwrap_or_else(|e| {
            eprintln!("{}", e);
            std::process::exit(1);
        });

        let estimate = estimator.estimate(&ducks).unwrap_or_else(|e| {
            eprintln!("{}", e);
            std::process::exit(1);
        });

        println!(
            "Expected number of moves with {} ducks = {:.3}",
            n_ducks,
            estimate.mean.unwrap_or(f64::NAN)
        );
    }
}
