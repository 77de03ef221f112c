// Scenario Runner - Load and execute scenario YAML files
//
// Usage:
//   cargo run --bin scenario_runner scenarios/delirious_ducks.yaml
//   cargo run --bin scenario_runner scenarios/  (runs all .yaml files in directory)
//   cargo run --bin scenario_runner scenarios/corner_start.yaml --seed 0x1234...

mod duck_walk;

use dd_rust::Coordinate;
use duck_walk::{DuckWalkConfig, DuckWalkRunner};
use simple_logger::SimpleLogger;
use std::env;
use std::fs;
use std::path::Path;

/// Scenario file format
#[derive(Debug, serde::Deserialize)]
struct ScenarioFile {
    /// Scenario metadata
    #[serde(default)]
    meta: ScenarioMeta,

    /// Configuration overrides
    config: ScenarioConfig,
}

#[derive(Debug, Default, serde::Deserialize)]
struct ScenarioMeta {
    name: Option<String>,
    description: Option<String>,
    hypothesis: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ScenarioConfig {
    #[serde(default = "default_trials")]
    trials: u64,

    #[serde(default = "default_token_counts")]
    token_counts: Vec<usize>,

    /// Starting cell as [x, y]
    #[serde(default = "default_start")]
    start: [i8; 2],

    #[serde(default)]
    max_steps: Option<u64>,

    #[serde(default)]
    verbose: bool,

    #[serde(default)]
    compare_exact: bool,
}

fn default_trials() -> u64 {
    DuckWalkConfig::default().trials
}

fn default_token_counts() -> Vec<usize> {
    DuckWalkConfig::default().token_counts
}

fn default_start() -> [i8; 2] {
    [1, 1]
}

fn main() {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <scenario.yaml | directory/> [--seed SEED_HEX]", args[0]);
        eprintln!("\nExamples:");
        eprintln!("  {} scenarios/delirious_ducks.yaml", args[0]);
        eprintln!("  {} scenarios/", args[0]);
        eprintln!("  {} scenarios/corner_start.yaml --seed 0x123456...", args[0]);
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);

    // Parse optional seed
    let seed: Option<[u8; 32]> = if args.len() >= 4 && args[2] == "--seed" {
        Some(parse_seed_hex(&args[3]).unwrap_or_else(|e| {
            eprintln!("Invalid hex seed: {}", e);
            std::process::exit(1);
        }))
    } else {
        None
    };

    if path.is_file() {
        run_scenario_file(path, seed);
    } else if path.is_dir() {
        run_scenario_directory(path, seed);
    } else {
        eprintln!("Error: Path does not exist: {}", path.display());
        std::process::exit(1);
    }
}

fn run_scenario_directory(dir: &Path, seed: Option<[u8; 32]>) {
    let mut scenarios = Vec::new();

    // Find all .yaml files
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            let ext = path.extension().and_then(|s| s.to_str());
            if ext == Some("yaml") || ext == Some("yml") {
                scenarios.push(path);
            }
        }
    }

    scenarios.sort();

    if scenarios.is_empty() {
        eprintln!("No .yaml files found in {}", dir.display());
        std::process::exit(1);
    }

    println!("Found {} scenario(s) to run\n", scenarios.len());

    for (i, scenario_path) in scenarios.iter().enumerate() {
        println!("\n{}/{} Running: {}\n", i + 1, scenarios.len(), scenario_path.display());
        run_scenario_file(scenario_path, seed);
    }
}

fn run_scenario_file(path: &Path, seed: Option<[u8; 32]>) {
    println!("Loading scenario from: {}", path.display());

    let yaml_content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {}", path.display(), e);
        std::process::exit(1);
    });

    let scenario: ScenarioFile = serde_yaml::from_str(&yaml_content).unwrap_or_else(|e| {
        eprintln!("Failed to parse {}: {}", path.display(), e);
        std::process::exit(1);
    });

    let config = build_config(&scenario.config, seed).unwrap_or_else(|e| {
        eprintln!("Invalid scenario {}: {}", path.display(), e);
        std::process::exit(1);
    });

    match scenario.meta.name {
        Some(ref name) => println!("\n== {} ==\n", name),
        None => println!("\n== {} ==\n", path.display()),
    }
    if let Some(ref desc) = scenario.meta.description {
        println!("{}\n", desc);
    }
    if let Some(ref hypothesis) = scenario.meta.hypothesis {
        println!("Hypothesis:");
        println!("  {}\n", hypothesis);
    }

    println!("Configuration:");
    println!("  Trials: {}", config.trials);
    println!("  Duck counts: {:?}", config.token_counts);
    println!("  Start: {}", config.start);
    println!("  Step cap: {:?}", config.max_steps);
    println!("\nStarting simulation...\n");

    let runner = DuckWalkRunner::new(config);
    let result = runner.run().unwrap_or_else(|e| {
        eprintln!("Simulation failed: {}", e);
        std::process::exit(1);
    });

    result.print_summary();

    println!("\n✓ Scenario complete!\n");
}

fn build_config(
    scenario: &ScenarioConfig,
    seed: Option<[u8; 32]>,
) -> Result<DuckWalkConfig, dd_rust::DuckError> {
    let [x, y] = scenario.start;
    Ok(DuckWalkConfig {
        trials: scenario.trials,
        token_counts: scenario.token_counts.clone(),
        start: Coordinate::new(x, y)?,
        seed,
        max_steps: scenario.max_steps,
        verbose: scenario.verbose,
        compare_exact: scenario.compare_exact,
    })
}

fn parse_seed_hex(hex: &str) -> Result<[u8; 32], std::num::ParseIntError> {
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    let mut seed = [0u8; 32];

    for (i, chunk) in hex.as_bytes().chunks(2).take(32).enumerate() {
        let byte_str = String::from_utf8_lossy(chunk);
        seed[i] = u8::from_str_radix(&byte_str, 16)?;
    }

    Ok(seed)
}
