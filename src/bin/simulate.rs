//! Pet balance simulator CLI.
//!
//! Run Monte Carlo simulations of owners finding, raising and losing pets.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                    # Default: 1000 owners, 90 days
//!   cargo run --bin simulate -- -n 100 -d 30   # 100 owners for 30 days
//!   cargo run --bin simulate -- --seed 42      # Reproducible run

use petkeeper::config::EngineConfig;
use petkeeper::simulator::{run_simulation, SimConfig};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              PET BALANCE SIMULATOR                            ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Days:           {}", config.days);
    println!("  Searches/Day:   {}", config.searches_per_day);
    println!("  Treats/Day:     {}", config.treats_per_day);
    println!(
        "  Owner Level:    {} (+{}/day)",
        config.starting_owner_level, config.owner_levels_per_day
    );
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = match run_simulation(&config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Simulation failed: {}", e);
            std::process::exit(1);
        }
    };

    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "pet_sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, json) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => eprintln!("Failed to write JSON report: {}", e),
        }
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-d" | "--days" => {
                if i + 1 < args.len() {
                    config.days = args[i + 1].parse().unwrap_or(90);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--searches" => {
                if i + 1 < args.len() {
                    config.searches_per_day = args[i + 1].parse().unwrap_or(3);
                    i += 1;
                }
            }
            "--treats" => {
                if i + 1 < args.len() {
                    config.treats_per_day = args[i + 1].parse().unwrap_or(2);
                    i += 1;
                }
            }
            "--level" => {
                if i + 1 < args.len() {
                    config.starting_owner_level = args[i + 1].parse().unwrap_or(0);
                    i += 1;
                }
            }
            "--config" => {
                if i + 1 < args.len() {
                    match EngineConfig::load(Path::new(&args[i + 1])) {
                        Ok(engine) => config.engine = engine,
                        Err(e) => {
                            eprintln!("Could not load {}: {}", args[i + 1], e);
                            std::process::exit(1);
                        }
                    }
                    i += 1;
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--quick" => {
                config = SimConfig::quick();
            }
            "--long" => {
                config = SimConfig::long_haul();
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Pet Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of simulated owners (default: 1000)");
    println!("    -d, --days <D>      Days per run (default: 90)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    --searches <N>      Searches per day (default: 3)");
    println!("    --treats <N>        Treats per active pet per day (default: 2)");
    println!("    --level <L>         Starting owner level (default: 0)");
    println!("    --config <FILE>     Load tuning tables from a JSON file");
    println!("    -v, --verbose       Print one line per run");
    println!("    --json              Save JSON report");
    println!("    --quick             Quick test (100 owners, 30 days)");
    println!("    --long              Long test (200 owners, 365 days)");
    println!("    -h, --help          Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                    # Default run");
    println!("    cargo run --bin simulate -- -n 100 -d 30   # 100 owners for 30 days");
    println!("    cargo run --bin simulate -- --seed 42      # Reproducible");
    println!("    cargo run --bin simulate -- --quick        # Quick balance check");
    println!("    cargo run --bin simulate -- --long --json  # Year-long run with JSON");
}
