//! Simulated match for the catapult robot.
//!
//! Plays autonomous and teleop against the SITL platform and prints the
//! effective parameters and a match summary.
//!
//! Usage:
//!   cargo run -p catapult_sitl --bin match_sim -- [OPTIONS]
//!
//! Options:
//!   --auto <S>             Autonomous length in seconds (default: 15)
//!   --teleop <S>           Teleop length in seconds (default: 120)
//!   --period-ms <MS>       Control period (default: 20)
//!   --scaled <F>           Pace against wall-clock at factor F (default: lockstep)
//!   --script <FILE>        Teleop input script (default: built-in routine)
//!   --param <NAME=VALUE>   Override a robot parameter (repeatable)

use std::env;
use std::path::PathBuf;
use std::process;

use catapult_core::parameters::RobotConfig;
use catapult_sitl::{
    build_store, parse_override, MatchConfig, MatchRunner, MatchScript, SimulatorError, TimeMode,
};
use env_logger::Env;

struct Args {
    config: MatchConfig,
    script: Option<PathBuf>,
    overrides: Vec<(String, String)>,
}

fn parse_args() -> Result<Args, SimulatorError> {
    let mut args = Args {
        config: MatchConfig::default(),
        script: None,
        overrides: Vec::new(),
    };

    let raw: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < raw.len() {
        match raw[i].as_str() {
            "--auto" => {
                i += 1;
                args.config.autonomous_s = parse_value(&raw, i, "auto")?;
            }
            "--teleop" => {
                i += 1;
                args.config.teleop_s = parse_value(&raw, i, "teleop")?;
            }
            "--period-ms" => {
                i += 1;
                let ms: u64 = parse_value(&raw, i, "period-ms")?;
                args.config.period_us = ms.checked_mul(1000).ok_or_else(|| {
                    SimulatorError::InvalidArgument("--period-ms out of range".into())
                })?;
            }
            "--scaled" => {
                i += 1;
                let factor = parse_value(&raw, i, "scaled")?;
                args.config.time_mode = TimeMode::Scaled { factor };
            }
            "--script" => {
                i += 1;
                args.script = Some(PathBuf::from(value(&raw, i, "script")?));
            }
            "--param" => {
                i += 1;
                args.overrides.push(parse_override(value(&raw, i, "param")?)?);
            }
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            other => {
                return Err(SimulatorError::InvalidArgument(format!(
                    "unknown option: {other}"
                )));
            }
        }
        i += 1;
    }

    args.config.validate()?;
    Ok(args)
}

fn value<'a>(raw: &'a [String], i: usize, name: &str) -> Result<&'a str, SimulatorError> {
    raw.get(i)
        .map(String::as_str)
        .ok_or_else(|| SimulatorError::InvalidArgument(format!("--{name} requires a value")))
}

fn parse_value<T: std::str::FromStr>(
    raw: &[String],
    i: usize,
    name: &str,
) -> Result<T, SimulatorError> {
    value(raw, i, name)?
        .parse()
        .map_err(|_| SimulatorError::InvalidArgument(format!("invalid value for --{name}")))
}

fn print_usage() {
    eprintln!(
        "Usage: match_sim [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --auto <S>             Autonomous length in seconds (default: 15)\n\
         \x20 --teleop <S>           Teleop length in seconds (default: 120)\n\
         \x20 --period-ms <MS>       Control period (default: 20)\n\
         \x20 --scaled <F>           Pace against wall-clock at factor F (default: lockstep)\n\
         \x20 --script <FILE>        Teleop input script (default: built-in routine)\n\
         \x20 --param <NAME=VALUE>   Override a robot parameter (repeatable)\n\
         \x20 -h, --help             Show this help"
    );
}

async fn run(args: Args) -> Result<(), SimulatorError> {
    let store = build_store(&args.overrides)?;
    println!("=== Parameters ===");
    for (name, value) in store.iter_all() {
        println!("{:<16} {}", name, value);
    }
    let robot_config = RobotConfig::from_store(&store);

    let script = match &args.script {
        Some(path) => MatchScript::load(path)?,
        None => MatchScript::default_teleop(),
    };

    let mut runner = MatchRunner::new(robot_config, script, args.config)?;
    let report = runner.run().await?;

    println!("=== Match Summary ===");
    println!(
        "Simulated time:      {:.2} s ({} cycles)",
        report.sim_time_s, report.ticks
    );
    println!("Autonomous phase:    {}", report.autonomous_phase);
    println!("Shots:               {}", report.shots);
    println!("Weak shots:          {}", report.weak_shots);
    println!(
        "Launch cycles:       {} completed, {} halted",
        report.launches_completed, report.launches_halted
    );
    println!("Distance driven:     {:.2} m", report.distance_m);
    println!("Final status:        {}", report.final_status);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let env = Env::default().filter_or("LOG_LEVEL", "info");
    env_logger::init_from_env(env);

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = run(args).await {
        log::error!("{e}");
        process::exit(1);
    }
}
