use colored::Colorize;
use std::thread;
use std::time::{Duration, Instant};

use conveyor_monitor::config::{load_config, Config};
use conveyor_monitor::processing::fft::dominant_frequency;
use conveyor_monitor::processing::roc::{analyze, Point};
use conveyor_monitor::processing::monitor::LOG_FILE;
use conveyor_monitor::utils::log::log_to_file;
use conveyor_monitor::{Channel, Monitor, ParameterStore};

const DEFAULT_TICKS: u64 = 50;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let result = match args.get(1).map(String::as_str) {
        Some("run") => run(&args[2..]),
        Some("analyze") => print_analysis(),
        _ => {
            println!("Please specify 'run [config.yaml] [ticks]' or 'analyze' as argument");
            return;
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

// -----------------------------------------------------------------------------
// RUN
// -----------------------------------------------------------------------------

fn run(args: &[String]) -> Result<(), String> {
    let mut config = Config::default();
    let mut ticks = DEFAULT_TICKS;
    for arg in args {
        match arg.parse::<u64>() {
            Ok(n) => ticks = n,
            Err(_) => {
                config = load_config(arg)?;
                println!("{} {}", "Loaded config from".green(), arg);
            }
        }
    }

    let store = ParameterStore::new(config.parameters.clone()).map_err(|e| e.to_string())?;
    let mut monitor = Monitor::from_config(&config).map_err(|e| e.to_string())?;
    let period = Duration::from_millis(config.monitor.tick_period_ms);

    if config.monitor.logging {
        let message = format!(
            "run started: {} ticks every {} ms, capacity {}",
            ticks, config.monitor.tick_period_ms, config.monitor.buffer_capacity
        );
        if let Err(e) = log_to_file(LOG_FILE, &message) {
            eprintln!("{} {}", "Failed to write log file:".red(), e);
        }
    }

    for channel in Channel::ALL {
        println!("{:<14} {}", channel.id().cyan(), store.formula_label(channel));
    }

    for _ in 0..ticks {
        let start = Instant::now();
        let report = monitor.tick(&store.snapshot());

        let line = report
            .updates
            .iter()
            .map(|(channel, update)| format!("{} {:.3}", channel.id().cyan(), update.latest_sample))
            .collect::<Vec<_>>()
            .join(" | ");
        println!("{} {}", format!("tick {:>4}", report.tick).bold(), line);

        if let Some(elapsed) = period.checked_sub(start.elapsed()) {
            thread::sleep(elapsed);
        }
    }

    for channel in Channel::ALL {
        let spectrum = monitor.spectrum(channel);
        match dominant_frequency(&spectrum) {
            Some(peak) => println!(
                "{:<14} {} bins, peak {:.3} Hz (magnitude {:.4})",
                channel.title().yellow(),
                spectrum.len(),
                peak.frequency,
                peak.magnitude
            ),
            None => println!("{:<14} not enough samples", channel.title().yellow()),
        }
    }

    Ok(())
}

// -----------------------------------------------------------------------------
// ANALYZE
// -----------------------------------------------------------------------------

fn print_analysis() -> Result<(), String> {
    let analysis = analyze().map_err(|e| e.to_string())?;

    println!("{}", "Laplace Domain (s-plane)".bold());
    println!("  poles: {}", format_points(&analysis.laplace.pole_points()));
    println!("  zeros: {}", format_points(&analysis.laplace.zero_points()));
    let region = &analysis.laplace_roc.region;
    println!(
        "  RoC {}: x {:.2}..{:.2}",
        analysis.laplace_roc.label.green(),
        region.x,
        region.x + region.width
    );

    println!("{}", "Z Domain (z-plane)".bold());
    println!("  poles: {}", format_points(&analysis.z.pole_points()));
    println!("  zeros: {}", format_points(&analysis.z.zero_points()));
    println!(
        "  RoC {}: {} boundary curve(s), {} shading points, unit circle {} points",
        analysis.z_roc.label.green(),
        analysis.z_roc.boundaries.len(),
        analysis.z_roc.shading.len(),
        analysis.unit_circle.len()
    );

    Ok(())
}

fn format_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|[x, y]| format!("({:.2}, {:.2})", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}
