use clap::Parser;
use dirsort::cli::{Args, init_logging, run_cli_with_config};
use dirsort::config::SortConfig;
use dirsort::output::OutputFormatter;
use std::process;
use std::time::Instant;

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    let config = match SortConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            OutputFormatter::error(&format!("Error loading configuration: {}", e));
            process::exit(1);
        }
    };
    let level = match args.log_level(&config) {
        Ok(level) => level,
        Err(e) => {
            OutputFormatter::error(&e);
            process::exit(1);
        }
    };
    init_logging(level);

    let start = Instant::now();
    if let Err(e) = run_cli_with_config(args.command(), &args.target_dir, &config) {
        OutputFormatter::error(&e);
        process::exit(1);
    }
    println!(
        "Finished in {:.2} second(s)",
        start.elapsed().as_secs_f64()
    );
}
