//! Tide CLI

use tidec::commands::{eval_code, run_file};
use tidec::{init_tracing, RunOptions};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let mut options = RunOptions::default();
    let code = match args[1].as_str() {
        "run" => {
            let mut file_path = None;
            for arg in args.iter().skip(2) {
                if arg == "--legacy-exit" {
                    options.legacy.exit_as_return = true;
                } else if !arg.starts_with('-') && file_path.is_none() {
                    file_path = Some(arg.as_str());
                }
            }
            let Some(path) = file_path else {
                eprintln!("error: missing file path");
                eprintln!("Usage: tide run <file.tide> [--legacy-exit]");
                std::process::exit(1);
            };
            run_file(path, &options)
        }
        "eval" => {
            let Some(code) = args.get(2) else {
                eprintln!("Usage: tide eval <code>");
                std::process::exit(1);
            };
            eval_code(code, &options)
        }
        "help" | "--help" | "-h" => {
            print_usage();
            0
        }
        "version" | "--version" | "-V" => {
            println!("tide {}", env!("CARGO_PKG_VERSION"));
            0
        }
        other => {
            // Shorthand: `tide file.tide` runs the file.
            if std::path::Path::new(other).exists() {
                run_file(other, &options)
            } else {
                eprintln!("Unknown command: {other}");
                print_usage();
                1
            }
        }
    };
    std::process::exit(code);
}

fn print_usage() {
    println!("Tide interpreter");
    println!();
    println!("Usage: tide <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file>       Run a source file");
    println!("  eval <code>      Evaluate code and print the result");
    println!("  help             Show this help message");
    println!("  version          Show version information");
    println!();
    println!("Options:");
    println!("  --legacy-exit    EXIT unwinds as RETURN");
    println!();
    println!("Set TIDE_LOG (e.g. TIDE_LOG=tide_eval=debug) for evaluation traces.");
}
