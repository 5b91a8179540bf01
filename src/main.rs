use anyhow::Context;
use clap::Parser;
use std::process;
use yuma_tools::cli::{
    args::{Args, Commands},
    commands,
};

/// Polars display limits, applied only when the user has not set them
const POLARS_DISPLAY_DEFAULTS: &[(&str, &str)] = &[
    ("POLARS_FMT_MAX_COLS", "-1"),
    ("POLARS_FMT_MAX_ROWS", "-1"),
    ("POLARS_FMT_STR_LEN", "64"),
];

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    let Some(command) = args.command else {
        show_help_and_commands();
        process::exit(0);
    };

    configure_table_display();

    match run(command) {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(1),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Run a subcommand, returning whether every input succeeded
fn run(command: Commands) -> anyhow::Result<bool> {
    let name = match &command {
        Commands::Read(_) => "read",
        Commands::Export(_) => "export",
        Commands::Validate(_) => "validate",
    };

    let stats = commands::run(command).with_context(|| format!("yuma {} failed", name))?;
    Ok(stats.is_success())
}

/// Show whole almanac tables rather than polars' truncated preview
fn configure_table_display() {
    for (key, value) in POLARS_DISPLAY_DEFAULTS {
        if std::env::var_os(key).is_none() {
            // SAFETY: called from main before any other thread is started
            unsafe { std::env::set_var(key, value) };
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("YUMA Tools - GPS Almanac Parser");
    println!("===============================");
    println!();
    println!("Parse GPS YUMA almanac files into per-satellite tables of orbital");
    println!("and clock parameters.");
    println!();
    println!("USAGE:");
    println!("    yuma <COMMAND> [OPTIONS] <INPUTS>...");
    println!();
    println!("COMMANDS:");
    println!("    read        Parse almanac files and print their tables");
    println!("    export      Combine almanac files into one Parquet or CSV file");
    println!("    validate    Check almanac files with the strict required-field gate");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Print a table with six decimal places:");
    println!("    yuma read yumaAlmanac_2024-03-05.alm --precision 6");
    println!();
    println!("    # Export a directory of almanacs to Parquet:");
    println!("    yuma export almanacs/ --output almanacs.parquet");
    println!();
    println!("    # Validate every almanac matching a pattern:");
    println!("    yuma validate 'almanacs/*.alm'");
    println!();
    println!("For detailed help on any command, use:");
    println!("    yuma <COMMAND> --help");
}
