use clap::Parser;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use morse_core::{is_morse_code, EngineConfig, KeyingSchedule, MorseEngine};
use std::io::{stdin, stdout, Write};
use std::path::PathBuf;

/// Interactive Morse console: type text to encode it, or Morse to decode it.
#[derive(Parser)]
#[command(name = "morse_engine", version)]
struct Args {
    /// Engine configuration file
    #[arg(short, long, default_value = "engine.json")]
    config: PathBuf,
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let config = match EngineConfig::load_or_default(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[ERROR] Could not read config '{}': {}", args.config.display(), e);
            std::process::exit(1);
        }
    };
    let engine = match MorseEngine::from_snapshot_or_sources(&config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("[ERROR] Could not load tables: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&engine, &config) {
        eprintln!("[ERROR] {}", e);
        std::process::exit(1);
    }
}

fn run(engine: &MorseEngine, config: &EngineConfig) -> std::io::Result<()> {
    let mut last_output = String::new();

    loop {
        print_ui(&last_output)?;

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }
        let cmd = input.trim_end_matches(['\r', '\n']);

        last_output = match cmd {
            "exit" => break,
            "" => continue,
            s if s.starts_with(":e ") => engine.encode(&s[3..]),
            s if s.starts_with(":d ") => engine.decode(&s[3..]).to_string(),
            s if s.starts_with(":t ") => describe_schedule(&KeyingSchedule::plan(&s[3..], &config.timing)),
            s if is_morse_code(s) => engine.decode(s).to_string(),
            s => engine.encode(s),
        };
    }

    println!("\nBye.");
    Ok(())
}

fn describe_schedule(schedule: &KeyingSchedule) -> String {
    format!(
        "{} tones, {:.1} s total",
        schedule.tones.len(),
        schedule.total.as_secs_f64()
    )
}

fn print_ui(last_output: &str) -> std::io::Result<()> {
    let mut out = stdout();
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    println!("{}", "Pinyin Morse Console".bold());
    println!("---------------------------------------------------------------");
    println!("Type text to encode or Morse to decode, then press [Enter].");
    println!("Force a direction with ':e <text>' / ':d <morse>'; ':t <morse>' times it.");
    println!("'exit' to quit.\n");

    if !last_output.is_empty() {
        println!("{}", "Result:".cyan());
        println!("{}\n", last_output);
    }
    print!("> ");
    out.flush()
}

fn init_tracing() {
    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
