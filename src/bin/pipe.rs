// Filter: reads all of stdin, writes Morse (or decoded text) to stdout.
//   echo 你好 | cargo run --bin morse_pipe
//   echo "-. .. ...--" | cargo run --bin morse_pipe -- --decode
use clap::Parser;
use morse_core::{is_morse_code, EngineConfig, MorseEngine};
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "morse_pipe", version, about = "Text <-> Pinyin Morse filter")]
struct Args {
    /// Engine configuration file
    #[arg(short, long, default_value = "engine.json")]
    config: PathBuf,

    /// Decode Morse instead of encoding text
    #[arg(short, long, conflicts_with = "auto")]
    decode: bool,

    /// Pick the direction from the input
    #[arg(short, long)]
    auto: bool,

    /// Print only the decoded text, without the guess block
    #[arg(long)]
    no_guesses: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = EngineConfig::load_or_default(&args.config)?;
    let engine = MorseEngine::from_snapshot_or_sources(&config)?;

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    let input = input.trim_end();

    let decode = args.decode || (args.auto && is_morse_code(input));
    let output = if decode {
        let decoded = engine.decode(input);
        if args.no_guesses {
            decoded.text
        } else {
            decoded.to_string()
        }
    } else {
        engine.encode(input)
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{output}")?;
    stdout.flush()?;
    Ok(())
}
