use anyhow::{Context, Result, bail};
use clap::Parser;
use pnmcrypt_core::{
    Lfsr, encrypt_image, file_extension, load_pnm, password_to_seed, write_pnm,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pnmcrypt")]
#[command(about = "PNM image (de|en)crypt with an LFSR keystream – CLI tool", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the PNM image to read (.pbm, .pgm or .ppm)
    #[arg(short, long)]
    input: PathBuf,

    /// Name of the file to write in the working directory, same extension as the input
    #[arg(short, long)]
    output: String,

    /// Password over A-Z a-z 0-9 + /, turned into the register seed
    #[arg(short, long)]
    password: String,

    /// Tap position, counted from the right end of the register
    #[arg(short, long, allow_hyphen_values = true)]
    tap: String,

    /// Raise log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    // Everything is validated before touching the disk
    let tap = parse_tap(&cli.tap)?;
    let input_name = cli
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    check_extensions(&input_name, &cli.output)?;
    if cli.password.is_empty() {
        bail!("The password must not be empty");
    }

    let mut image = load_pnm(&cli.input)
        .with_context(|| format!("Unable to load the file [{}]", cli.input.display()))?;

    let seed = password_to_seed(&cli.password).context("Unable to create the cipher tool")?;
    let mut lfsr = Lfsr::new(&seed, tap).context("Unable to create the cipher tool")?;

    info!("register of {} bits, tap {}", lfsr.len(), lfsr.tap());

    encrypt_image(&mut image, &mut lfsr);

    write_pnm(&image, &cli.output).with_context(|| {
        format!(
            "Unable to copy the file [{}] in [{}]",
            cli.input.display(),
            cli.output
        )
    })?;

    Ok(())
}

/// Tap must be a non-negative integer
fn parse_tap(raw: &str) -> Result<usize> {
    let value: i64 = raw
        .trim()
        .parse()
        .with_context(|| format!("No numeric value in the tap [{raw}]"))?;
    if value < 0 {
        bail!("The numeric value in the tap [{raw}] is too small. It should be >= 0");
    }
    usize::try_from(value).with_context(|| format!("The tap [{raw}] is too large"))
}

/// Input and output must both carry the same extension
fn check_extensions(input: &str, output: &str) -> Result<()> {
    let input_ext = file_extension(input).context("Argument -i invalid")?;
    let output_ext = file_extension(output).context("Argument -o invalid")?;
    if input_ext != output_ext {
        bail!(
            "The input file [{input}] and the output file [{output}] do not agree on the image format"
        );
    }
    Ok(())
}
