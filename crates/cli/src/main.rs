//! Serial transmitter simulator CLI.
//!
//! This binary drives the transmitter model from the command line. It performs:
//! 1. **Run:** Send text, hex bytes or a file over the simulated line, print the
//!    frames recovered from the capture and the run statistics, optionally dump a VCD.
//! 2. **Divider:** Print the divider threshold and baud error for a clock/baud pair.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use uartsim_core::common::SimError;
use uartsim_core::config::{self, BitOrder, Config, LoadMode};
use uartsim_core::sim::{Simulator, VcdOptions, write_vcd};
use uartsim_core::stats::STATS_SECTIONS;

#[derive(Parser, Debug)]
#[command(
    name = "uartsim",
    author,
    version,
    about = "Clock-edge-accurate serial transmitter simulator",
    long_about = "Simulate an 8N1 shift-register transmitter and inspect the line.\n\nExamples:\n  uartsim run --text Hello\n  uartsim run --hex 5a --clock 96000 --vcd line.vcd\n  uartsim divider --clock 50000000 --baud 115200"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Transmit bytes and report what appeared on the line.
    Run {
        /// JSON configuration file (defaults apply to missing fields).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Text to send.
        #[arg(short, long, conflicts_with_all = ["hex", "file"])]
        text: Option<String>,

        /// Hex bytes to send, e.g. "5a 00 ff".
        #[arg(long, value_parser = parse_hex, conflicts_with = "file")]
        hex: Option<HexBytes>,

        /// File whose contents are sent.
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Override the clock frequency in Hz.
        #[arg(long)]
        clock: Option<u64>,

        /// Override the baud rate.
        #[arg(long)]
        baud: Option<u64>,

        /// Send data bits most-significant first.
        #[arg(long)]
        msb_first: bool,

        /// Load trigger: strobe, implicit or on-change.
        #[arg(long, value_parser = parse_load_mode)]
        load_mode: Option<LoadMode>,

        /// Let the divider free-run across loads (mistimes the first start bit).
        #[arg(long)]
        no_divider_reset: bool,

        /// Write the captured waveform as VCD.
        #[arg(long)]
        vcd: Option<PathBuf>,

        /// Include the clock signal in the VCD.
        #[arg(long, requires = "vcd")]
        vcd_clock: bool,

        /// Statistics sections to print (summary, line, contract); all if omitted.
        #[arg(long, value_delimiter = ',', value_parser = parse_section)]
        stats: Vec<String>,
    },

    /// Print the divider threshold for a clock and baud rate.
    Divider {
        /// Clock frequency in Hz.
        #[arg(long, default_value_t = 50_000_000)]
        clock: u64,

        /// Target baud rate.
        #[arg(long, default_value_t = 9600)]
        baud: u64,
    },
}

/// Bytes given on the command line in hex.
#[derive(Debug, Clone, PartialEq, Eq)]
struct HexBytes(Vec<u8>);

/// Parses whitespace-separated or packed hex bytes.
fn parse_hex(s: &str) -> Result<HexBytes, String> {
    let digits: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = digits.trim_start_matches("0x");
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("non-hex characters in {s:?}"));
    }
    if digits.len() % 2 != 0 {
        return Err(format!("odd number of hex digits in {s:?}"));
    }
    digits
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            let pair = String::from_utf8_lossy(pair);
            u8::from_str_radix(&pair, 16).map_err(|e| format!("bad hex byte {pair:?}: {e}"))
        })
        .collect::<Result<Vec<u8>, String>>()
        .map(HexBytes)
}

/// Accepts a statistics section name listed in [`STATS_SECTIONS`].
fn parse_section(s: &str) -> Result<String, String> {
    let name = s.trim().to_ascii_lowercase();
    if STATS_SECTIONS.contains(&name.as_str()) {
        Ok(name)
    } else {
        Err(format!(
            "unknown statistics section {s:?} (expected one of: {})",
            STATS_SECTIONS.join(", ")
        ))
    }
}

/// Parses a load mode name.
fn parse_load_mode(s: &str) -> Result<LoadMode, String> {
    match s.to_ascii_lowercase().as_str() {
        "strobe" => Ok(LoadMode::Strobe),
        "implicit" => Ok(LoadMode::Implicit),
        "on-change" | "onchange" | "change" => Ok(LoadMode::OnChange),
        other => Err(format!("unknown load mode {other:?}")),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run {
            config,
            text,
            hex,
            file,
            clock,
            baud,
            msb_first,
            load_mode,
            no_divider_reset,
            vcd,
            vcd_clock,
            stats,
        } => {
            let overrides = Overrides {
                clock,
                baud,
                msb_first,
                load_mode,
                no_divider_reset,
            };
            let vcd = vcd.map(|path| (path, VcdOptions { include_clock: vcd_clock }));
            load_payload(text, hex, file).and_then(|payload| {
                cmd_run(config.as_ref(), &overrides, &payload, vcd, &stats)
            })
        }
        Commands::Divider { clock, baud } => cmd_divider(clock, baud),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[!] {e}");
            ExitCode::FAILURE
        }
    }
}

/// Command-line overrides applied on top of the configuration file.
#[derive(Debug)]
struct Overrides {
    clock: Option<u64>,
    baud: Option<u64>,
    msb_first: bool,
    load_mode: Option<LoadMode>,
    no_divider_reset: bool,
}

impl Overrides {
    fn apply(&self, config: &mut Config) {
        if let Some(clock) = self.clock {
            config.clock.frequency_hz = clock;
        }
        if let Some(baud) = self.baud {
            config.serial.baud_rate = baud;
        }
        if self.msb_first {
            config.serial.bit_order = BitOrder::Msb;
        }
        if let Some(mode) = self.load_mode {
            config.serial.load_mode = mode;
        }
        if self.no_divider_reset {
            config.serial.reset_divider_on_load = false;
        }
    }
}

/// Resolves the bytes to send from the mutually exclusive inputs.
fn load_payload(
    text: Option<String>,
    hex: Option<HexBytes>,
    file: Option<PathBuf>,
) -> Result<Vec<u8>, SimError> {
    if let Some(text) = text {
        return Ok(text.into_bytes());
    }
    if let Some(HexBytes(bytes)) = hex {
        return Ok(bytes);
    }
    if let Some(path) = file {
        return Ok(fs::read(path)?);
    }
    // Palindromic test byte: identical in either bit order.
    Ok(vec![0x81])
}

/// Loads the configuration file, if any, and applies overrides.
fn load_config(path: Option<&PathBuf>, overrides: &Overrides) -> Result<Config, SimError> {
    let mut config = match path {
        Some(path) => Config::from_json(&fs::read_to_string(path)?)?,
        None => Config::default(),
    };
    overrides.apply(&mut config);
    config.validate()?;
    Ok(config)
}

/// Sends `payload` and reports the recovered frames and statistics.
fn cmd_run(
    config_path: Option<&PathBuf>,
    overrides: &Overrides,
    payload: &[u8],
    vcd: Option<(PathBuf, VcdOptions)>,
    sections: &[String],
) -> Result<(), SimError> {
    let config = load_config(config_path, overrides)?;
    let threshold = config.divider_threshold()?;

    println!(
        "Configuration: clock {} Hz  baud {}  divider {}  order {:?}  load {:?}",
        config.clock.frequency_hz,
        config.serial.baud_rate,
        threshold,
        config.serial.bit_order,
        config.serial.load_mode
    );

    let mut sim = Simulator::new(&config)?;
    sim.queue(payload);
    let cycles = sim.run_until_idle()?;
    info!(cycles, bytes = payload.len(), "transmission finished");

    println!();
    println!("[*] Sent {} byte(s) in {} cycles", sim.sent().len(), cycles);
    let order = sim.tx.bit_order();
    for captured in sim.captured_frames() {
        let data = captured
            .frame
            .data(order)
            .map_or_else(|| "framing error".to_string(), |b| format!("{b:#04x}"));
        println!("  @{:<12} {}  -> {}", captured.start, captured.frame, data);
    }

    if let Some((path, options)) = vcd {
        let mut out = BufWriter::new(File::create(&path)?);
        write_vcd(&sim.waveform, sim.clock_hz(), options, &mut out)?;
        println!("[*] Waveform written to {}", path.display());
    }

    sim.stats.print_sections(sections, sim.clock_hz());
    Ok(())
}

/// Prints the divider threshold and the baud error it introduces.
fn cmd_divider(clock: u64, baud: u64) -> Result<(), SimError> {
    let mut settings = Config::default();
    settings.clock.frequency_hz = clock;
    settings.serial.baud_rate = baud;
    let threshold = settings.divider_threshold()?;
    println!("clock      {clock} Hz");
    println!("baud       {baud}");
    println!("divider    {threshold}");
    println!(
        "actual     {:.2} baud ({:+.4}%)",
        config::effective_baud(clock, threshold),
        config::baud_error_percent(clock, baud, threshold)
    );
    Ok(())
}
