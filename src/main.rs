use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use telemetry_formatter::logging::{log_debug, log_error, log_warn};
use telemetry_formatter::util::hex::{decode_frame_hex, encode_hex_upper};
use telemetry_formatter::{
    encode_measurement, init_logger, log_info, CommandRecord, DownlinkInput, FormatterConfig,
    IntervalPolicy, Measurement, PayloadFormatter, UplinkInput,
};

#[derive(Parser)]
#[command(name = "telemetry-formatter")]
#[command(about = "Uplink decoder and downlink encoder for the 8-byte sensor frame")]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Reject SET_INTERVAL values outside 1..=65535 instead of truncating
    #[arg(long, global = true)]
    strict_interval: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a hex uplink, e.g. 00FF025801F404B0 ("" is an empty frame)
    Decode { hex: String },
    /// Decode a JSON uplink envelope read from stdin
    DecodeJson,
    /// Encode a downlink command
    Encode {
        #[arg(short, long)]
        command: String,
        #[arg(short, long, allow_negative_numbers = true)]
        interval: Option<i64>,
    },
    /// Encode a JSON downlink envelope read from stdin
    EncodeJson,
    /// Build the uplink frame a device would send for the given values
    Simulate {
        #[arg(long, allow_negative_numbers = true)]
        temperature: f64,
        #[arg(long)]
        humidity: f64,
        #[arg(long, allow_negative_numbers = true)]
        current: f64,
        #[arg(long)]
        pressure: f64,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<FormatterConfig> {
    let mut config = match &cli.config {
        Some(path) => FormatterConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => FormatterConfig::default(),
    };
    if cli.strict_interval {
        config.interval_policy = IntervalPolicy::Strict;
    }
    log_debug(&format!("Using {config:?}"));
    Ok(config)
}

fn read_stdin() -> anyhow::Result<String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("reading envelope from stdin")?;
    Ok(input)
}

fn main() -> anyhow::Result<()> {
    init_logger();

    run(Cli::parse()).inspect_err(|e| log_error(&format!("{e:#}")))
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let formatter = PayloadFormatter::new(&load_config(&cli)?);

    match cli.command {
        Commands::Decode { hex } => {
            let bytes = decode_frame_hex(&hex).context("parsing uplink hex")?;
            let result = formatter.decode_uplink(&UplinkInput {
                bytes,
                ..Default::default()
            });
            if !result.warnings.is_empty() {
                log_warn(&result.warnings.join("; "));
            }
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::DecodeJson => {
            println!("{}", formatter.decode_uplink_json(&read_stdin()?)?);
        }
        Commands::Encode { command, interval } => {
            let frame = formatter.encode_downlink(&DownlinkInput {
                data: CommandRecord {
                    command: Some(command),
                    interval,
                },
            });
            log_info(&format!("Downlink {}", encode_hex_upper(&frame.bytes)));
            println!("{}", serde_json::to_string_pretty(&frame)?);
        }
        Commands::EncodeJson => {
            println!("{}", formatter.encode_downlink_json(&read_stdin()?)?);
        }
        Commands::Simulate {
            temperature,
            humidity,
            current,
            pressure,
        } => {
            let frame = encode_measurement(&Measurement {
                temperature,
                humidity,
                current,
                pressure,
            });
            println!("{}", encode_hex_upper(&frame));
        }
    }

    Ok(())
}
