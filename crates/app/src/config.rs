//! Configuration for the huffpack command-line tool.
//!
//! Handles parsing command-line arguments and filling in defaults. The only
//! randomized default is the size of a generated sample, which is derived
//! from the seed so that runs are reproducible.
//!
//! # Philosophy
//!
//! `huffpack compress` works with ZERO further arguments: without `--in` it
//! compresses a generated sample. All defaults are printed with
//! `--print-config`.

use huffpack_core::Flags;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

/// What the tool should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Raw bytes in, container out
    Compress,
    /// Container in, raw bytes out
    Decompress,
    /// Write a generated sample file
    Sample,
}

impl Command {
    fn parse(arg: &str) -> Option<Self> {
        match arg {
            "compress" | "c" => Some(Command::Compress),
            "decompress" | "d" => Some(Command::Decompress),
            "sample" => Some(Command::Sample),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::Compress => "compress",
            Command::Decompress => "decompress",
            Command::Sample => "sample",
        }
    }
}

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub command: Command,

    // === Files ===
    /// Input file path (None = generate sample; required for decompress)
    pub input_file: Option<PathBuf>,

    /// Output file path
    pub output_file: PathBuf,

    // === Container ===
    /// Fit a model to the input and embed it
    pub embed_model: bool,

    /// Append a CRC-32 trailer
    pub checksum: bool,

    // === Sample generation ===
    /// Seed for generated samples
    pub seed: u64,

    /// Size of a generated sample in bytes
    pub sample_bytes: usize,

    // === Behavior ===
    /// Whether to print detailed config
    pub print_config: bool,

    /// Whether to print detailed metrics summary
    pub print_metrics: bool,

    /// Number of `-v` flags
    pub verbosity: u8,
}

impl Config {
    /// Parse configuration from command-line arguments (program name excluded).
    ///
    /// The first argument must be the subcommand. If `--seed` is not given a
    /// time-based seed is used and printed with the config.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut command: Option<Command> = None;
        let mut input_file: Option<PathBuf> = None;
        let mut output_file: Option<PathBuf> = None;
        let mut embed_model = false;
        let mut checksum = false;
        let mut seed: Option<u64> = None;
        let mut sample_bytes: Option<usize> = None;
        let mut print_config = false;
        let mut print_metrics = true;
        let mut verbosity = 0u8;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--in" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--in requires a path".to_string());
                    }
                    input_file = Some(PathBuf::from(&args[i]));
                }
                "--out" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--out requires a path".to_string());
                    }
                    output_file = Some(PathBuf::from(&args[i]));
                }
                "--embed-model" => {
                    embed_model = true;
                }
                "--checksum" => {
                    checksum = true;
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--sample-bytes" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--sample-bytes requires a number".to_string());
                    }
                    sample_bytes = Some(args[i].parse().map_err(|_| "invalid sample-bytes")?);
                }
                "--print-config" => {
                    print_config = true;
                }
                "--no-metrics" => {
                    print_metrics = false;
                }
                "--verbose" => {
                    verbosity = verbosity.saturating_add(1);
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                arg if is_short_verbose(arg) => {
                    verbosity = verbosity.saturating_add((arg.len() - 1) as u8);
                }
                arg if command.is_none() && Command::parse(arg).is_some() => {
                    command = Command::parse(arg);
                }
                _ => {
                    return Err(format!("unknown argument: {}", args[i]));
                }
            }
            i += 1;
        }

        let command = command.ok_or("missing command (compress, decompress or sample)")?;
        if command == Command::Decompress && input_file.is_none() {
            return Err("decompress requires --in".to_string());
        }

        // Determine seed (explicit or time-based)
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|t| t.as_millis() as u64)
                .unwrap_or(0)
        });

        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let default_out = match command {
            Command::Compress => "./out.hpk",
            Command::Decompress => "./out.bin",
            Command::Sample => "./sample.bin",
        };

        let config = Config {
            command,
            input_file,
            output_file: output_file.unwrap_or_else(|| PathBuf::from(default_out)),
            embed_model,
            checksum,
            seed,
            sample_bytes: sample_bytes.unwrap_or_else(|| rng.gen_range(16 * 1024..=256 * 1024)),
            print_config,
            print_metrics,
            verbosity,
        };

        Ok(config)
    }

    /// Container flags selected by the options.
    pub fn flags(&self) -> Flags {
        let mut flags = Flags::NONE;
        if self.embed_model {
            flags = flags | Flags::MODEL_EMBEDDED;
        }
        if self.checksum {
            flags = flags | Flags::CHECKSUM;
        }
        flags
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Command:     {}", self.command.name());
        println!(
            "Input file:  {}",
            self.input_file
                .as_ref()
                .map_or_else(|| "(generate sample)".to_string(), |p| p.display().to_string())
        );
        println!("Output file: {}", self.output_file.display());
        println!();
        if self.command == Command::Compress {
            println!("=== Container ===");
            println!("Embed model: {}", self.embed_model);
            println!("Checksum:    {}", self.checksum);
            println!("Flags:       {:?}", self.flags());
            println!();
        }
        if self.input_file.is_none() {
            println!("=== Sample ===");
            println!("Seed: {}", self.seed);
            println!("Size: {} bytes ({} KiB)", self.sample_bytes, self.sample_bytes / 1024);
            println!();
        }
    }
}

/// `-v`, `-vv`, `-vvv`, ...
fn is_short_verbose(arg: &str) -> bool {
    arg.len() > 1 && arg.starts_with('-') && arg[1..].bytes().all(|b| b == b'v')
}

fn print_help() {
    println!("huffpack: canonical Huffman compression");
    println!();
    println!("USAGE:");
    println!("    huffpack <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    compress, c             Compress a file (or a generated sample)");
    println!("    decompress, d           Decompress a container");
    println!("    sample                  Write a generated sample file");
    println!();
    println!("OPTIONS:");
    println!("    --in <PATH>             Input file (default: generate sample)");
    println!("    --out <PATH>            Output file");
    println!("                            (default: ./out.hpk, ./out.bin, ./sample.bin)");
    println!();
    println!("    --embed-model           Fit a model to the input and embed it");
    println!("    --checksum              Append a CRC-32 of the input");
    println!();
    println!("    --seed <N>              Random seed for generated samples");
    println!("    --sample-bytes <N>      Generated sample size (default: random 16-256 KiB)");
    println!();
    println!("    --print-config          Print resolved configuration");
    println!("    --no-metrics            Don't print metrics summary");
    println!("    -v, --verbose           More log output (repeatable)");
    println!("    --help, -h              Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    huffpack compress --seed 42                         # Compress a sample");
    println!("    huffpack compress --in notes.txt --embed-model      # Ship a fitted model");
    println!("    huffpack decompress --in out.hpk --out notes.txt    # Restore");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_compress_defaults() {
        let config = Config::from_args(&args(&["compress", "--seed", "7"])).unwrap();
        assert_eq!(config.command, Command::Compress);
        assert!(config.input_file.is_none());
        assert_eq!(config.output_file, PathBuf::from("./out.hpk"));
        assert_eq!(config.flags(), Flags::NONE);
        assert!(config.print_metrics);
        assert!((16 * 1024..=256 * 1024).contains(&config.sample_bytes));
    }

    #[test]
    fn test_seeded_defaults_are_reproducible() {
        let a = Config::from_args(&args(&["sample", "--seed", "99"])).unwrap();
        let b = Config::from_args(&args(&["sample", "--seed", "99"])).unwrap();
        assert_eq!(a.sample_bytes, b.sample_bytes);
    }

    #[test]
    fn test_flags_and_verbosity() {
        let config = Config::from_args(&args(&[
            "c",
            "--embed-model",
            "--checksum",
            "-vv",
            "--verbose",
            "--no-metrics",
        ]))
        .unwrap();
        assert_eq!(config.flags(), Flags::MODEL_EMBEDDED | Flags::CHECKSUM);
        assert_eq!(config.verbosity, 3);
        assert!(!config.print_metrics);
    }

    #[test]
    fn test_decompress_requires_input() {
        assert!(Config::from_args(&args(&["decompress"])).is_err());
        let config = Config::from_args(&args(&["d", "--in", "x.hpk"])).unwrap();
        assert_eq!(config.output_file, PathBuf::from("./out.bin"));
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(Config::from_args(&args(&[])).is_err());
        assert!(Config::from_args(&args(&["compress", "--bogus"])).is_err());
        assert!(Config::from_args(&args(&["compress", "--seed"])).is_err());
        assert!(Config::from_args(&args(&["compress", "--seed", "abc"])).is_err());
        assert!(Config::from_args(&args(&["compress", "compress"])).is_err());
    }
}
