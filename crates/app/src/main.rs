//! huffpack: compress and decompress files with canonical Huffman coding.

mod config;
mod input_gen;
mod logging;

use config::{Command, Config};
use huffpack_core::default_model::default_alphabet;
use huffpack_core::{Decoder, Encoder, Model, Result};
use std::fs;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("error: {}", msg);
            eprintln!("run with --help for usage");
            return ExitCode::from(2);
        }
    };

    if !logging::init(config.verbosity) {
        eprintln!("warning: a logger was already installed");
    }
    if config.print_config {
        config.print();
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{} failed: {}", config.command.name(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<()> {
    match config.command {
        Command::Compress => compress(config),
        Command::Decompress => decompress(config),
        Command::Sample => {
            let data = input_gen::write_sample_file(
                &config.output_file,
                config.seed,
                config.sample_bytes,
            )?;
            log::info!(
                "wrote {} sample bytes to {}",
                data.len(),
                config.output_file.display()
            );
            Ok(())
        }
    }
}

fn compress(config: &Config) -> Result<()> {
    let input = match &config.input_file {
        Some(path) => fs::read(path)?,
        None => {
            log::info!(
                "no input file, generating {} bytes with seed {}",
                config.sample_bytes,
                config.seed
            );
            input_gen::generate_sample_data(config.seed, config.sample_bytes)
        }
    };

    let flags = config.flags();
    let model = if config.embed_model {
        Model::fit_to_alphabet(&default_alphabet(), &input)?
    } else {
        Model::default_model()?
    };

    let mut encoder = Encoder::with_model(Vec::new(), model);
    encoder.encode(&input, flags)?;
    let metrics = encoder.metrics().clone();
    fs::write(&config.output_file, encoder.into_inner())?;

    log::info!(
        "compressed {} bytes into {}",
        metrics.raw_bytes,
        config.output_file.display()
    );
    if config.print_metrics {
        metrics.print_summary();
    }
    Ok(())
}

fn decompress(config: &Config) -> Result<()> {
    let Some(path) = &config.input_file else {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "no input file").into());
    };
    let input = fs::read(path)?;

    let mut decoder = Decoder::new(&input[..]);
    let output = decoder.decode()?;
    fs::write(&config.output_file, &output)?;

    log::info!(
        "decompressed {} bytes into {}",
        output.len(),
        config.output_file.display()
    );
    if config.print_metrics {
        decoder.metrics().print_summary();
    }
    Ok(())
}
