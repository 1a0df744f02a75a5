//! Command-line interface definition

use clap::{Arg, ArgAction, Command as ClapCommand};

/// Build the argument parser for the haarkit binary
pub fn build_cli() -> ClapCommand {
    ClapCommand::new("HaarKit")
        .version("0.1")
        .author("Maurice Schilpp")
        .about("Compute, list and draw Haar-like features of images")
        .arg(
            Arg::new("input")
                .help("Input image file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("window")
                .short('w')
                .long("window")
                .help("Detection window as 'row,col,width,height' (default: whole image)")
                .value_name("R,C,W,H")
                .required(false),
        )
        .arg(
            Arg::new("types")
                .short('t')
                .long("types")
                .help("Comma separated feature types (type-2-x, type-2-y, type-3-x, type-3-y, type-4)")
                .value_name("TYPES")
                .required(false),
        )
        .arg(
            Arg::new("coords")
                .long("coords")
                .help("Write feature coordinates instead of feature values")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("draw")
                .short('d')
                .long("draw")
                .help("Draw the features of a single type over the image into this PNG")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("max-features")
                .long("max-features")
                .help("Number of randomly chosen features to draw")
                .value_name("N")
                .required(false),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Seed for choosing the drawn features")
                .value_name("SEED")
                .required(false),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file (default: stdout)")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .help("Output format (csv, json, npy)")
                .value_name("FORMAT")
                .required(false),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("TOML configuration file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Write log records to this file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("report")
                .long("report")
                .help("Write a run report to this file")
                .value_name("FILE")
                .required(false),
        )
}
