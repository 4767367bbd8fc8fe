use anyhow::Result;
use clap::{Arg, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::io;
use std::path::PathBuf;

use shopper_cli::lookup::input::config_from_arguments;
use shopper_cli::lookup::run::{run_build_similarity, run_products, run_recommend, run_segment};
use shopper_cli::util::table_format;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("SHOPPER_LOG", "error,shopper=info"))
        .init();

    let matches = Command::new("shopper")
        .version(clap::crate_version!())
        .about("\u{1F6D2} Shopper Spectrum - Product Recommendation & Customer Segmentation")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(with_catalog_args(
            Command::new("products").about("List every product known to the similarity matrix"),
        ))
        .subcommand(
            with_catalog_args(
                Command::new("recommend")
                    .about("Recommend the products most similar to a given product")
                    .arg(
                        Arg::new("product")
                            .help("Product description to find similar products for")
                            .required(true)
                            .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                    )
                    .arg(
                        Arg::new("top_k")
                            .short('k')
                            .long("top-k")
                            .help("Number of recommendations to return. Overrides the config file.")
                            .value_parser(clap::value_parser!(usize)),
                    ),
            ),
        )
        .subcommand(
            with_config_arg(
                Command::new("segment")
                    .about("Predict the customer segment from recency, frequency and monetary values")
                    .arg(
                        Arg::new("recency")
                            .short('r')
                            .long("recency")
                            .help("Days since last purchase")
                            .required(true)
                            .allow_negative_numbers(true)
                            .value_parser(clap::value_parser!(f64)),
                    )
                    .arg(
                        Arg::new("frequency")
                            .short('f')
                            .long("frequency")
                            .help("Number of purchases")
                            .required(true)
                            .allow_negative_numbers(true)
                            .value_parser(clap::value_parser!(f64)),
                    )
                    .arg(
                        Arg::new("monetary")
                            .short('m')
                            .long("monetary")
                            .help("Total spend")
                            .required(true)
                            .allow_negative_numbers(true)
                            .value_parser(clap::value_parser!(f64)),
                    )
                    .arg(
                        Arg::new("scaler")
                            .long("scaler")
                            .help("Path to the scaler artifact (JSON). Overrides the config file.")
                            .value_parser(clap::builder::NonEmptyStringValueParser::new())
                            .value_hint(ValueHint::FilePath),
                    )
                    .arg(
                        Arg::new("cluster_model")
                            .long("cluster-model")
                            .help("Path to the cluster model artifact (JSON). Overrides the config file.")
                            .value_parser(clap::builder::NonEmptyStringValueParser::new())
                            .value_hint(ValueHint::FilePath),
                    ),
            ),
        )
        .subcommand(
            with_config_arg(
                Command::new("build-similarity")
                    .about("Build the product similarity table from transactions and write it to disk")
                    .arg(
                        Arg::new("transactions")
                            .short('t')
                            .long("transactions")
                            .help("Path to the transactions file (*.csv or *.tsv). Overrides the config file.")
                            .value_parser(clap::builder::NonEmptyStringValueParser::new())
                            .value_hint(ValueHint::FilePath),
                    )
                    .arg(
                        Arg::new("output_file")
                            .short('o')
                            .long("output")
                            .help("Path to write the similarity table (*.csv or *.tsv)")
                            .required(true)
                            .value_parser(clap::value_parser!(PathBuf))
                            .value_hint(ValueHint::FilePath),
                    ),
            ),
        )
        .get_matches();

    let result = match matches.subcommand() {
        Some(("products", sub_m)) => handle_products(sub_m),
        Some(("recommend", sub_m)) => handle_recommend(sub_m),
        Some(("segment", sub_m)) => handle_segment(sub_m),
        Some(("build-similarity", sub_m)) => handle_build_similarity(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    };

    if let Err(e) = result {
        log::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn with_config_arg(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("config")
            .short('c')
            .long("config")
            .help("Path to the engine configuration file (JSON)")
            .value_parser(clap::value_parser!(PathBuf))
            .value_hint(ValueHint::FilePath),
    )
}

/// Arguments for commands that need the product similarity matrix.
fn with_catalog_args(cmd: Command) -> Command {
    with_config_arg(cmd)
        .arg(
            Arg::new("transactions")
                .short('t')
                .long("transactions")
                .help("Path to the transactions file (*.csv or *.tsv). Overrides the config file.")
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .value_hint(ValueHint::FilePath)
                .conflicts_with("similarity_table"),
        )
        .arg(
            Arg::new("similarity_table")
                .short('s')
                .long("similarity-table")
                .help("Path to a precomputed similarity table. Overrides the config file.")
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .value_hint(ValueHint::FilePath),
        )
}

fn handle_products(matches: &ArgMatches) -> Result<()> {
    let config = config_from_arguments(matches)?;
    run_products(&config, &mut io::stdout().lock())
}

fn handle_recommend(matches: &ArgMatches) -> Result<()> {
    let product: &String = matches
        .get_one("product")
        .expect("product is a required argument");
    let config = config_from_arguments(matches)?;
    log::info!("[Shopper] Recommending products similar to '{}'", product);
    run_recommend(&config, product, &mut io::stdout().lock())
}

fn handle_segment(matches: &ArgMatches) -> Result<()> {
    let recency = *matches.get_one::<f64>("recency").expect("required argument");
    let frequency = *matches.get_one::<f64>("frequency").expect("required argument");
    let monetary = *matches.get_one::<f64>("monetary").expect("required argument");
    let config = config_from_arguments(matches)?;
    run_segment(&config, recency, frequency, monetary, &mut io::stdout().lock())
}

fn handle_build_similarity(matches: &ArgMatches) -> Result<()> {
    let output: &PathBuf = matches
        .get_one("output_file")
        .expect("output is a required argument");
    table_format("output", output)?;
    let config = config_from_arguments(matches)?;
    log::info!("[Shopper] Building similarity table into {:?}", output);
    run_build_similarity(&config, output)
}
