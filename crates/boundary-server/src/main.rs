use std::path::PathBuf;

use anyhow::Result;
use clap::{Arg, ArgMatches, Command, ValueHint};
use log::LevelFilter;

use boundary_server::commands;
use boundary_server::config::ServerConfig;
use boundary_server::server;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("BOUNDARY_LOG", "error,boundary=info"))
        .init();

    let predict = Command::new("predict")
        .about("Fit the boosted-tree classifier on a request file and print the decision boundary")
        .arg(request_arg("Path to a JSON request with trainingPoints, boundaryPoints and hyper-parameters"))
        .arg(output_arg());

    let cli = Command::new("boundary")
        .version(clap::crate_version!())
        .about("Decision-boundary playground backend")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("serve")
                .about("Start the HTTP service")
                .arg(
                    Arg::new("config")
                        .help("Path to server JSON configuration file")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("host")
                        .long("host")
                        .help("Address to bind. Overrides the host in the configuration file.")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::Hostname),
                )
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .help("Port to bind. Overrides the port in the configuration file.")
                        .value_parser(clap::value_parser!(u16)),
                )
                .arg(
                    Arg::new("workers")
                        .short('w')
                        .long("workers")
                        .help("Number of worker threads. Defaults to one per logical CPU.")
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
        .subcommand(predict);

    #[cfg(feature = "svm")]
    let cli = cli.subcommand(
        Command::new("hyperplane")
            .about("Fit a linear SVM on a points file and print its separating hyperplane")
            .arg(request_arg("Path to a JSON array of {transformedCoords, label} points"))
            .arg(output_arg()),
    );

    let matches = cli
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    match matches.subcommand() {
        Some(("serve", sub_m)) => handle_serve(sub_m),
        Some((name, sub_m)) => handle_pipeline(name, sub_m),
        None => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn request_arg(help: &'static str) -> Arg {
    Arg::new("request")
        .help(help)
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn output_arg() -> Arg {
    Arg::new("output_file")
        .short('o')
        .long("output")
        .help("Path to write the JSON response. Defaults to stdout.")
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn handle_serve(matches: &ArgMatches) -> Result<()> {
    let config_path: Option<&PathBuf> = matches.get_one("config");
    match config_path {
        Some(path) => log::info!("[Boundary::Server] Using config: {:?}", path),
        None => log::info!("[Boundary::Server] No config provided; using defaults."),
    }
    let config = ServerConfig::from_arguments(config_path, matches)?;
    actix_web::rt::System::new().block_on(server::run(config))
}

fn handle_pipeline(name: &str, matches: &ArgMatches) -> Result<()> {
    let request: &PathBuf = matches
        .get_one("request")
        .ok_or_else(|| anyhow::anyhow!("missing request file"))?;
    let output: Option<&PathBuf> = matches.get_one("output_file");

    let outcome = match name {
        "predict" => commands::run_predict(request, output),
        #[cfg(feature = "svm")]
        "hyperplane" => commands::run_hyperplane(request, output),
        _ => unreachable!(),
    };

    match outcome {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("[Boundary::{}] {:#}", name, e);
            std::process::exit(1)
        }
    }
}
