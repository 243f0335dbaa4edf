use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;

use log::error;

use cyborg_app::cli::{self, CliCommand};
use cyborg_app::motion::ScriptedTilt;
use cyborg_app::{runner, AppError};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        error!("{e}");
        if matches!(e, AppError::Usage(_)) {
            eprintln!("{}", cli::usage());
        }
        process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), AppError> {
    match cli::parse_args(args)? {
        CliCommand::Help => {
            eprintln!("{}", cli::usage());
            Ok(())
        }
        CliCommand::PrintConfig { config } => {
            let config = cli::load_config(config.as_deref())?;
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
        CliCommand::Run(run_args) => {
            let options = run_args.to_options()?;
            let mut motion = ScriptedTilt::default();
            match &run_args.out {
                Some(path) => {
                    let mut out = BufWriter::new(File::create(path)?);
                    runner::run(&options, &mut motion, &mut out)?;
                    out.flush()?;
                }
                None => {
                    let mut out = io::stdout().lock();
                    runner::run(&options, &mut motion, &mut out)?;
                    out.flush()?;
                }
            }
            Ok(())
        }
    }
}
