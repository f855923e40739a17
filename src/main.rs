use std::ffi::OsString;
use std::io;
use std::iter;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use lesion_predict::output::{self, ErrorReport};
use lesion_predict::{PredictError, PredictorConfig, Result};

/// Classify one lesion image as benign or malignant and print the result as JSON
#[derive(Parser, Debug)]
#[command(author, about, long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Path to the image to classify
    image_path: PathBuf,
    /// Path to the ONNX model
    model_path: PathBuf,
    #[arg(hide = true)]
    rest: Vec<OsString>,
}

impl Cli {
    /// Parse `argv` as plain positionals: nothing is read as a flag, so paths
    /// starting with `-` and words like `--help` are taken as given.
    fn parse_positional<I>(argv: I) -> Result<Self>
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut argv = argv.into_iter();
        let argv = argv.next().into_iter().chain(iter::once("--".into())).chain(argv);

        Cli::try_parse_from(argv).map_err(|err| match err.kind() {
            ErrorKind::MissingRequiredArgument => PredictError::MissingArguments,
            _ => PredictError::Usage(err.to_string().trim_end().to_owned()),
        })
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse_positional(std::env::args_os())?;
    if !cli.rest.is_empty() {
        debug!(ignored = ?cli.rest, "extra arguments");
    }

    let config = PredictorConfig::default();
    let prediction = lesion_predict::predict(&cli.image_path, &cli.model_path, &config)?;
    output::write_line(io::stdout().lock(), &prediction)?;
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            output::write_line(io::stderr().lock(), &ErrorReport::new(&err)).ok();
            ExitCode::FAILURE
        }
    }
}
