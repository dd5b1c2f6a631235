use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use directex::path::FileFormat;

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct TripPathLoadError(PathBuf, #[source] directex::Error);

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Auto,
    Xml,
    XmlGz,
    XmlBz2,
}

impl From<Format> for FileFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Auto => FileFormat::Unknown,
            Format::Xml => FileFormat::Xml,
            Format::XmlGz => FileFormat::XmlGz,
            Format::XmlBz2 => FileFormat::XmlBz2,
        }
    }
}

#[derive(Parser)]
struct Cli {
    /// The path to the trip path file
    trip_path_file: PathBuf,

    /// Units of lengths: metric/kilometers/km or imperial/miles/mi
    #[arg(long, default_value = "metric")]
    units: String,

    /// Language of instructions, as a BCP 47 tag
    #[arg(long, default_value = "en-US")]
    language: String,

    /// Format of the trip path file
    #[arg(long, value_enum, default_value_t = Format::Auto)]
    format: Format,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    colog::init();
    let cli = Cli::parse();

    let path = load_trip_path(&cli.trip_path_file, cli.format.into())?;
    let options = directex::Options::from_request(&cli.units, &cli.language);
    let directions = directex::build_directions(&options, &path)?;

    println!("{}", serde_json::to_string_pretty(&directions)?);
    Ok(())
}

fn load_trip_path<P: AsRef<Path>>(
    path: P,
    format: FileFormat,
) -> Result<directex::TripPath, TripPathLoadError> {
    match directex::path::read_from_file(path.as_ref(), format) {
        Ok(trip_path) => Ok(trip_path),
        Err(e) => Err(TripPathLoadError(PathBuf::from(path.as_ref()), e)),
    }
}
