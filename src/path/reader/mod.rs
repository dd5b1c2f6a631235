// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use crate::{Error, TripPath};

mod xml;

/// Format of the input trip path file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Unknown format - guess the format based on the leading magic bytes
    Unknown,

    /// Force uncompressed XML
    Xml,

    /// Force XML with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    XmlGz,

    /// Force XML with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    XmlBz2,
}

impl FileFormat {
    /// Guesses the format of a file from its first bytes.
    /// Anything that isn't gzip or bzip2 is assumed to be plain XML.
    pub fn detect(prefix: &[u8]) -> Self {
        if prefix.starts_with(&[0x1f, 0x8b]) {
            FileFormat::XmlGz
        } else if prefix.starts_with(b"BZh") {
            FileFormat::XmlBz2
        } else {
            FileFormat::Xml
        }
    }
}

/// Parse a [TripPath] from a reader.
///
/// The provided stream will be automatically wrapped in a buffered reader when needed.
pub fn read_from_io<R: io::Read>(reader: R, format: FileFormat) -> Result<TripPath, Error> {
    let mut b = io::BufReader::new(reader);

    let format = match format {
        FileFormat::Unknown => FileFormat::detect(b.fill_buf()?),
        known => known,
    };
    log::debug!("reading trip path as {:?}", format);

    match format {
        FileFormat::Unknown | FileFormat::Xml => xml::read_trip_path_from_io(b),

        FileFormat::XmlGz => {
            let d = flate2::read::MultiGzDecoder::new(b);
            xml::read_trip_path_from_io(io::BufReader::new(d))
        }

        FileFormat::XmlBz2 => {
            let d = bzip2::read::MultiBzDecoder::new(b);
            xml::read_trip_path_from_io(io::BufReader::new(d))
        }
    }
}

/// Parse a [TripPath] from a file at the provided path.
pub fn read_from_file<P: AsRef<Path>>(path: P, format: FileFormat) -> Result<TripPath, Error> {
    let f = File::open(path)?;
    read_from_io(f, format)
}

/// Parse a [TripPath] from a static buffer.
pub fn read_from_buffer(data: &[u8], format: FileFormat) -> Result<TripPath, Error> {
    let format = match format {
        FileFormat::Unknown => FileFormat::detect(data),
        known => known,
    };

    if format == FileFormat::Xml {
        // Fast path is available for in-memory XML data
        xml::read_trip_path_from_buffer(data)
    } else {
        // Wrap the buffer in a cursor and use the IO path
        read_from_io(io::Cursor::new(data), format)
    }
}
