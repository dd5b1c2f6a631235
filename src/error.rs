// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::io;

/// Error conditions which may occur while loading a [TripPath](crate::TripPath)
/// or building [TripDirections](crate::TripDirections) from it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The trip path has no nodes, so no maneuvers can be built from it.
    #[error("trip path does not have any nodes")]
    EmptyTripPath,

    #[error("xml: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("<{element} {attribute}={value:?}>: invalid value")]
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },

    #[error("missing <{0}> element")]
    MissingElement(&'static str),
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(quick_xml::Error::InvalidAttr(e))
    }
}
