// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::narrative::{dictionary_for, Dictionary, EN_US};

/// Kilometers in a mile.
pub const KM_PER_MILE: f32 = 1.609344;

/// Unit system used for lengths in [TripDirections](crate::TripDirections)
/// and in narrative texts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    #[default]
    Kilometers,
    Miles,
}

impl Units {
    /// Converts a length in kilometers into this unit system.
    pub fn convert_km(self, km: f32) -> f32 {
        match self {
            Units::Kilometers => km,
            Units::Miles => km / KM_PER_MILE,
        }
    }

    /// Parses a units name, falling back to [Units::Kilometers]
    /// (and logging a warning) when it's not recognized.
    pub fn parse_or_default(s: &str) -> Self {
        match s.parse() {
            Ok(units) => units,
            Err(()) => {
                let fallback = Units::default();
                log::warn!("unrecognized units {:?}, using {:?}", s, fallback);
                fallback
            }
        }
    }
}

impl std::str::FromStr for Units {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" | "kilometers" | "km" => Ok(Units::Kilometers),
            "imperial" | "miles" | "mi" => Ok(Units::Miles),
            _ => Err(()),
        }
    }
}

/// Additional controls for turning a [TripPath](crate::TripPath)
/// into [TripDirections](crate::TripDirections).
///
/// Options are read-only for the duration of a request, and may be shared
/// between any number of concurrent requests.
#[derive(Debug, Clone, Copy)]
pub struct Options<'a> {
    /// Unit system of maneuver lengths, the summary and narrative texts.
    pub units: Units,

    /// Phrases used to compose narrative texts.
    pub dictionary: &'a Dictionary,
}

impl Default for Options<'static> {
    fn default() -> Self {
        Options {
            units: Units::default(),
            dictionary: &EN_US,
        }
    }
}

impl Options<'static> {
    /// Creates options from raw request values, substituting defaults
    /// for unrecognized units or languages. Every substitution is logged.
    pub fn from_request(units: &str, language: &str) -> Self {
        Options {
            units: Units::parse_or_default(units),
            dictionary: dictionary_for(language),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! assert_almost_eq {
        ($a:expr, $b:expr) => {
            assert!(
                (($a - $b).abs() < 1e-4),
                "assertion failed: {} ≈ {}",
                $a,
                $b
            )
        };
    }

    #[test]
    fn parse_units() {
        assert_eq!("metric".parse(), Ok(Units::Kilometers));
        assert_eq!("Kilometers".parse(), Ok(Units::Kilometers));
        assert_eq!(" mi ".parse(), Ok(Units::Miles));
        assert_eq!("imperial".parse(), Ok(Units::Miles));
        assert_eq!("furlongs".parse::<Units>(), Err(()));
    }

    #[test]
    fn parse_units_fallback() {
        assert_eq!(Units::parse_or_default("miles"), Units::Miles);
        assert_eq!(Units::parse_or_default("furlongs"), Units::Kilometers);
        assert_eq!(Units::parse_or_default(""), Units::Kilometers);
    }

    #[test]
    fn conversion() {
        assert_almost_eq!(Units::Kilometers.convert_km(2.5), 2.5);
        assert_almost_eq!(Units::Miles.convert_km(KM_PER_MILE), 1.0);
        assert_almost_eq!(Units::Miles.convert_km(10.0), 6.2137);
    }

    #[test]
    fn from_request() {
        let o = Options::from_request("imperial", "de-DE");
        assert_eq!(o.units, Units::Miles);
        assert_eq!(o.dictionary.language, "de-DE");

        let o = Options::from_request("parsecs", "tlh");
        assert_eq!(o.units, Units::Kilometers);
        assert_eq!(o.dictionary.language, "en-US");
    }
}
