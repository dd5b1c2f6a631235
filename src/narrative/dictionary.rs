// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Phrases of a single language used to compose narrative texts.
///
/// Templates contain `{placeholders}`, which are substituted with maneuver data:
/// - `{street}`: street names joined with "/", or [Dictionary::unnamed_road],
/// - `{cardinal}`: one of [Dictionary::cardinal_directions],
/// - `{length}`: length phrase built from the unit templates,
/// - `{n}`: a number inside a unit template,
/// - `{number}`, `{toward}`: guide sign texts,
/// - `{ordinal}`: one of [Dictionary::ordinals],
/// - `{route}`, `{headsign}`, `{count}`: transit route data,
/// - `{place}`, `{time}`: location data.
///
/// Complete texts end with a full stop; templates used as suffixes
/// ([Dictionary::toward]) start with a space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dictionary {
    /// [BCP 47](https://www.rfc-editor.org/info/bcp47) tag of the language.
    pub language: &'static str,

    pub decimal_separator: char,

    /// Used in place of `{street}` for maneuvers without any names.
    pub unnamed_road: &'static str,

    /// Joins a verbal instruction with the transition alert of the following
    /// maneuver, when both are spoken at once.
    pub then: &'static str,

    pub meters: &'static str,
    pub kilometer: &'static str,
    pub kilometers: &'static str,
    pub feet: &'static str,
    pub mile: &'static str,
    pub miles: &'static str,

    /// Names of compass directions, clockwise from north.
    pub cardinal_directions: [&'static str; 8],

    /// Ordinal numbers from first to tenth, used for roundabout exits.
    pub ordinals: [&'static str; 10],

    pub start: &'static str,
    pub continue_on: &'static str,
    pub slight_right: &'static str,
    pub right: &'static str,
    pub sharp_right: &'static str,
    pub uturn_right: &'static str,
    pub uturn_left: &'static str,
    pub sharp_left: &'static str,
    pub left: &'static str,
    pub slight_left: &'static str,

    pub ramp_straight: &'static str,
    pub ramp_right: &'static str,
    pub ramp_left: &'static str,
    pub exit_right: &'static str,
    pub exit_left: &'static str,
    pub exit_number_right: &'static str,
    pub exit_number_left: &'static str,
    pub toward: &'static str,
    pub merge: &'static str,

    pub roundabout_enter: &'static str,
    pub roundabout_enter_ordinal: &'static str,
    pub roundabout_exit: &'static str,

    pub ferry_enter: &'static str,
    pub ferry_exit: &'static str,

    /// Route display used when a transit line has neither a short nor a long name.
    pub transit_generic: &'static str,
    pub transit: &'static str,
    pub transit_toward: &'static str,
    pub transit_transfer: &'static str,
    pub transit_transfer_toward: &'static str,
    pub transit_stop_count_one: &'static str,
    pub transit_stop_count: &'static str,

    pub post: &'static str,
    pub post_named: &'static str,

    pub depart: &'static str,
    pub depart_at: &'static str,

    pub arrive: &'static str,
    pub arrive_at: &'static str,
    pub arrived: &'static str,
    pub arrived_at_place: &'static str,
    pub destination_on_left: &'static str,
    pub destination_on_right: &'static str,
}

pub const EN_US: Dictionary = Dictionary {
    language: "en-US",
    decimal_separator: '.',
    unnamed_road: "unnamed road",
    then: "Then",

    meters: "{n} meters",
    kilometer: "1 kilometer",
    kilometers: "{n} kilometers",
    feet: "{n} feet",
    mile: "1 mile",
    miles: "{n} miles",

    cardinal_directions: [
        "north",
        "northeast",
        "east",
        "southeast",
        "south",
        "southwest",
        "west",
        "northwest",
    ],
    ordinals: [
        "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth",
        "tenth",
    ],

    start: "Head {cardinal} on {street}.",
    continue_on: "Continue on {street}.",
    slight_right: "Bear right onto {street}.",
    right: "Turn right onto {street}.",
    sharp_right: "Make a sharp right onto {street}.",
    uturn_right: "Make a right U-turn onto {street}.",
    uturn_left: "Make a left U-turn onto {street}.",
    sharp_left: "Make a sharp left onto {street}.",
    left: "Turn left onto {street}.",
    slight_left: "Bear left onto {street}.",

    ramp_straight: "Stay straight to take the ramp",
    ramp_right: "Take the ramp on the right",
    ramp_left: "Take the ramp on the left",
    exit_right: "Take the exit on the right",
    exit_left: "Take the exit on the left",
    exit_number_right: "Take exit {number} on the right",
    exit_number_left: "Take exit {number} on the left",
    toward: " toward {toward}",
    merge: "Merge onto {street}.",

    roundabout_enter: "Enter the roundabout.",
    roundabout_enter_ordinal: "Enter the roundabout and take the {ordinal} exit.",
    roundabout_exit: "Exit the roundabout onto {street}.",

    ferry_enter: "Take the ferry.",
    ferry_exit: "Leave the ferry onto {street}.",

    transit_generic: "transit line",
    transit: "Take the {route}.",
    transit_toward: "Take the {route} toward {headsign}.",
    transit_transfer: "Transfer to the {route}.",
    transit_transfer_toward: "Transfer to the {route} toward {headsign}.",
    transit_stop_count_one: "Travel 1 stop.",
    transit_stop_count: "Travel {count} stops.",

    post: "Continue for {length}.",
    post_named: "Continue on {street} for {length}.",

    depart: "Depart.",
    depart_at: "Depart at {time}.",

    arrive: "Arrive.",
    arrive_at: "Arrive at {time}.",
    arrived: "You have arrived at your destination.",
    arrived_at_place: "You have arrived at {place}.",
    destination_on_left: "Your destination is on the left.",
    destination_on_right: "Your destination is on the right.",
};

pub const DE_DE: Dictionary = Dictionary {
    language: "de-DE",
    decimal_separator: ',',
    unnamed_road: "unbenannte Straße",
    then: "Dann",

    meters: "{n} Meter",
    kilometer: "1 Kilometer",
    kilometers: "{n} Kilometer",
    feet: "{n} Fuß",
    mile: "1 Meile",
    miles: "{n} Meilen",

    cardinal_directions: [
        "Norden",
        "Nordosten",
        "Osten",
        "Südosten",
        "Süden",
        "Südwesten",
        "Westen",
        "Nordwesten",
    ],
    ordinals: [
        "erste", "zweite", "dritte", "vierte", "fünfte", "sechste", "siebte", "achte", "neunte",
        "zehnte",
    ],

    start: "Fahren Sie Richtung {cardinal} auf {street}.",
    continue_on: "Bleiben Sie auf {street}.",
    slight_right: "Halten Sie sich rechts auf {street}.",
    right: "Biegen Sie rechts ab auf {street}.",
    sharp_right: "Biegen Sie scharf rechts ab auf {street}.",
    uturn_right: "Wenden Sie rechts auf {street}.",
    uturn_left: "Wenden Sie links auf {street}.",
    sharp_left: "Biegen Sie scharf links ab auf {street}.",
    left: "Biegen Sie links ab auf {street}.",
    slight_left: "Halten Sie sich links auf {street}.",

    ramp_straight: "Fahren Sie geradeaus auf die Auffahrt",
    ramp_right: "Nehmen Sie die Auffahrt rechts",
    ramp_left: "Nehmen Sie die Auffahrt links",
    exit_right: "Nehmen Sie die Ausfahrt rechts",
    exit_left: "Nehmen Sie die Ausfahrt links",
    exit_number_right: "Nehmen Sie die Ausfahrt {number} rechts",
    exit_number_left: "Nehmen Sie die Ausfahrt {number} links",
    toward: " Richtung {toward}",
    merge: "Fahren Sie auf {street} auf.",

    roundabout_enter: "Fahren Sie in den Kreisverkehr.",
    roundabout_enter_ordinal: "Fahren Sie in den Kreisverkehr und nehmen Sie die {ordinal} Ausfahrt.",
    roundabout_exit: "Verlassen Sie den Kreisverkehr auf {street}.",

    ferry_enter: "Nehmen Sie die Fähre.",
    ferry_exit: "Verlassen Sie die Fähre auf {street}.",

    transit_generic: "Linie",
    transit: "Nehmen Sie die {route}.",
    transit_toward: "Nehmen Sie die {route} Richtung {headsign}.",
    transit_transfer: "Steigen Sie um in die {route}.",
    transit_transfer_toward: "Steigen Sie um in die {route} Richtung {headsign}.",
    transit_stop_count_one: "Fahren Sie 1 Haltestelle.",
    transit_stop_count: "Fahren Sie {count} Haltestellen.",

    post: "Fahren Sie {length} weiter.",
    post_named: "Fahren Sie {length} weiter auf {street}.",

    depart: "Abfahrt.",
    depart_at: "Abfahrt um {time}.",

    arrive: "Ankunft.",
    arrive_at: "Ankunft um {time}.",
    arrived: "Sie haben Ihr Ziel erreicht.",
    arrived_at_place: "Sie haben {place} erreicht.",
    destination_on_left: "Ihr Ziel befindet sich links.",
    destination_on_right: "Ihr Ziel befindet sich rechts.",
};

/// All built-in dictionaries, the default one first.
pub const DICTIONARIES: [&Dictionary; 2] = [&EN_US, &DE_DE];

/// How a requested language was resolved to a built-in dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageMatch {
    Exact,
    /// Only the primary language subtag matched, e.g. "de-AT" to "de-DE".
    Subtag,
    /// Nothing matched and the default dictionary was used.
    Fallback,
}

/// Returns the dictionary for a [BCP 47](https://www.rfc-editor.org/info/bcp47) language tag.
///
/// An exact (case-insensitive) match is preferred; otherwise the first dictionary
/// sharing the primary language subtag is used (so that "de" or "de-AT" resolve to [DE_DE]).
/// Unrecognized languages fall back to [EN_US]. Every substitution is logged as a warning.
pub fn dictionary_for(language: &str) -> &'static Dictionary {
    let (d, matched) = resolve_language(language);
    match matched {
        LanguageMatch::Exact => {}
        LanguageMatch::Subtag => log::warn!(
            "no dictionary for language {:?}, using {}",
            language.trim(),
            d.language
        ),
        LanguageMatch::Fallback => log::warn!(
            "unrecognized language {:?}, using {}",
            language.trim(),
            d.language
        ),
    }
    d
}

/// Resolves a language tag like [dictionary_for], without logging.
pub fn resolve_language(language: &str) -> (&'static Dictionary, LanguageMatch) {
    let language = language.trim();

    if let Some(&d) = DICTIONARIES
        .iter()
        .find(|d| d.language.eq_ignore_ascii_case(language))
    {
        return (d, LanguageMatch::Exact);
    }

    let subtag = primary_subtag(language);
    if let Some(&d) = DICTIONARIES
        .iter()
        .find(|d| primary_subtag(d.language).eq_ignore_ascii_case(subtag))
    {
        return (d, LanguageMatch::Subtag);
    }

    (DICTIONARIES[0], LanguageMatch::Fallback)
}

fn primary_subtag(language: &str) -> &str {
    language.split(['-', '_']).next().unwrap_or(language)
}
