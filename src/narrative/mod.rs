// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Textual and verbal instructions of [Maneuvers](Maneuver).

mod dictionary;

pub use dictionary::{
    dictionary_for, resolve_language, Dictionary, LanguageMatch, DE_DE, DICTIONARIES, EN_US,
};

use crate::path::{Location, SideOfStreet, SignKind, TripPath};
use crate::{Maneuver, ManeuverType, Options, Units, KM_PER_MILE};

/// Maneuvers shorter than this (in kilometers) have their verbal
/// pre-transition instruction followed by the alert of the next maneuver.
pub const MULTI_CUE_MAX_LENGTH: f32 = 0.05;

const FEET_PER_MILE: f32 = 5280.0;

/// Fills narrative texts of maneuvers, according to [Options].
pub struct NarrativeBuilder<'a> {
    dictionary: &'a Dictionary,
    units: Units,
}

impl<'a> NarrativeBuilder<'a> {
    pub fn new(options: &Options<'a>) -> Self {
        Self {
            dictionary: options.dictionary,
            units: options.units,
        }
    }

    /// Sets all instruction texts of the provided maneuvers.
    ///
    /// Depart and arrive maneuvers get dedicated depart/arrive instructions
    /// and never get a verbal transition alert.
    pub fn build(&self, path: &TripPath, maneuvers: &mut [Maneuver]) {
        let origin = path.locations.first();
        let destination = path.locations.last();

        for m in maneuvers.iter_mut() {
            let text = self.transition_text(m, destination);
            m.instruction = Some(text.clone());
            m.verbal_pre_transition_instruction = Some(text.clone());

            match m.kind {
                ManeuverType::Depart => {
                    let depart =
                        self.timed(origin, self.dictionary.depart, self.dictionary.depart_at);
                    m.depart_instruction = Some(depart.clone());
                    m.verbal_depart_instruction = Some(depart);
                    m.verbal_post_transition_instruction = self.post_transition(m);
                }
                ManeuverType::Arrive => {
                    let arrive =
                        self.timed(destination, self.dictionary.arrive, self.dictionary.arrive_at);
                    m.arrive_instruction = Some(arrive.clone());
                    m.verbal_arrive_instruction = Some(arrive);
                }
                _ => {
                    m.verbal_transition_alert_instruction = Some(text);
                    m.verbal_post_transition_instruction = self.post_transition(m);
                }
            }
        }

        self.add_multi_cues(maneuvers);
    }

    /// Returns the text describing what to do at the beginning of a maneuver.
    fn transition_text(&self, m: &Maneuver, destination: Option<&Location>) -> String {
        let d = self.dictionary;
        let street = self.begin_street(m);
        let on_street = |template: &str| fill(template, &[("street", street.as_str())]);

        match m.kind {
            ManeuverType::Depart => {
                let cardinal = d.cardinal_directions[m.begin_cardinal_direction.index()];
                fill(d.start, &[("cardinal", cardinal), ("street", street.as_str())])
            }
            ManeuverType::Continue => on_street(d.continue_on),
            ManeuverType::SlightRight => on_street(d.slight_right),
            ManeuverType::Right => on_street(d.right),
            ManeuverType::SharpRight => on_street(d.sharp_right),
            ManeuverType::UturnRight => on_street(d.uturn_right),
            ManeuverType::UturnLeft => on_street(d.uturn_left),
            ManeuverType::SharpLeft => on_street(d.sharp_left),
            ManeuverType::Left => on_street(d.left),
            ManeuverType::SlightLeft => on_street(d.slight_left),

            ManeuverType::RampStraight => self.with_toward(d.ramp_straight.to_string(), m),
            ManeuverType::RampRight => self.with_toward(d.ramp_right.to_string(), m),
            ManeuverType::RampLeft => self.with_toward(d.ramp_left.to_string(), m),
            ManeuverType::ExitRight => {
                self.with_toward(self.exit(m, d.exit_right, d.exit_number_right), m)
            }
            ManeuverType::ExitLeft => {
                self.with_toward(self.exit(m, d.exit_left, d.exit_number_left), m)
            }
            ManeuverType::Merge => on_street(d.merge),

            ManeuverType::RoundaboutEnter => {
                match ordinal_index(m.roundabout_exit_count).map(|i| d.ordinals[i]) {
                    Some(ordinal) => fill(d.roundabout_enter_ordinal, &[("ordinal", ordinal)]),
                    None => d.roundabout_enter.to_string(),
                }
            }
            ManeuverType::RoundaboutExit => on_street(d.roundabout_exit),

            ManeuverType::FerryEnter => d.ferry_enter.to_string(),
            ManeuverType::FerryExit => on_street(d.ferry_exit),

            ManeuverType::Transit => self.transit(m, d.transit, d.transit_toward),
            ManeuverType::TransitTransfer => {
                self.transit(m, d.transit_transfer, d.transit_transfer_toward)
            }

            ManeuverType::Arrive => self.arrived(destination),
        }
    }

    fn arrived(&self, destination: Option<&Location>) -> String {
        let d = self.dictionary;

        let place = destination.and_then(|l| l.name.as_deref().or(l.street.as_deref()));
        let mut text = match place {
            Some(place) => fill(d.arrived_at_place, &[("place", place)]),
            None => d.arrived.to_string(),
        };

        let side = match destination.and_then(|l| l.side_of_street) {
            Some(SideOfStreet::Left) => d.destination_on_left,
            Some(SideOfStreet::Right) => d.destination_on_right,
            Some(SideOfStreet::None) | None => return text,
        };
        text.push(' ');
        text.push_str(side);
        text
    }

    /// Picks the plain template, or the one with `{time}` if the location has a date and time.
    fn timed(&self, location: Option<&Location>, plain: &str, at_time: &str) -> String {
        match location.and_then(|l| l.date_time.as_deref()) {
            Some(time) => fill(at_time, &[("time", time)]),
            None => plain.to_string(),
        }
    }

    /// Returns the verbal text confirming what to do after the maneuver begins.
    fn post_transition(&self, m: &Maneuver) -> Option<String> {
        let d = self.dictionary;

        if let Some(route) = m.transit_route.as_ref() {
            return match route.transit_stops.len().saturating_sub(1) {
                0 => None,
                1 => Some(d.transit_stop_count_one.to_string()),
                n => Some(fill(d.transit_stop_count, &[("count", n.to_string().as_str())])),
            };
        }

        let length = length_phrase(d, self.units, m.length);
        if m.street_names.is_empty() {
            Some(fill(d.post, &[("length", length.as_str())]))
        } else {
            let street = m.street_names.join("/");
            Some(fill(
                d.post_named,
                &[("length", length.as_str()), ("street", street.as_str())],
            ))
        }
    }

    fn exit(&self, m: &Maneuver, plain: &str, numbered: &str) -> String {
        let number = sign_text(m, SignKind::ExitNumber);
        if number.is_empty() {
            plain.to_string()
        } else {
            fill(numbered, &[("number", number.as_str())])
        }
    }

    /// Appends the "toward" part of a guide sign (falling back to its branch)
    /// and terminates the sentence.
    fn with_toward(&self, mut text: String, m: &Maneuver) -> String {
        let mut toward = sign_text(m, SignKind::ExitToward);
        if toward.is_empty() {
            toward = sign_text(m, SignKind::ExitBranch);
        }

        if !toward.is_empty() {
            text.push_str(&fill(self.dictionary.toward, &[("toward", toward.as_str())]));
        }
        text.push('.');
        text
    }

    fn transit(&self, m: &Maneuver, plain: &str, with_headsign: &str) -> String {
        let route = m.transit_route.as_ref();
        let display = route
            .and_then(|r| r.short_name.as_deref().or(r.long_name.as_deref()))
            .unwrap_or(self.dictionary.transit_generic);

        match route.and_then(|r| r.headsign.as_deref()) {
            Some(headsign) => fill(with_headsign, &[("route", display), ("headsign", headsign)]),
            None => fill(plain, &[("route", display)]),
        }
    }

    /// Returns the street displayed at the beginning of the maneuver.
    fn begin_street(&self, m: &Maneuver) -> String {
        let names = if m.begin_street_names.is_empty() {
            &m.street_names
        } else {
            &m.begin_street_names
        };

        if names.is_empty() {
            self.dictionary.unnamed_road.to_string()
        } else {
            names.join("/")
        }
    }

    /// Appends the alert of the following maneuver to the verbal pre-transition
    /// instruction of maneuvers too short to be announced separately.
    fn add_multi_cues(&self, maneuvers: &mut [Maneuver]) {
        for idx in 1..maneuvers.len() {
            let (before, after) = maneuvers.split_at_mut(idx);
            let curr = &mut before[idx - 1];
            let next = &after[0];

            if curr.kind == ManeuverType::Arrive || curr.length >= MULTI_CUE_MAX_LENGTH {
                continue;
            }

            let (Some(pre), Some(alert)) = (
                curr.verbal_pre_transition_instruction.as_mut(),
                next.verbal_transition_alert_instruction.as_deref(),
            ) else {
                continue;
            };

            pre.push(' ');
            pre.push_str(self.dictionary.then);
            pre.push(' ');
            pre.push_str(&lowercase_first(alert));
        }
    }
}

/// Formats a length in kilometers as a phrase in the given unit system.
///
/// Short distances are expressed in meters or feet, rounded to tens;
/// longer ones in kilometers or miles with at most one decimal digit.
pub fn length_phrase(d: &Dictionary, units: Units, km: f32) -> String {
    match units {
        Units::Kilometers if km < 1.0 => {
            fill(d.meters, &[("n", round_to_tens(km * 1000.0).as_str())])
        }
        Units::Kilometers => one_decimal_phrase(d, km, d.kilometer, d.kilometers),
        Units::Miles => {
            let miles = km / KM_PER_MILE;
            if miles < 0.1 {
                fill(d.feet, &[("n", round_to_tens(miles * FEET_PER_MILE).as_str())])
            } else {
                one_decimal_phrase(d, miles, d.mile, d.miles)
            }
        }
    }
}

fn one_decimal_phrase(d: &Dictionary, value: f32, singular: &str, plural: &str) -> String {
    let formatted = format!("{:.1}", value);
    let formatted = formatted.strip_suffix(".0").unwrap_or(&formatted);

    if formatted == "1" {
        singular.to_string()
    } else {
        let n = formatted.replace('.', &d.decimal_separator.to_string());
        fill(plural, &[("n", n.as_str())])
    }
}

fn round_to_tens(value: f32) -> String {
    let tens = (value / 10.0).round().max(1.0) as u32;
    (tens * 10).to_string()
}

/// Returns the index into [Dictionary::ordinals] for a roundabout exit count.
fn ordinal_index(count: u32) -> Option<usize> {
    match count {
        1..=10 => Some(count as usize - 1),
        _ => None,
    }
}

/// Joins the guide sign elements of a given kind with "/".
fn sign_text(m: &Maneuver, kind: SignKind) -> String {
    m.signs
        .as_ref()
        .map(|s| {
            s.elements(kind)
                .iter()
                .map(|e| e.text.as_str())
                .collect::<Vec<_>>()
                .join("/")
        })
        .unwrap_or_default()
}

/// Substitutes every `{key}` in the template with its value.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut text = template.to_string();
    for (key, value) in values {
        text = text.replace(&format!("{{{}}}", key), value);
    }
    text
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::default(),
    }
}
