// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use serde::Serialize;

use crate::heading::normalize_headings;
use crate::maneuver::build_maneuvers;
use crate::narrative::NarrativeBuilder;
use crate::path::{Location, LocationKind, SideOfStreet, TripPath};
use crate::signs::{attach_signs, Signs};
use crate::transit::{attach_transit, TransitRoute};
use crate::turn::CardinalDirection;
use crate::{Error, Maneuver, ManeuverType, Options, Units};

/// Turn-by-turn directions of a single trip leg.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripDirections {
    pub trip_id: u64,
    pub leg_id: u32,
    pub leg_count: u32,
    pub locations: Vec<DirectionsLocation>,
    pub summary: Summary,
    pub maneuvers: Vec<DirectionsManeuver>,

    /// Encoded geometry of the whole trip, copied verbatim from the [TripPath].
    pub shape: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    /// Sum of lengths of all maneuvers, in the requested [Units].
    pub length: f32,

    /// Seconds elapsed upon reaching the last node of the trip.
    pub time: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionsLocationType {
    Break,
    Through,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionsSideOfStreet {
    Left,
    Right,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionsLocation {
    pub lat: f64,
    pub lng: f64,

    #[serde(rename = "type")]
    pub kind: DirectionsLocationType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub side_of_street: Option<DirectionsSideOfStreet>,
}

impl From<&Location> for DirectionsLocation {
    fn from(l: &Location) -> Self {
        Self {
            lat: l.lat,
            lng: l.lng,
            kind: match l.kind {
                LocationKind::Through => DirectionsLocationType::Through,
                LocationKind::Break | LocationKind::Via | LocationKind::BreakThrough => {
                    DirectionsLocationType::Break
                }
            },
            heading: l.heading,
            name: present(l.name.as_deref()),
            street: present(l.street.as_deref()),
            city: present(l.city.as_deref()),
            state: present(l.state.as_deref()),
            postal_code: present(l.postal_code.as_deref()),
            country: present(l.country.as_deref()),
            date_time: present(l.date_time.as_deref()),
            side_of_street: l.side_of_street.map(|s| match s {
                SideOfStreet::Left => DirectionsSideOfStreet::Left,
                SideOfStreet::Right => DirectionsSideOfStreet::Right,
                SideOfStreet::None => DirectionsSideOfStreet::None,
            }),
        }
    }
}

/// Serialized form of a [Maneuver].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionsManeuver {
    #[serde(rename = "type")]
    pub kind: ManeuverType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub street_names: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub begin_street_names: Vec<String>,

    /// Length in the requested [Units].
    pub length: f32,

    /// Time in seconds.
    pub time: f32,

    pub begin_cardinal_direction: CardinalDirection,
    pub begin_heading: u32,
    pub begin_shape_index: u32,
    pub end_shape_index: u32,

    #[serde(skip_serializing_if = "is_false")]
    pub portions_toll: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub portions_unpaved: bool,

    #[serde(skip_serializing_if = "is_zero")]
    pub roundabout_exit_count: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbal_transition_alert_instruction: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbal_pre_transition_instruction: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbal_post_transition_instruction: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub depart_instruction: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbal_depart_instruction: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrive_instruction: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbal_arrive_instruction: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign: Option<Signs>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transit_info: Option<TransitRoute>,
}

impl DirectionsManeuver {
    fn new(m: Maneuver, units: Units) -> Self {
        let length = m.length_in(units);
        Self {
            kind: m.kind,
            instruction: non_empty(m.instruction),
            length,
            street_names: m.street_names,
            begin_street_names: m.begin_street_names,
            time: m.time,
            begin_cardinal_direction: m.begin_cardinal_direction,
            begin_heading: m.begin_heading,
            begin_shape_index: m.begin_shape_index,
            end_shape_index: m.end_shape_index,
            portions_toll: m.portions_toll,
            portions_unpaved: m.portions_unpaved,
            roundabout_exit_count: m.roundabout_exit_count,
            verbal_transition_alert_instruction: non_empty(m.verbal_transition_alert_instruction),
            verbal_pre_transition_instruction: non_empty(m.verbal_pre_transition_instruction),
            verbal_post_transition_instruction: non_empty(m.verbal_post_transition_instruction),
            depart_instruction: non_empty(m.depart_instruction),
            verbal_depart_instruction: non_empty(m.verbal_depart_instruction),
            arrive_instruction: non_empty(m.arrive_instruction),
            verbal_arrive_instruction: non_empty(m.verbal_arrive_instruction),
            sign: m.signs,
            transit_info: m.transit_route,
        }
    }
}

/// Runs the whole pipeline turning [TripPaths](TripPath) into [TripDirections]:
/// heading normalization, maneuver building, sign and transit extraction,
/// narrative synthesis and the final projection.
///
/// A builder holds no mutable state, so it may be shared between threads
/// and used for any number of paths.
#[derive(Debug, Clone, Copy)]
pub struct DirectionsBuilder<'a> {
    options: Options<'a>,
}

impl<'a> DirectionsBuilder<'a> {
    pub fn new(options: Options<'a>) -> Self {
        Self { options }
    }

    /// Builds directions for the provided path.
    ///
    /// Returns [Error::EmptyTripPath] if the path has no nodes.
    pub fn build(&self, path: &TripPath) -> Result<TripDirections, Error> {
        if path.nodes.is_empty() {
            return Err(Error::EmptyTripPath);
        }

        let corrected = normalize_headings(path);

        let mut maneuvers = build_maneuvers(&corrected)?;
        attach_signs(&corrected, &mut maneuvers);
        attach_transit(&corrected, &mut maneuvers);
        NarrativeBuilder::new(&self.options).build(&corrected, &mut maneuvers);

        Ok(assemble(&corrected, maneuvers, self.options.units))
    }
}

/// Projects the built maneuvers, together with the path they were built from,
/// into [TripDirections].
pub fn assemble(path: &TripPath, maneuvers: Vec<Maneuver>, units: Units) -> TripDirections {
    let maneuvers: Vec<DirectionsManeuver> = maneuvers
        .into_iter()
        .map(|m| DirectionsManeuver::new(m, units))
        .collect();

    let summary = Summary {
        length: maneuvers.iter().map(|m| m.length).sum(),
        time: path.nodes.last().map(|n| n.elapsed_time).unwrap_or_default(),
    };

    TripDirections {
        trip_id: path.trip_id,
        leg_id: path.leg_id,
        leg_count: path.leg_count,
        locations: path.locations.iter().map(DirectionsLocation::from).collect(),
        summary,
        maneuvers,
        shape: path.shape.clone(),
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

fn present(s: Option<&str>) -> Option<String> {
    s.filter(|s| !s.is_empty()).map(|s| s.to_string())
}

#[inline]
fn is_false(b: &bool) -> bool {
    !*b
}

#[inline]
fn is_zero(n: &u32) -> bool {
    *n == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::testing::PathBuilder;
    use crate::path::{
        read_from_buffer, Edge, EdgeUse, FileFormat, RoadClass, TransitRouteInfo, TransitStopInfo,
        TravelMode,
    };
    use serde_json::{json, Value};

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

    fn to_json(directions: &TripDirections) -> Value {
        serde_json::to_value(directions).unwrap()
    }

    #[test]
    fn empty_path() {
        let r = DirectionsBuilder::new(Options::default()).build(&TripPath::default());
        assert!(matches!(r, Err(Error::EmptyTripPath)));
    }

    #[test]
    fn path_without_edges() {
        let path = PathBuilder::new().build();
        let d = DirectionsBuilder::new(Options::default()).build(&path).unwrap();

        assert_eq!(d.maneuvers.len(), 2);
        assert_eq!(d.maneuvers[0].kind, ManeuverType::Depart);
        assert_eq!(d.maneuvers[1].kind, ManeuverType::Arrive);
        assert_eq!(d.summary.length, 0.0);
        assert_eq!(d.summary.time, 0.0);
    }

    #[test]
    fn summary_length_is_sum_of_maneuvers() {
        let path = PathBuilder::new()
            .named(0.7, 0, 0, "Main Street")
            .intersections(2)
            .named(1.3, 90, 90, "Broad Street")
            .intersections(2)
            .named(0.45, 0, 0, "Main Street")
            .build();

        for units in [Units::Kilometers, Units::Miles] {
            let options = Options {
                units,
                ..Options::default()
            };
            let d = DirectionsBuilder::new(options).build(&path).unwrap();

            let sum: f32 = d.maneuvers.iter().map(|m| m.length).sum();
            assert_eq!(d.maneuvers.len(), 4);
            assert_eq!(d.summary.length, sum);
            assert_almost_eq!(d.summary.length, units.convert_km(2.45));
            assert_eq!(d.summary.time, 30.0);
        }
    }

    #[test]
    fn headings_are_normalized() {
        let path = PathBuilder::new()
            .named(0.5, 0, 0, "Main Street")
            .intersections(3)
            .named(0.001, 90, 90, "Main Street")
            .named(0.5, 0, 0, "Main Street")
            .build();
        let d = DirectionsBuilder::new(Options::default()).build(&path).unwrap();

        // Without correction, the near-zero edge would be a right turn
        assert_eq!(d.maneuvers.len(), 2);
        assert_eq!(d.maneuvers[0].end_shape_index, 3);
    }

    #[test]
    fn omission_rules() {
        let path = PathBuilder::new()
            .named(1.0, 0, 0, "Main Street")
            .intersections(1)
            .edge_with(1.0, 90, 90, |e: &mut Edge| {
                e.road_class = RoadClass::Primary;
                e.set_tag("name", "Broad Street");
                e.toll = true;
            })
            .build();
        let json = to_json(&DirectionsBuilder::new(Options::default()).build(&path).unwrap());

        let depart = &json["maneuvers"][0];
        assert_eq!(depart["type"], "depart");
        assert!(depart.get("begin_street_names").is_none());
        assert!(depart.get("verbal_transition_alert_instruction").is_none());
        assert!(depart.get("roundabout_exit_count").is_none());
        assert!(depart.get("portions_toll").is_none());
        assert!(depart.get("sign").is_none());
        assert!(depart.get("transit_info").is_none());
        assert!(depart.get("arrive_instruction").is_none());
        assert_eq!(depart["street_names"], json!(["Main Street"]));
        assert_eq!(depart["begin_cardinal_direction"], "north");

        let turn = &json["maneuvers"][1];
        assert_eq!(turn["type"], "right");
        assert_eq!(turn["portions_toll"], true);
        assert!(turn.get("portions_unpaved").is_none());
        assert!(turn.get("depart_instruction").is_none());
        assert_eq!(turn["instruction"], "Turn right onto Broad Street.");

        let arrive = &json["maneuvers"][2];
        assert_eq!(arrive["type"], "arrive");
        assert!(arrive.get("verbal_post_transition_instruction").is_none());
        assert_eq!(arrive["begin_shape_index"], 2);
        assert_eq!(arrive["end_shape_index"], 2);

        let origin = &json["locations"][0];
        assert_eq!(origin["type"], "break");
        assert!(origin.get("name").is_none());
        assert!(origin.get("side_of_street").is_none());
        assert!(origin.get("heading").is_none());
    }

    #[test]
    fn transit_post_text_is_omitted_without_stops_after_boarding() {
        let path = PathBuilder::new()
            .edge_with(0.2, 0, 0, |e: &mut Edge| e.travel_mode = TravelMode::Pedestrian)
            .stop(TransitStopInfo {
                name: "Newark Penn Station".to_string(),
                ..TransitStopInfo::default()
            })
            .edge_with(3.0, 0, 0, |e: &mut Edge| {
                e.travel_mode = TravelMode::Transit;
                e.usage = EdgeUse::Rail;
                e.transit_route = Some(TransitRouteInfo {
                    onestop_id: "r-NEC".to_string(),
                    short_name: "NEC".to_string(),
                    ..TransitRouteInfo::default()
                });
            })
            .build();
        let json = to_json(&DirectionsBuilder::new(Options::default()).build(&path).unwrap());

        let transit = &json["maneuvers"][1];
        assert_eq!(transit["type"], "transit");
        assert_eq!(transit["instruction"], "Take the NEC.");
        assert!(transit.get("verbal_post_transition_instruction").is_none());
    }

    #[test]
    fn empty_strings_are_omitted() {
        let mut m = Maneuver::new(ManeuverType::Continue, 0, 0, 0);
        m.instruction = Some(String::default());
        m.verbal_pre_transition_instruction = Some("Continue.".to_string());

        let projected = DirectionsManeuver::new(m, Units::Kilometers);
        assert_eq!(projected.instruction, None);
        assert_eq!(projected.verbal_pre_transition_instruction.as_deref(), Some("Continue."));
    }

    #[test]
    fn locations() {
        let through = Location {
            lat: 40.7,
            lng: -74.2,
            kind: LocationKind::Through,
            heading: Some(90),
            street: Some("S Clinton Ave".to_string()),
            city: Some(String::default()),
            side_of_street: Some(SideOfStreet::None),
            ..Location::default()
        };
        let via = Location {
            kind: LocationKind::Via,
            side_of_street: Some(SideOfStreet::Left),
            ..Location::default()
        };

        let l = DirectionsLocation::from(&through);
        assert_eq!(l.kind, DirectionsLocationType::Through);
        assert_eq!(l.heading, Some(90));
        assert_eq!(l.street.as_deref(), Some("S Clinton Ave"));
        assert_eq!(l.city, None);
        assert_eq!(l.side_of_street, Some(DirectionsSideOfStreet::None));

        let l = DirectionsLocation::from(&via);
        assert_eq!(l.kind, DirectionsLocationType::Break);
        assert_eq!(l.side_of_street, Some(DirectionsSideOfStreet::Left));
    }

    #[test]
    fn fixture() {
        let path = read_from_buffer(
            include_bytes!("path/reader/test_fixtures/simple_trip.xml"),
            FileFormat::Xml,
        )
        .unwrap();
        let d = DirectionsBuilder::new(Options::default()).build(&path).unwrap();

        assert_eq!(d.trip_id, 7);
        assert_eq!(d.shape, path.shape);
        assert_eq!(d.summary.time, 360.0);
        assert_eq!(d.locations.len(), 2);
        assert_eq!(d.locations[0].kind, DirectionsLocationType::Break);
        assert_eq!(d.locations[1].kind, DirectionsLocationType::Through);

        let kinds: Vec<_> = d.maneuvers.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ManeuverType::Depart,
                ManeuverType::RampStraight,
                ManeuverType::Transit,
                ManeuverType::Arrive,
            ],
        );

        let depart = &d.maneuvers[0];
        assert_eq!(depart.street_names, vec!["Main Street"]);
        assert_eq!(depart.end_shape_index, 4);
        assert!(depart.portions_toll);
        assert_eq!(
            depart.depart_instruction.as_deref(),
            Some("Depart at 2025-06-01T08:00."),
        );

        let ramp = &d.maneuvers[1];
        let sign = ramp.sign.as_ref().unwrap();
        assert_eq!(sign.exit_number_elements.as_ref().unwrap()[0].text, "12A");
        assert_eq!(sign.exit_toward_elements.as_ref().unwrap().len(), 2);

        let transit = d.maneuvers[2].transit_info.as_ref().unwrap();
        assert_eq!(transit.short_name.as_deref(), Some("NEC"));
        assert_eq!(transit.color, 0xEE3A43);
        assert_eq!(transit.transit_stops.len(), 2);

        let arrive = &d.maneuvers[3];
        assert_eq!(arrive.begin_shape_index, 9);
        assert_eq!(
            arrive.instruction.as_deref(),
            Some("You have arrived at S Clinton Ave."),
        );

        let sum: f32 = d.maneuvers.iter().map(|m| m.length).sum();
        assert_eq!(d.summary.length, sum);
    }
}
