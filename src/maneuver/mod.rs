// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Maneuvers: decision points of a trip, each spanning one or more path edges.

mod builder;

pub use builder::build_maneuvers;

use serde::Serialize;

use crate::signs::Signs;
use crate::transit::TransitRoute;
use crate::turn::{CardinalDirection, Turn};
use crate::Units;

/// What the traveler has to do at the beginning of a [Maneuver].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ManeuverType {
    Depart,
    Continue,
    SlightRight,
    Right,
    SharpRight,
    UturnRight,
    UturnLeft,
    SharpLeft,
    Left,
    SlightLeft,
    RampStraight,
    RampRight,
    RampLeft,
    ExitRight,
    ExitLeft,
    Merge,
    RoundaboutEnter,
    RoundaboutExit,
    FerryEnter,
    FerryExit,
    Transit,
    TransitTransfer,
    Arrive,
}

impl ManeuverType {
    /// Returns the maneuver type of a plain turn, as seen from the turn degree.
    pub fn from_turn(turn: Turn, turn_degree: u32) -> Self {
        match turn {
            Turn::Straight => ManeuverType::Continue,
            Turn::SlightRight => ManeuverType::SlightRight,
            Turn::Right => ManeuverType::Right,
            Turn::SharpRight => ManeuverType::SharpRight,
            Turn::UTurn if turn_degree < 180 => ManeuverType::UturnRight,
            Turn::UTurn => ManeuverType::UturnLeft,
            Turn::SharpLeft => ManeuverType::SharpLeft,
            Turn::Left => ManeuverType::Left,
            Turn::SlightLeft => ManeuverType::SlightLeft,
        }
    }

    pub fn is_transit(self) -> bool {
        matches!(self, ManeuverType::Transit | ManeuverType::TransitTransfer)
    }
}

/// A single turn-by-turn step, built from a [TripPath](crate::TripPath).
///
/// Maneuvers are working state of a single [DirectionsBuilder](crate::DirectionsBuilder)
/// call, and only their serialized form survives in [TripDirections](crate::TripDirections).
#[derive(Debug, Clone, PartialEq)]
pub struct Maneuver {
    pub kind: ManeuverType,

    /// Turn taken at the beginning of this maneuver.
    pub turn: Turn,

    /// Index of the node where this maneuver begins.
    pub begin_node_index: usize,

    /// Index of the node where this maneuver ends. Edges of nodes in
    /// `begin_node_index..end_node_index` belong to this maneuver.
    pub end_node_index: usize,

    pub begin_shape_index: u32,
    pub end_shape_index: u32,

    /// Length in kilometers.
    pub length: f32,

    /// Time in seconds.
    pub time: f32,

    pub begin_heading: u32,
    pub begin_cardinal_direction: CardinalDirection,

    /// Names of the last edge of this maneuver.
    pub street_names: Vec<String>,

    /// Names of the first edge, set only if they differ both from names
    /// the previous maneuver ended on and from [Maneuver::street_names].
    pub begin_street_names: Vec<String>,

    pub portions_toll: bool,
    pub portions_unpaved: bool,

    /// Number of roundabout edges traversed, zero if not applicable.
    pub roundabout_exit_count: u32,

    pub signs: Option<Signs>,
    pub transit_route: Option<TransitRoute>,

    pub instruction: Option<String>,
    pub verbal_transition_alert_instruction: Option<String>,
    pub verbal_pre_transition_instruction: Option<String>,
    pub verbal_post_transition_instruction: Option<String>,
    pub depart_instruction: Option<String>,
    pub verbal_depart_instruction: Option<String>,
    pub arrive_instruction: Option<String>,
    pub verbal_arrive_instruction: Option<String>,
}

impl Maneuver {
    /// Creates an empty maneuver of a given kind, beginning at the node `node_index`.
    pub fn new(kind: ManeuverType, node_index: usize, shape_index: u32, heading: u32) -> Self {
        Self {
            kind,
            turn: Turn::Straight,
            begin_node_index: node_index,
            end_node_index: node_index,
            begin_shape_index: shape_index,
            end_shape_index: shape_index,
            length: 0.0,
            time: 0.0,
            begin_heading: heading,
            begin_cardinal_direction: CardinalDirection::from_heading(heading),
            street_names: Vec::default(),
            begin_street_names: Vec::default(),
            portions_toll: false,
            portions_unpaved: false,
            roundabout_exit_count: 0,
            signs: None,
            transit_route: None,
            instruction: None,
            verbal_transition_alert_instruction: None,
            verbal_pre_transition_instruction: None,
            verbal_post_transition_instruction: None,
            depart_instruction: None,
            verbal_depart_instruction: None,
            arrive_instruction: None,
            verbal_arrive_instruction: None,
        }
    }

    /// Returns the length of this maneuver in the requested units.
    pub fn length_in(&self, units: Units) -> f32 {
        units.convert_km(self.length)
    }

    /// Returns the number of path edges this maneuver spans.
    pub fn edge_count(&self) -> usize {
        self.end_node_index - self.begin_node_index
    }

    pub fn is_transit(&self) -> bool {
        self.kind.is_transit()
    }
}
