// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Input model: the routed sequence of nodes and edges produced by path search.

mod names;
mod reader;

#[cfg(test)]
pub(crate) mod testing;

pub use names::{split_tag_tokens, NameTags};
pub use reader::{read_from_buffer, read_from_file, read_from_io, FileFormat};

/// Minimum length of an edge, in kilometers, for its headings to be trusted.
/// Shorter edges are artifacts of geometry simplification.
pub const MIN_EDGE_LENGTH: f32 = 0.003;

/// A computed route, as handed over by the route search.
///
/// Node `i` owns the edge leaving it, so edges between consecutive nodes
/// are contiguous by construction. The last node has no edge.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TripPath {
    pub trip_id: u64,
    pub leg_id: u32,
    pub leg_count: u32,
    pub locations: Vec<Location>,
    pub nodes: Vec<Node>,

    /// Encoded geometry of the whole path. Shape indices of [Edges](Edge)
    /// refer to points of this shape.
    pub shape: String,
}

impl TripPath {
    /// Returns the edge entering the node at `idx`.
    pub fn prev_edge(&self, idx: usize) -> Option<&Edge> {
        if idx == 0 {
            None
        } else {
            self.curr_edge(idx - 1)
        }
    }

    /// Returns the edge leaving the node at `idx`.
    pub fn curr_edge(&self, idx: usize) -> Option<&Edge> {
        self.nodes.get(idx).and_then(|n| n.edge.as_ref())
    }

    /// Returns the edge leaving the node after `idx`.
    pub fn next_edge(&self, idx: usize) -> Option<&Edge> {
        self.curr_edge(idx + 1)
    }

    /// Returns the index of the last node, or zero for an empty path.
    pub fn last_node_index(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Returns the number of edges in the path.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.edge.is_some()).count()
    }

    /// Returns the time spent traversing the edge leaving the node at `idx`,
    /// in seconds.
    pub fn edge_time(&self, idx: usize) -> f32 {
        match (self.nodes.get(idx), self.nodes.get(idx + 1)) {
            (Some(from), Some(to)) => (to.elapsed_time - from.elapsed_time).max(0.0),
            _ => 0.0,
        }
    }
}

/// Element of a [TripPath] between two edges.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Node {
    /// The edge leaving this node, absent on the last node.
    pub edge: Option<Edge>,

    /// Seconds elapsed since the start of the trip upon reaching this node.
    pub elapsed_time: f32,

    /// Number of edges, other than the path's own, meeting at this node.
    pub intersecting_edge_count: u32,

    pub transit_stop: Option<TransitStopInfo>,
}

/// Portion of road (or transit line) traversed by a [TripPath].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Edge {
    /// Length in kilometers.
    pub length: f32,

    /// Compass bearing in degrees at the start of the edge.
    pub begin_heading: u32,

    /// Compass bearing in degrees at the end of the edge.
    pub end_heading: u32,

    pub begin_shape_index: u32,
    pub end_shape_index: u32,

    pub road_class: RoadClass,
    pub usage: EdgeUse,
    pub travel_mode: TravelMode,

    pub names: NameTags,

    /// Raw guide sign content, in tag order.
    pub sign: Vec<SignToken>,

    pub transit_route: Option<TransitRouteInfo>,

    pub roundabout: bool,
    pub toll: bool,
    pub unpaved: bool,
}

impl Edge {
    /// Returns the display names of this edge, in priority order.
    pub fn street_names(&self) -> Vec<String> {
        self.names.street_names(self.road_class)
    }

    /// Checks if this edge belongs to the limited-access road classes.
    pub fn is_highway(&self) -> bool {
        matches!(self.road_class, RoadClass::Motorway | RoadClass::Trunk)
    }

    pub fn is_ramp(&self) -> bool {
        self.usage == EdgeUse::Ramp
    }

    pub fn is_ferry(&self) -> bool {
        self.usage == EdgeUse::Ferry
    }

    pub fn is_transit(&self) -> bool {
        self.travel_mode == TravelMode::Transit
    }

    /// Sets a single OSM-style tag, interpreting name and guide sign keys.
    /// Returns false if the key is not recognized.
    pub fn set_tag(&mut self, key: &str, value: &str) -> bool {
        if self.names.set(key, value) {
            return true;
        }

        let kind = match key {
            "junction:ref" => SignKind::ExitNumber,
            "destination:ref" => SignKind::ExitBranch,
            "destination:ref:to" | "destination" => SignKind::ExitToward,
            "junction:name" => SignKind::ExitName,
            _ => return false,
        };

        self.sign.extend(
            split_tag_tokens(value)
                .into_iter()
                .map(|text| SignToken { kind, text }),
        );
        true
    }
}

/// Road classification, from most to least important.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RoadClass {
    Motorway,
    Trunk,
    Primary,
    Secondary,
    Tertiary,
    Unclassified,
    Residential,
    #[default]
    ServiceOther,
}

impl std::str::FromStr for RoadClass {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "motorway" => Ok(Self::Motorway),
            "trunk" => Ok(Self::Trunk),
            "primary" => Ok(Self::Primary),
            "secondary" => Ok(Self::Secondary),
            "tertiary" => Ok(Self::Tertiary),
            "unclassified" => Ok(Self::Unclassified),
            "residential" => Ok(Self::Residential),
            "service_other" | "service" => Ok(Self::ServiceOther),
            _ => Err(()),
        }
    }
}

/// What an [Edge] is used for.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EdgeUse {
    #[default]
    Road,
    Ramp,
    TurnChannel,
    Ferry,
    Footway,
    Cycleway,
    Rail,
    Bus,
    TransitConnection,
}

impl std::str::FromStr for EdgeUse {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "road" => Ok(Self::Road),
            "ramp" => Ok(Self::Ramp),
            "turn_channel" => Ok(Self::TurnChannel),
            "ferry" => Ok(Self::Ferry),
            "footway" => Ok(Self::Footway),
            "cycleway" => Ok(Self::Cycleway),
            "rail" => Ok(Self::Rail),
            "bus" => Ok(Self::Bus),
            "transit_connection" => Ok(Self::TransitConnection),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TravelMode {
    #[default]
    Drive,
    Pedestrian,
    Bicycle,
    Transit,
}

impl std::str::FromStr for TravelMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drive" => Ok(Self::Drive),
            "pedestrian" => Ok(Self::Pedestrian),
            "bicycle" => Ok(Self::Bicycle),
            "transit" => Ok(Self::Transit),
            _ => Err(()),
        }
    }
}

/// Kind of a guide sign element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignKind {
    ExitNumber,
    ExitBranch,
    ExitToward,
    ExitName,
}

impl SignKind {
    pub const ALL: [SignKind; 4] = [
        SignKind::ExitNumber,
        SignKind::ExitBranch,
        SignKind::ExitToward,
        SignKind::ExitName,
    ];
}

/// Single piece of raw guide sign text carried by an [Edge].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignToken {
    pub kind: SignKind,
    pub text: String,
}

/// Transit line metadata of a transit [Edge].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TransitRouteInfo {
    pub onestop_id: String,
    pub short_name: String,
    pub long_name: String,
    pub headsign: String,
    pub color: u32,
    pub text_color: u32,
    pub operator_onestop_id: String,
}

impl TransitRouteInfo {
    /// Checks if two edges belong to the same transit line.
    pub fn same_route(&self, other: &Self) -> bool {
        self.onestop_id == other.onestop_id && self.short_name == other.short_name
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TransitStopKind {
    #[default]
    Stop,
    Station,
}

/// Transit stop served at a [Node].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TransitStopInfo {
    pub kind: TransitStopKind,
    pub onestop_id: String,
    pub name: String,
    pub arrival_date_time: String,
    pub departure_date_time: String,
}

/// Role of a [Location] within the trip.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LocationKind {
    #[default]
    Break,
    Through,
    Via,
    BreakThrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideOfStreet {
    Left,
    Right,
    None,
}

/// One of the locations the trip was requested through.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub kind: LocationKind,
    pub heading: Option<u32>,
    pub name: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub date_time: Option<String>,
    pub side_of_street: Option<SideOfStreet>,
}

#[cfg(test)]
mod tests {
    use super::testing::PathBuilder;
    use super::*;

    #[test]
    fn edge_accessors() {
        let path = PathBuilder::new()
            .edge(0.1, 0, 0)
            .edge(0.2, 90, 90)
            .edge(0.3, 180, 180)
            .build();

        assert_eq!(path.nodes.len(), 4);
        assert_eq!(path.edge_count(), 3);
        assert_eq!(path.last_node_index(), 3);

        assert!(path.prev_edge(0).is_none());
        assert_eq!(path.curr_edge(0).unwrap().length, 0.1);
        assert_eq!(path.next_edge(0).unwrap().length, 0.2);

        assert_eq!(path.prev_edge(3).unwrap().length, 0.3);
        assert!(path.curr_edge(3).is_none());
        assert!(path.next_edge(3).is_none());
        assert!(path.next_edge(10).is_none());
    }

    #[test]
    fn edge_time() {
        let path = PathBuilder::new().edge(0.1, 0, 0).edge(0.2, 0, 0).build();
        assert_eq!(path.edge_time(0), 10.0);
        assert_eq!(path.edge_time(1), 10.0);
        assert_eq!(path.edge_time(2), 0.0);
    }

    fn token(kind: SignKind, text: &str) -> SignToken {
        SignToken {
            kind,
            text: text.to_string(),
        }
    }

    #[test]
    fn set_tag_signs() {
        let mut e = Edge::default();
        assert!(e.set_tag("junction:ref", "12A"));
        assert!(e.set_tag("destination:ref", "I-95;US 1"));
        assert!(e.set_tag("destination", "Trenton"));
        assert!(e.set_tag("name", "Main Street"));
        assert!(!e.set_tag("surface", "asphalt"));

        assert_eq!(
            e.sign,
            vec![
                token(SignKind::ExitNumber, "12A"),
                token(SignKind::ExitBranch, "I-95"),
                token(SignKind::ExitBranch, "US 1"),
                token(SignKind::ExitToward, "Trenton"),
            ]
        );
        assert_eq!(e.names.name, "Main Street");
    }

    #[test]
    fn destination_ref_is_branch_and_ref_to_is_toward() {
        let mut e = Edge::default();
        e.set_tag("destination:ref", "I-80");
        e.set_tag("destination:ref:to", "I-287");

        assert_eq!(e.sign[0].kind, SignKind::ExitBranch);
        assert_eq!(e.sign[0].text, "I-80");
        assert_eq!(e.sign[1].kind, SignKind::ExitToward);
        assert_eq!(e.sign[1].text, "I-287");
    }
}
