// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::path::{Edge, TripPath};
use crate::turn::{turn_degree, Turn};
use crate::Error;

use super::{Maneuver, ManeuverType};

/// Segments the edges of a (heading-normalized) [TripPath] into [Maneuvers](Maneuver).
///
/// The result always starts with a [ManeuverType::Depart] and ends with a zero-length
/// [ManeuverType::Arrive] maneuver. Every edge belongs to exactly one maneuver,
/// and shape index ranges of consecutive maneuvers meet without gaps.
///
/// Returns [Error::EmptyTripPath] if the path has no nodes.
pub fn build_maneuvers(path: &TripPath) -> Result<Vec<Maneuver>, Error> {
    if path.nodes.is_empty() {
        return Err(Error::EmptyTripPath);
    }

    let maneuvers = ManeuverBuilder::new(path).build();
    log::debug!(
        "trip {}: {} edges grouped into {} maneuvers",
        path.trip_id,
        path.edge_count(),
        maneuvers.len(),
    );
    Ok(maneuvers)
}

/// Helper object holding state of grouping path edges into maneuvers.
struct ManeuverBuilder<'a> {
    path: &'a TripPath,
    maneuvers: Vec<Maneuver>,

    /// Street names of the last edge of the previously finished maneuver.
    previous_names: Vec<String>,
}

impl<'a> ManeuverBuilder<'a> {
    fn new(path: &'a TripPath) -> Self {
        Self {
            path,
            maneuvers: Vec::default(),
            previous_names: Vec::default(),
        }
    }

    fn build(mut self) -> Vec<Maneuver> {
        let path = self.path;
        let mut current: Option<Maneuver> = None;
        let mut last_edge: Option<&Edge> = None;

        let edges = path
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(idx, node)| node.edge.as_ref().map(|e| (idx, e)));

        for (idx, edge) in edges {
            let mut maneuver = match (current.take(), last_edge) {
                (Some(m), Some(prev)) if self.is_boundary(idx, prev, edge) => {
                    let kind = maneuver_type(prev, edge);
                    self.finish(m);
                    self.begin(kind, idx, prev, edge)
                }
                (Some(m), _) => m,
                (None, _) => Maneuver::new(
                    ManeuverType::Depart,
                    idx,
                    edge.begin_shape_index,
                    edge.begin_heading,
                ),
            };

            self.extend(&mut maneuver, idx, edge);
            current = Some(maneuver);
            last_edge = Some(edge);
        }

        match current {
            Some(m) => self.finish(m),
            None => self
                .maneuvers
                .push(Maneuver::new(ManeuverType::Depart, 0, 0, 0)),
        }

        self.push_arrive(last_edge);
        self.maneuvers
    }

    /// Starts a new maneuver at the edge leaving node `idx`, after `prev`.
    fn begin(&self, kind: ManeuverType, idx: usize, prev: &Edge, edge: &Edge) -> Maneuver {
        let mut m = Maneuver::new(kind, idx, edge.begin_shape_index, edge.begin_heading);
        m.turn = Turn::between(prev.end_heading, edge.begin_heading);

        let names = dedup_names(edge.street_names());
        if names != self.previous_names {
            m.begin_street_names = names;
        }

        m
    }

    /// Adds the edge leaving node `idx` to the maneuver.
    fn extend(&self, m: &mut Maneuver, idx: usize, edge: &Edge) {
        m.end_node_index = idx + 1;
        m.end_shape_index = edge.end_shape_index;
        m.length += edge.length;
        m.time += self.path.edge_time(idx);
        m.street_names = dedup_names(edge.street_names());
        m.portions_toll |= edge.toll;
        m.portions_unpaved |= edge.unpaved;

        if m.kind == ManeuverType::RoundaboutEnter && edge.roundabout {
            m.roundabout_exit_count += 1;
        }
    }

    fn finish(&mut self, mut m: Maneuver) {
        if m.begin_street_names == m.street_names {
            m.begin_street_names.clear();
        }
        self.previous_names = m.street_names.clone();
        self.maneuvers.push(m);
    }

    fn push_arrive(&mut self, last_edge: Option<&Edge>) {
        let node_idx = self.path.last_node_index();
        let (shape_idx, heading) = last_edge
            .map(|e| (e.end_shape_index, e.end_heading))
            .unwrap_or_default();

        let mut arrive = Maneuver::new(ManeuverType::Arrive, node_idx, shape_idx, heading);
        arrive.street_names = self.previous_names.clone();
        self.maneuvers.push(arrive);
    }

    /// Checks whether the edge leaving node `idx` must start a new maneuver,
    /// given the last edge of the current maneuver.
    fn is_boundary(&self, idx: usize, prev: &Edge, curr: &Edge) -> bool {
        if prev.travel_mode != curr.travel_mode {
            return true;
        }

        // Transit legs are only ever split on route changes
        if prev.is_transit() || curr.is_transit() {
            return match (&prev.transit_route, &curr.transit_route) {
                (Some(a), Some(b)) => !a.same_route(b),
                (None, None) => false,
                _ => true,
            };
        }

        if prev.roundabout != curr.roundabout {
            return true;
        } else if curr.roundabout {
            return false;
        }

        if prev.is_ferry() != curr.is_ferry()
            || prev.is_ramp() != curr.is_ramp()
            || prev.is_highway() != curr.is_highway()
        {
            return true;
        }

        if !curr.sign.is_empty() && curr.sign != prev.sign {
            return true;
        }

        if !is_name_continuation(&prev.street_names(), &curr.street_names()) {
            return true;
        }

        let turn = Turn::between(prev.end_heading, curr.begin_heading);
        !turn.is_slight() && self.path.nodes[idx].intersecting_edge_count > 0
    }
}

/// Determines the type of a maneuver starting at `curr`, right after `prev`.
fn maneuver_type(prev: &Edge, curr: &Edge) -> ManeuverType {
    let degree = turn_degree(prev.end_heading, curr.begin_heading);
    let turn = Turn::from_degree(degree);
    let leftwards = turn.is_left() || (turn == Turn::UTurn && degree >= 180);
    let rightwards = turn.is_right() || (turn == Turn::UTurn && degree < 180);

    if curr.is_transit() {
        if prev.is_transit() {
            ManeuverType::TransitTransfer
        } else {
            ManeuverType::Transit
        }
    } else if curr.roundabout && !prev.roundabout {
        ManeuverType::RoundaboutEnter
    } else if prev.roundabout && !curr.roundabout {
        ManeuverType::RoundaboutExit
    } else if curr.is_ferry() && !prev.is_ferry() {
        ManeuverType::FerryEnter
    } else if prev.is_ferry() && !curr.is_ferry() {
        ManeuverType::FerryExit
    } else if curr.is_ramp() && !prev.is_ramp() && prev.is_highway() {
        if leftwards {
            ManeuverType::ExitLeft
        } else {
            ManeuverType::ExitRight
        }
    } else if curr.is_ramp() && !prev.is_ramp() {
        if leftwards {
            ManeuverType::RampLeft
        } else if rightwards {
            ManeuverType::RampRight
        } else {
            ManeuverType::RampStraight
        }
    } else if prev.is_ramp() && !curr.is_ramp() && curr.is_highway() {
        ManeuverType::Merge
    } else {
        ManeuverType::from_turn(turn, degree)
    }
}

/// Checks if a road with names `curr` continues a road with names `prev`:
/// they share at least one name, or both are unnamed.
fn is_name_continuation(prev: &[String], curr: &[String]) -> bool {
    if prev.is_empty() && curr.is_empty() {
        return true;
    }
    curr.iter().any(|name| prev.contains(name))
}

/// Removes repeated names, keeping the first occurrence of each.
fn dedup_names(names: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !unique.contains(&name) {
            unique.push(name);
        }
    }
    unique
}
