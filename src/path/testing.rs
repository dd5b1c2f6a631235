// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::{Edge, Location, LocationKind, Node, TransitStopInfo, TripPath};

/// Helper for fabricating [TripPaths](TripPath) in tests.
///
/// Every edge advances the shape by one point and the clock by 10 seconds.
pub(crate) struct PathBuilder {
    path: TripPath,
    shape_index: u32,
    elapsed_time: f32,
}

impl PathBuilder {
    pub(crate) fn new() -> Self {
        Self {
            path: TripPath {
                trip_id: 1,
                leg_id: 0,
                leg_count: 1,
                locations: Vec::default(),
                nodes: vec![Node::default()],
                shape: "_p~iF~ps|U_ulLnnqC".to_string(),
            },
            shape_index: 0,
            elapsed_time: 0.0,
        }
    }

    /// Appends a plain road edge.
    pub(crate) fn edge(self, length: f32, begin_heading: u32, end_heading: u32) -> Self {
        self.edge_with(length, begin_heading, end_heading, |_| {})
    }

    /// Appends an edge, letting `f` customize it before it's stored.
    pub(crate) fn edge_with<F: FnOnce(&mut Edge)>(
        mut self,
        length: f32,
        begin_heading: u32,
        end_heading: u32,
        f: F,
    ) -> Self {
        let mut edge = Edge {
            length,
            begin_heading,
            end_heading,
            begin_shape_index: self.shape_index,
            end_shape_index: self.shape_index + 1,
            ..Edge::default()
        };
        f(&mut edge);

        self.shape_index += 1;
        self.elapsed_time += 10.0;

        self.last_node().edge = Some(edge);
        self.path.nodes.push(Node {
            elapsed_time: self.elapsed_time,
            ..Node::default()
        });
        self
    }

    /// Appends a named road edge.
    pub(crate) fn named(
        self,
        length: f32,
        begin_heading: u32,
        end_heading: u32,
        name: &str,
    ) -> Self {
        self.edge_with(length, begin_heading, end_heading, |e| {
            e.set_tag("name", name);
        })
    }

    /// Sets the number of intersecting edges at the current (last) node.
    pub(crate) fn intersections(mut self, count: u32) -> Self {
        self.last_node().intersecting_edge_count = count;
        self
    }

    /// Sets the transit stop served at the current (last) node.
    pub(crate) fn stop(mut self, stop: TransitStopInfo) -> Self {
        self.last_node().transit_stop = Some(stop);
        self
    }

    pub(crate) fn location(mut self, location: Location) -> Self {
        self.path.locations.push(location);
        self
    }

    pub(crate) fn build(mut self) -> TripPath {
        if self.path.locations.is_empty() {
            self.path.locations = vec![
                Location {
                    lat: 52.2297,
                    lng: 21.0122,
                    kind: LocationKind::Break,
                    ..Location::default()
                },
                Location {
                    lat: 52.2319,
                    lng: 21.0067,
                    kind: LocationKind::Break,
                    ..Location::default()
                },
            ];
        }
        self.path
    }

    fn last_node(&mut self) -> &mut Node {
        self.path
            .nodes
            .last_mut()
            .expect("PathBuilder always holds at least one node")
    }
}
