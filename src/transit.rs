// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use serde::Serialize;

use crate::path::{TransitRouteInfo, TransitStopInfo, TransitStopKind, TripPath};
use crate::Maneuver;

/// Transit line taken by a transit [Maneuver], together with the stops it passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitRoute {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onestop_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headsign: Option<String>,

    pub color: u32,
    pub text_color: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator_onestop_id: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transit_stops: Vec<TransitStop>,
}

impl TransitRoute {
    fn new(info: &TransitRouteInfo) -> Self {
        Self {
            onestop_id: non_empty(&info.onestop_id),
            short_name: non_empty(&info.short_name),
            long_name: non_empty(&info.long_name),
            headsign: non_empty(&info.headsign),
            color: info.color,
            text_color: info.text_color,
            operator_onestop_id: non_empty(&info.operator_onestop_id),
            transit_stops: Vec::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitStopType {
    Stop,
    Station,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitStop {
    #[serde(rename = "type")]
    pub kind: TransitStopType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub onestop_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_date_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_date_time: Option<String>,
}

impl From<&TransitStopInfo> for TransitStop {
    fn from(info: &TransitStopInfo) -> Self {
        Self {
            kind: match info.kind {
                TransitStopKind::Stop => TransitStopType::Stop,
                TransitStopKind::Station => TransitStopType::Station,
            },
            onestop_id: non_empty(&info.onestop_id),
            name: non_empty(&info.name),
            arrival_date_time: non_empty(&info.arrival_date_time),
            departure_date_time: non_empty(&info.departure_date_time),
        }
    }
}

/// Sets [Maneuver::transit_route] of every maneuver beginning on a transit edge.
///
/// Route details come from the first edge of the maneuver, and stops
/// from all nodes the maneuver touches, boarding and alighting nodes included.
pub fn attach_transit(path: &TripPath, maneuvers: &mut [Maneuver]) {
    for m in maneuvers.iter_mut() {
        let info = match path.curr_edge(m.begin_node_index) {
            Some(e) if e.is_transit() && m.edge_count() > 0 => e.transit_route.as_ref(),
            _ => None,
        };

        m.transit_route = info.map(|info| {
            let mut route = TransitRoute::new(info);
            route.transit_stops = path.nodes[m.begin_node_index..=m.end_node_index]
                .iter()
                .filter_map(|n| n.transit_stop.as_ref())
                .map(TransitStop::from)
                .collect();

            log::debug!(
                "trip {}: transit maneuver at node {} on route {:?} with {} stops",
                path.trip_id,
                m.begin_node_index,
                info.onestop_id,
                route.transit_stops.len(),
            );
            route
        });
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
