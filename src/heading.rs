// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::path::{Edge, TripPath, MIN_EDGE_LENGTH};

/// Returns a copy of the path with the headings of ~0-length edges
/// (shorter than [MIN_EDGE_LENGTH]) replaced by headings of their neighbors.
///
/// The begin heading is taken from the end of the previous edge, falling back to the
/// beginning of the next edge. The end heading is taken from the beginning of the
/// next edge, falling back to the end of the previous edge. Neighbors which are
/// themselves too short are never used, so an edge in the middle of a run of three
/// or more short edges keeps its original headings.
///
/// Only headings of the input path are ever read, which makes this function idempotent.
pub fn normalize_headings(path: &TripPath) -> TripPath {
    let mut corrected = path.clone();

    for idx in 0..path.nodes.len() {
        let curr = match path.curr_edge(idx) {
            Some(e) if e.length < MIN_EDGE_LENGTH => e,
            _ => continue,
        };

        let prev = path.prev_edge(idx).filter(|&e| is_trusted(e));
        let next = path.next_edge(idx).filter(|&e| is_trusted(e));

        let begin_heading = prev
            .map(|e| e.end_heading)
            .or_else(|| next.map(|e| e.begin_heading))
            .unwrap_or(curr.begin_heading);

        let end_heading = next
            .map(|e| e.begin_heading)
            .or_else(|| prev.map(|e| e.end_heading))
            .unwrap_or(curr.end_heading);

        if let Some(edge) = corrected.nodes[idx].edge.as_mut() {
            if edge.begin_heading != begin_heading || edge.end_heading != end_heading {
                log::trace!(
                    "node {}: heading {}-{} corrected to {}-{}",
                    idx,
                    edge.begin_heading,
                    edge.end_heading,
                    begin_heading,
                    end_heading,
                );
            }
            edge.begin_heading = begin_heading;
            edge.end_heading = end_heading;
        }
    }

    corrected
}

#[inline]
fn is_trusted(e: &Edge) -> bool {
    e.length >= MIN_EDGE_LENGTH
}
