// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use serde::Serialize;

use crate::path::{SignKind, SignToken, TripPath};
use crate::Maneuver;

/// Single entry of a guide sign, standing for a run of identical raw tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignElement {
    pub text: String,
    pub consecutive_count: u32,
}

/// Structured guide sign content of a [Maneuver].
///
/// Every list is either absent or non-empty.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Signs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_number_elements: Option<Vec<SignElement>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_branch_elements: Option<Vec<SignElement>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_toward_elements: Option<Vec<SignElement>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_name_elements: Option<Vec<SignElement>>,
}

impl Signs {
    /// Groups raw sign tokens of an edge. Returns `None` if there are no tokens.
    pub fn from_tokens(tokens: &[SignToken]) -> Option<Self> {
        if tokens.is_empty() {
            return None;
        }

        let mut signs = Signs::default();
        for kind in SignKind::ALL {
            let texts = tokens
                .iter()
                .filter(|t| t.kind == kind)
                .map(|t| t.text.as_str());

            let elements = group_consecutive(texts);
            if !elements.is_empty() {
                *signs.elements_mut(kind) = Some(elements);
            }
        }
        Some(signs)
    }

    /// Returns the elements of the given kind, empty if absent.
    pub fn elements(&self, kind: SignKind) -> &[SignElement] {
        let elements = match kind {
            SignKind::ExitNumber => &self.exit_number_elements,
            SignKind::ExitBranch => &self.exit_branch_elements,
            SignKind::ExitToward => &self.exit_toward_elements,
            SignKind::ExitName => &self.exit_name_elements,
        };
        elements.as_deref().unwrap_or_default()
    }

    fn elements_mut(&mut self, kind: SignKind) -> &mut Option<Vec<SignElement>> {
        match kind {
            SignKind::ExitNumber => &mut self.exit_number_elements,
            SignKind::ExitBranch => &mut self.exit_branch_elements,
            SignKind::ExitToward => &mut self.exit_toward_elements,
            SignKind::ExitName => &mut self.exit_name_elements,
        }
    }
}

/// Collapses runs of identical texts into [SignElements](SignElement),
/// keeping the order in which the runs appear.
pub fn group_consecutive<'a, I: IntoIterator<Item = &'a str>>(texts: I) -> Vec<SignElement> {
    let mut elements: Vec<SignElement> = Vec::default();
    for text in texts {
        match elements.last_mut() {
            Some(last) if last.text == text => last.consecutive_count += 1,
            _ => elements.push(SignElement {
                text: text.to_string(),
                consecutive_count: 1,
            }),
        }
    }
    elements
}

/// Sets [Maneuver::signs] from the sign tokens on the first edge of every maneuver.
pub fn attach_signs(path: &TripPath, maneuvers: &mut [Maneuver]) {
    let mut attached = 0;
    for m in maneuvers.iter_mut().filter(|m| m.edge_count() > 0) {
        m.signs = path
            .curr_edge(m.begin_node_index)
            .and_then(|e| Signs::from_tokens(&e.sign));
        attached += m.signs.is_some() as usize;
    }
    log::debug!("trip {}: signs attached to {} maneuvers", path.trip_id, attached);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maneuver::build_maneuvers;
    use crate::path::testing::PathBuilder;
    use crate::path::EdgeUse;

    fn element(text: &str, consecutive_count: u32) -> SignElement {
        SignElement {
            text: text.to_string(),
            consecutive_count,
        }
    }

    #[test]
    fn groups_consecutive_tokens() {
        assert_eq!(
            group_consecutive(["I-95", "I-95", "Route 1"]),
            vec![element("I-95", 2), element("Route 1", 1)],
        );
    }

    #[test]
    fn groups_only_adjacent_runs() {
        assert_eq!(
            group_consecutive(["A", "B", "B", "A"]),
            vec![element("A", 1), element("B", 2), element("A", 1)],
        );
        assert!(group_consecutive(Vec::<&str>::new()).is_empty());
    }

    #[test]
    fn from_tokens() {
        let mut e = crate::path::Edge::default();
        e.set_tag("junction:ref", "12A");
        e.set_tag("destination", "Newark;Newark;Airport");

        let signs = Signs::from_tokens(&e.sign).unwrap();
        assert_eq!(signs.exit_number_elements, Some(vec![element("12A", 1)]));
        assert_eq!(signs.exit_branch_elements, None);
        assert_eq!(
            signs.elements(SignKind::ExitToward),
            &[element("Newark", 2), element("Airport", 1)],
        );
        assert_eq!(signs.exit_name_elements, None);
        assert!(signs.elements(SignKind::ExitName).is_empty());

        assert_eq!(Signs::from_tokens(&[]), None);
    }

    #[test]
    fn attaches_signs_of_first_edge() {
        let path = PathBuilder::new()
            .named(1.0, 0, 0, "Main Street")
            .edge_with(0.3, 20, 20, |e| {
                e.usage = EdgeUse::Ramp;
                e.set_tag("destination:ref", "I-95;I-95;US 1");
            })
            .edge_with(0.3, 20, 20, |e| {
                e.usage = EdgeUse::Ramp;
                e.set_tag("junction:name", "Clinton Junction");
            })
            .build();

        let mut maneuvers = build_maneuvers(&path).unwrap();
        attach_signs(&path, &mut maneuvers);

        assert_eq!(maneuvers.len(), 4);
        assert_eq!(maneuvers[0].signs, None);
        assert_eq!(
            maneuvers[1].signs.as_ref().unwrap().exit_branch_elements,
            Some(vec![element("I-95", 2), element("US 1", 1)]),
        );
        assert_eq!(
            maneuvers[2].signs.as_ref().unwrap().exit_name_elements,
            Some(vec![element("Clinton Junction", 1)]),
        );
        assert_eq!(maneuvers[3].signs, None);
    }
}
