// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::RoadClass;

/// Naming tags of a road, as found on [OSM ways](https://wiki.openstreetmap.org/wiki/Key:name).
///
/// Empty strings denote missing tags.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NameTags {
    /// [ref](https://wiki.openstreetmap.org/wiki/Key:ref), possibly multi-valued.
    pub ref_: String,

    /// Ref inherited from a [route relation](https://wiki.openstreetmap.org/wiki/Relation:route).
    /// Takes precedence over [NameTags::ref_] on motorways and trunk roads.
    pub route_ref: String,

    pub int_ref: String,
    pub name: String,
    pub name_en: String,
    pub alt_name: String,
    pub official_name: String,
}

impl NameTags {
    /// Sets a tag by its OSM key. Returns false if the key is not a naming tag.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        let field = match key {
            "ref" => &mut self.ref_,
            "route_ref" => &mut self.route_ref,
            "int_ref" => &mut self.int_ref,
            "name" => &mut self.name,
            "name:en" => &mut self.name_en,
            "alt_name" => &mut self.alt_name,
            "official_name" => &mut self.official_name,
            _ => return false,
        };
        *field = value.to_string();
        true
    }

    /// Returns the display names of a road of the given class, in priority order:
    /// 1. ref tokens of motorways and trunk roads (preferring [NameTags::route_ref]),
    /// 2. name,
    /// 3. ref tokens of all other roads,
    /// 4. alt_name,
    /// 5. official_name,
    /// 6. name:en.
    ///
    /// `int_ref` is never used.
    pub fn street_names(&self, road_class: RoadClass) -> Vec<String> {
        let mut names = Vec::default();
        let limited_access = matches!(road_class, RoadClass::Motorway | RoadClass::Trunk);

        if limited_access {
            if !self.route_ref.is_empty() {
                names.extend(split_tag_tokens(&self.route_ref));
            } else if !self.ref_.is_empty() {
                names.extend(split_tag_tokens(&self.ref_));
            }
        }

        if !self.name.is_empty() {
            names.push(self.name.clone());
        }

        if !limited_access && !self.ref_.is_empty() {
            names.extend(split_tag_tokens(&self.ref_));
        }

        for extra in [&self.alt_name, &self.official_name, &self.name_en] {
            if !extra.is_empty() {
                names.push(extra.clone());
            }
        }

        return names;
    }
}

/// Splits a multi-valued tag (`"I-95;US 1"`) into its trimmed, non-empty parts.
pub fn split_tag_tokens(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(|token| token.trim())
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! names {
        {$( $k:literal : $v:literal ),+} => {{
            let mut n = NameTags::default();
            $( assert!(n.set($k, $v)); )+
            n
        }};
    }

    #[test]
    fn motorway_ref_precedes_name() {
        let n = names! {"ref": "I-95", "name": "New Jersey Turnpike"};
        assert_eq!(
            n.street_names(RoadClass::Motorway),
            vec!["I-95", "New Jersey Turnpike"],
        );
    }

    #[test]
    fn non_limited_access_ref_follows_name() {
        let n = names! {"ref": "US 1;US 9", "name": "Broad Street"};
        assert_eq!(
            n.street_names(RoadClass::Primary),
            vec!["Broad Street", "US 1", "US 9"],
        );
    }

    #[test]
    fn route_ref_replaces_ref_on_trunk() {
        let n = names! {"ref": "A1", "route_ref": "E40;A1", "name": "Autoroute"};
        assert_eq!(n.street_names(RoadClass::Trunk), vec!["E40", "A1", "Autoroute"]);
    }

    #[test]
    fn full_priority() {
        let n = names! {
            "ref": "M 5",
            "int_ref": "E 20",
            "name": "Main Street",
            "name:en": "Main Street (en)",
            "alt_name": "Old Road",
            "official_name": "Main Street West"
        };
        assert_eq!(
            n.street_names(RoadClass::Secondary),
            vec![
                "Main Street",
                "M 5",
                "Old Road",
                "Main Street West",
                "Main Street (en)",
            ],
        );
    }

    #[test]
    fn no_names() {
        assert!(NameTags::default()
            .street_names(RoadClass::Motorway)
            .is_empty());
    }

    #[test]
    fn tag_tokens() {
        assert_eq!(split_tag_tokens("I-95; US 1 ;;"), vec!["I-95", "US 1"]);
        assert!(split_tag_tokens("").is_empty());
        assert!(split_tag_tokens(" ; ").is_empty());
    }
}
