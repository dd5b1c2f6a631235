// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::io;
use std::str::FromStr;

use quick_xml::events::{BytesStart, Event};

use crate::path::{
    Edge, Location, LocationKind, Node, SideOfStreet, TransitRouteInfo, TransitStopInfo,
    TransitStopKind, TripPath,
};
use crate::Error;

pub fn read_trip_path_from_io<R: io::BufRead>(reader: R) -> Result<TripPath, Error> {
    Reader::new(IoParser::new(reader)).read()
}

pub fn read_trip_path_from_buffer(b: &[u8]) -> Result<TripPath, Error> {
    Reader::new(BufParser::new(b)).read()
}

/// Parser is a trait for objects which can parse XML.
///
/// This trait only exists to fix the mismatch of
/// [quick_xml::Reader::read_event] when working on buffered data
/// and [quick_xml::Reader::read_event_into] when working on IO.
trait Parser {
    fn read_event<'a>(&'a mut self) -> quick_xml::Result<Event<'a>>;
}

/// IoParser implements [Parser] over an [std::io::BufRead].
struct IoParser<R: io::BufRead>(quick_xml::Reader<R>, Vec<u8>);

impl<R: io::BufRead> IoParser<R> {
    #[inline]
    fn new(reader: R) -> Self {
        Self(quick_xml::Reader::from_reader(reader), Vec::default())
    }
}

impl<R: io::BufRead> Parser for IoParser<R> {
    #[inline]
    fn read_event<'a>(&'a mut self) -> quick_xml::Result<Event<'a>> {
        self.1.clear();
        self.0.read_event_into(&mut self.1)
    }
}

/// BufParser implements [Parser] over a slice of bytes (`&[u8]`).
struct BufParser<'a>(quick_xml::Reader<&'a [u8]>);

impl<'a> BufParser<'a> {
    #[inline]
    fn new(data: &'a [u8]) -> Self {
        Self(quick_xml::Reader::from_reader(data))
    }
}

impl<'a> Parser for BufParser<'a> {
    #[inline]
    fn read_event<'b>(&'b mut self) -> quick_xml::Result<Event<'b>> {
        self.0.read_event()
    }
}

/// Reader assembles a [TripPath] from a `<trip_path>` document.
///
/// Elements are only attached to their enclosing element
/// (`<tag>` and `<transit_route>` to `<edge>`, `<edge>` and `<transit_stop>` to `<node>`);
/// misplaced elements are ignored.
struct Reader<P: Parser> {
    parser: P,
    path: Option<TripPath>,
    node: Option<Node>,
    edge: Option<Edge>,
}

impl<P: Parser> Reader<P> {
    #[inline]
    fn new(parser: P) -> Self {
        Self {
            parser,
            path: None,
            node: None,
            edge: None,
        }
    }

    fn read(mut self) -> Result<TripPath, Error> {
        loop {
            match self.parser.read_event()?.into_owned() {
                Event::Empty(start) => {
                    self.open(&start)?;
                    self.close(start.local_name().as_ref());
                }

                Event::Start(start) => self.open(&start)?,

                Event::End(end) => {
                    if self.close(end.local_name().as_ref()) {
                        break;
                    }
                }

                Event::Eof => break,

                _ => {}
            }
        }

        self.path.ok_or(Error::MissingElement("trip_path"))
    }

    fn open(&mut self, start: &BytesStart<'_>) -> Result<(), Error> {
        match start.local_name().as_ref() {
            b"trip_path" => self.path = Some(parse_trip_path(start)?),

            b"location" => {
                let location = parse_location(start)?;
                if let Some(path) = self.path.as_mut() {
                    path.locations.push(location);
                }
            }

            b"node" => self.node = Some(parse_node(start)?),

            b"edge" => self.edge = Some(parse_edge(start)?),

            b"tag" => {
                let (k, v) = parse_tag(start)?;
                if let Some(edge) = self.edge.as_mut() {
                    if !edge.set_tag(&k, &v) {
                        log::trace!("ignoring unknown edge tag {}={}", k, v);
                    }
                }
            }

            b"transit_route" => {
                let route = parse_transit_route(start)?;
                if let Some(edge) = self.edge.as_mut() {
                    edge.transit_route = Some(route);
                }
            }

            b"transit_stop" => {
                let stop = parse_transit_stop(start)?;
                if let Some(node) = self.node.as_mut() {
                    node.transit_stop = Some(stop);
                }
            }

            _ => {}
        }

        Ok(())
    }

    /// Finishes an element. Returns true once the whole `<trip_path>` was read.
    fn close(&mut self, name: &[u8]) -> bool {
        match name {
            b"edge" => {
                if let (Some(node), Some(edge)) = (self.node.as_mut(), self.edge.take()) {
                    node.edge = Some(edge);
                }
                false
            }

            b"node" => {
                if let (Some(path), Some(node)) = (self.path.as_mut(), self.node.take()) {
                    path.nodes.push(node);
                }
                false
            }

            b"trip_path" => self.path.is_some(),

            _ => false,
        }
    }
}

/// Attributes of a single XML element, with typed accessors.
struct Attributes {
    element: &'static str,
    values: HashMap<String, String>,
}

impl Attributes {
    fn read(element: &'static str, start: &BytesStart<'_>) -> Result<Self, Error> {
        let mut values = HashMap::default();
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            values.insert(key, value);
        }
        Ok(Self { element, values })
    }

    fn invalid(&self, attribute: &'static str) -> Error {
        Error::InvalidAttribute {
            element: self.element,
            attribute,
            value: self.values.get(attribute).cloned().unwrap_or_default(),
        }
    }

    /// Returns the value of an attribute, or an empty string if it's missing.
    fn string(&self, key: &str) -> String {
        self.values.get(key).cloned().unwrap_or_default()
    }

    /// Returns the value of an attribute, or None if it's missing or empty.
    fn text(&self, key: &str) -> Option<String> {
        self.values.get(key).filter(|v| !v.is_empty()).cloned()
    }

    fn parse_with<T, F>(&self, key: &'static str, f: F) -> Result<Option<T>, Error>
    where
        F: FnOnce(&str) -> Option<T>,
    {
        match self.values.get(key) {
            None => Ok(None),
            Some(v) => f(v.trim()).map(Some).ok_or_else(|| self.invalid(key)),
        }
    }

    fn parse<T: FromStr>(&self, key: &'static str) -> Result<Option<T>, Error> {
        self.parse_with(key, |v| v.parse().ok())
    }

    fn parse_or_default<T: FromStr + Default>(&self, key: &'static str) -> Result<T, Error> {
        Ok(self.parse(key)?.unwrap_or_default())
    }

    fn flag(&self, key: &'static str) -> Result<bool, Error> {
        let flag = self.parse_with(key, |v| match v {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        })?;
        Ok(flag.unwrap_or(false))
    }
}

fn parse_trip_path(start: &BytesStart<'_>) -> Result<TripPath, Error> {
    let a = Attributes::read("trip_path", start)?;
    Ok(TripPath {
        trip_id: a.parse_or_default("trip_id")?,
        leg_id: a.parse_or_default("leg_id")?,
        leg_count: a.parse("leg_count")?.unwrap_or(1),
        locations: Vec::default(),
        nodes: Vec::default(),
        shape: a.string("shape"),
    })
}

fn parse_location(start: &BytesStart<'_>) -> Result<Location, Error> {
    let a = Attributes::read("location", start)?;

    let lat: f64 = a.parse("lat")?.ok_or_else(|| a.invalid("lat"))?;
    let lng: f64 = a.parse("lng")?.ok_or_else(|| a.invalid("lng"))?;
    if !lat.is_finite() || !lng.is_finite() {
        return Err(a.invalid(if lat.is_finite() { "lng" } else { "lat" }));
    }

    Ok(Location {
        lat,
        lng,
        kind: a
            .parse_with("type", parse_location_kind)?
            .unwrap_or_default(),
        heading: a.parse("heading")?,
        name: a.text("name"),
        street: a.text("street"),
        city: a.text("city"),
        state: a.text("state"),
        postal_code: a.text("postal_code"),
        country: a.text("country"),
        date_time: a.text("date_time"),
        side_of_street: a.parse_with("side_of_street", parse_side_of_street)?,
    })
}

fn parse_node(start: &BytesStart<'_>) -> Result<Node, Error> {
    let a = Attributes::read("node", start)?;
    Ok(Node {
        edge: None,
        elapsed_time: a.parse_or_default("elapsed_time")?,
        intersecting_edge_count: a.parse_or_default("intersecting_edges")?,
        transit_stop: None,
    })
}

fn parse_edge(start: &BytesStart<'_>) -> Result<Edge, Error> {
    let a = Attributes::read("edge", start)?;

    let length: f32 = a.parse("length")?.ok_or_else(|| a.invalid("length"))?;
    if !length.is_finite() || length < 0.0 {
        return Err(a.invalid("length"));
    }

    Ok(Edge {
        length,
        begin_heading: a.parse_or_default::<u32>("begin_heading")? % 360,
        end_heading: a.parse_or_default::<u32>("end_heading")? % 360,
        begin_shape_index: a.parse_or_default("begin_shape_index")?,
        end_shape_index: a.parse_or_default("end_shape_index")?,
        road_class: a.parse_or_default("road_class")?,
        usage: a.parse_or_default("use")?,
        travel_mode: a.parse_or_default("travel_mode")?,
        roundabout: a.flag("roundabout")?,
        toll: a.flag("toll")?,
        unpaved: a.flag("unpaved")?,
        ..Edge::default()
    })
}

fn parse_tag(start: &BytesStart<'_>) -> Result<(String, String), Error> {
    let a = Attributes::read("tag", start)?;
    let k = a.text("k").ok_or_else(|| a.invalid("k"))?;
    Ok((k, a.string("v")))
}

fn parse_transit_route(start: &BytesStart<'_>) -> Result<TransitRouteInfo, Error> {
    let a = Attributes::read("transit_route", start)?;
    Ok(TransitRouteInfo {
        onestop_id: a.string("onestop_id"),
        short_name: a.string("short_name"),
        long_name: a.string("long_name"),
        headsign: a.string("headsign"),
        color: a.parse_with("color", parse_color)?.unwrap_or(0),
        text_color: a.parse_with("text_color", parse_color)?.unwrap_or(0),
        operator_onestop_id: a.string("operator_onestop_id"),
    })
}

fn parse_transit_stop(start: &BytesStart<'_>) -> Result<TransitStopInfo, Error> {
    let a = Attributes::read("transit_stop", start)?;
    Ok(TransitStopInfo {
        kind: a
            .parse_with("type", |v| match v {
                "stop" => Some(TransitStopKind::Stop),
                "station" => Some(TransitStopKind::Station),
                _ => None,
            })?
            .unwrap_or_default(),
        onestop_id: a.string("onestop_id"),
        name: a.string("name"),
        arrival_date_time: a.string("arrival_date_time"),
        departure_date_time: a.string("departure_date_time"),
    })
}

fn parse_location_kind(s: &str) -> Option<LocationKind> {
    match s {
        "break" => Some(LocationKind::Break),
        "through" => Some(LocationKind::Through),
        "via" => Some(LocationKind::Via),
        "break_through" => Some(LocationKind::BreakThrough),
        _ => None,
    }
}

fn parse_side_of_street(s: &str) -> Option<SideOfStreet> {
    match s {
        "left" => Some(SideOfStreet::Left),
        "right" => Some(SideOfStreet::Right),
        "none" => Some(SideOfStreet::None),
        _ => None,
    }
}

/// Parses a [GTFS-style](https://gtfs.org/schedule/reference/#routestxt) hex color,
/// with an optional leading `#`.
fn parse_color(s: &str) -> Option<u32> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() == 6 {
        u32::from_str_radix(hex, 16).ok()
    } else {
        None
    }
}
