//! Walks schema.org JSON-LD payloads looking for screening events.
//!
//! Sites nest their events differently (`@graph`, arrays of arrays, events
//! hanging off an `Organization`), so the walk visits every object in the
//! document instead of expecting one shape.

use serde_json::{Map, Value};

/// Nesting deeper than this is not walked.
pub const MAX_DEPTH: usize = 64;

/// An event node that carries a start value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventNode {
    pub title: String,
    pub start: String,
    pub hall: String,
}

/// Visits every JSON object reachable from `root`, parents before children.
/// Members for which `prune(object, key)` is true are not descended into.
/// Uses an explicit stack so hostile payloads cannot exhaust the call stack.
pub fn walk_objects<'a>(
    root: &'a Value,
    prune: impl Fn(&Map<String, Value>, &str) -> bool,
    mut visit: impl FnMut(&'a Map<String, Value>),
) {
    let mut stack: Vec<(&'a Value, usize)> = vec![(root, 0)];
    while let Some((node, depth)) = stack.pop() {
        if depth > MAX_DEPTH {
            continue;
        }
        match node {
            Value::Object(map) => {
                visit(map);
                stack.extend(
                    map.iter()
                        .rev()
                        .filter(|(key, _)| !prune(map, key))
                        .map(|(_, child)| (child, depth + 1)),
                );
            }
            Value::Array(items) => {
                stack.extend(items.iter().rev().map(|child| (child, depth + 1)));
            }
            _ => {}
        }
    }
}

/// Collects every event/screening/movie node with a string `startDate`.
/// An event's `superEvent` is only read for its location, never listed.
pub fn find_events(root: &Value) -> Vec<EventNode> {
    let mut events = Vec::new();
    let prune = |node: &Map<String, Value>, key: &str| key == "superEvent" && is_event_type(node);
    walk_objects(root, prune, |node| {
        if !is_event_type(node) {
            return;
        }
        let Some(start) = node.get("startDate").and_then(Value::as_str) else {
            return;
        };
        events.push(EventNode {
            title: title_of(node).unwrap_or_default(),
            start: start.trim().to_string(),
            hall: hall_of(node).unwrap_or_default(),
        });
    });
    events
}

fn is_event_type(node: &Map<String, Value>) -> bool {
    let matches = |t: &str| t.ends_with("Event") || t.ends_with("Movie");
    match node.get("@type") {
        Some(Value::String(t)) => matches(t),
        Some(Value::Array(types)) => types.iter().filter_map(Value::as_str).any(matches),
        _ => false,
    }
}

fn non_empty(v: &Value) -> Option<String> {
    v.as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// First object of a value that may be an object or an array of objects.
fn first_object(v: &Value) -> Option<&Map<String, Value>> {
    match v {
        Value::Object(map) => Some(map),
        Value::Array(items) => items.iter().find_map(Value::as_object),
        _ => None,
    }
}

fn title_of(node: &Map<String, Value>) -> Option<String> {
    node.get("name").and_then(non_empty).or_else(|| {
        node.get("workPresented")
            .and_then(first_object)
            .and_then(|work| work.get("name"))
            .and_then(non_empty)
    })
}

fn location_name(location: &Value) -> Option<String> {
    if let Some(s) = non_empty(location) {
        return Some(s);
    }
    let place = first_object(location)?;
    place.get("name").and_then(non_empty).or_else(|| {
        let address = place.get("address")?;
        non_empty(address).or_else(|| {
            address
                .as_object()
                .and_then(|a| a.get("streetAddress"))
                .and_then(non_empty)
        })
    })
}

fn hall_of(node: &Map<String, Value>) -> Option<String> {
    node.get("location").and_then(location_name).or_else(|| {
        node.get("superEvent")
            .and_then(first_object)
            .and_then(|parent| parent.get("location"))
            .and_then(location_name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn finds_top_level_event() {
        let doc = json!({
            "@context": "https://schema.org",
            "@type": "ScreeningEvent",
            "name": "Vlny",
            "startDate": "2025-09-07T19:30:00+02:00",
            "location": {"@type": "Place", "name": "Sál 1"}
        });
        assert_eq!(
            find_events(&doc),
            vec![EventNode {
                title: "Vlny".into(),
                start: "2025-09-07T19:30:00+02:00".into(),
                hall: "Sál 1".into(),
            }]
        );
    }

    #[test]
    fn nested_event_matches_top_level_event() {
        let event = json!({
            "@type": "ScreeningEvent",
            "name": "Vlny",
            "startDate": "2025-09-07T19:30:00+02:00",
            "location": {"@type": "Place", "name": "Sál 1"}
        });
        let nested = json!({
            "@graph": [
                {"@type": "Organization", "events": [[{"wrapper": event.clone()}]]}
            ]
        });
        assert_eq!(find_events(&nested), find_events(&event));
    }

    #[test]
    fn falls_back_to_work_presented_and_super_event() {
        let doc = json!([{
            "@type": ["Event", "ScreeningEvent"],
            "startDate": "2025-09-07 18:00",
            "workPresented": [{"@type": "Movie", "name": "Amélie z Montmartru"}],
            "superEvent": {"@type": "EventSeries", "location": {"name": "Velký sál"}}
        }]);
        let events = find_events(&doc);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Amélie z Montmartru");
        assert_eq!(events[0].hall, "Velký sál");
    }

    #[test]
    fn super_event_series_is_not_listed() {
        let doc = json!({
            "@type": "ScreeningEvent",
            "name": "Vlny",
            "startDate": "2025-09-07T19:30",
            "superEvent": {
                "@type": "EventSeries",
                "name": "Filmový festival",
                "startDate": "2025-09-07T10:00",
                "location": {"name": "Sál 1"}
            }
        });
        let events = find_events(&doc);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Vlny");
        assert_eq!(events[0].hall, "Sál 1");
    }

    #[test]
    fn standalone_series_is_still_found() {
        let doc = json!([{"@type": "EventSeries", "name": "Letní kino", "startDate": "2025-09-07T21:00"}]);
        assert_eq!(find_events(&doc)[0].title, "Letní kino");
    }

    #[test]
    fn reads_address_when_location_has_no_name() {
        let doc = json!({
            "@type": "Event",
            "name": "Koncert",
            "startDate": "2025-09-07T20:00",
            "location": {"address": {"streetAddress": "Vodičkova 36"}}
        });
        assert_eq!(find_events(&doc)[0].hall, "Vodičkova 36");
    }

    #[test]
    fn skips_nodes_without_start_or_event_type() {
        let doc = json!([
            {"@type": "Movie", "name": "Bez data"},
            {"@type": "Organization", "name": "Kino", "startDate": "2025-09-07"}
        ]);
        assert!(find_events(&doc).is_empty());
    }

    #[test]
    fn stops_at_depth_limit() {
        let mut doc = json!({"@type": "Event", "name": "Hluboko", "startDate": "2025-09-07T10:00"});
        for _ in 0..(MAX_DEPTH + 5) {
            doc = json!([doc]);
        }
        assert!(find_events(&doc).is_empty());
    }
}
