//! `GeoJSON` rendering of a scored route.
//!
//! Each segment becomes a `LineString` feature whose properties carry the
//! risk level and the colour the map draws it in.

use geo::LineString;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use safe_route_risk_models::RouteSegment;

/// Converts scored segments into a feature collection, one feature per
/// segment, in route order.
#[must_use]
pub fn segments_to_geojson(segments: &[RouteSegment]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: segments.iter().map(segment_feature).collect(),
        foreign_members: None,
    }
}

fn segment_feature(segment: &RouteSegment) -> Feature {
    let line: LineString<f64> = LineString::from(vec![
        (segment.start.lng, segment.start.lat),
        (segment.end.lng, segment.end.lat),
    ]);

    let mut properties = JsonObject::new();
    properties.insert("risk".to_string(), segment.risk.as_ref().into());
    properties.insert("color".to_string(), segment.risk.color().into());
    properties.insert(
        "estimatedIncidents".to_string(),
        segment.estimated_incidents.into(),
    );
    properties.insert(
        "region".to_string(),
        segment
            .region
            .as_deref()
            .map_or(serde_json::Value::Null, Into::into),
    );

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::from(&line))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}
