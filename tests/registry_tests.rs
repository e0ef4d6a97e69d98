use campus_map::{poi, prelude::*};
use std::collections::HashSet as StdHashSet;

#[test]
fn test_ids_are_unique() {
    let ids: StdHashSet<u32> = poi::registry().iter().map(|p| p.id).collect();
    assert_eq!(ids.len(), poi::registry().len());
    assert_eq!(poi::registry().len(), 5);
}

#[test]
fn test_every_point_is_on_campus() {
    let campus = LatLngBounds::new(LatLng::new(47.238, 39.707), LatLng::new(47.242, 39.714));
    for poi in poi::registry() {
        assert!(campus.contains(&poi.lat_lng()), "{} is off campus", poi.name);
        assert!(!poi.name.is_empty());
        assert!(!poi.description.is_empty());
    }
}

#[test]
fn test_icons_are_distinct() {
    let icons: StdHashSet<IconKind> = poi::registry().iter().map(|p| p.icon).collect();
    assert_eq!(icons.len(), 5);
    for poi in poi::registry() {
        assert!(poi.icon.asset_path().ends_with(&format!("{}.svg", poi.icon.name())));
    }
}

#[test]
fn test_registry_serializes_lon_lat_order() {
    let json = serde_json::to_value(poi::find(2).unwrap()).unwrap();
    assert_eq!(json["coordinate"][0].as_f64(), Some(39.70892));
    assert_eq!(json["coordinate"][1].as_f64(), Some(47.24088));
    assert_eq!(json["icon"], "sport");
}
