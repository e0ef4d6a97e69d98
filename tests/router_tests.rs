use campus_map::prelude::*;

#[test]
fn test_landing_and_map_routes() {
    let mut router = Router::default();
    assert_eq!(router.current_route(), Some(Route::Landing));

    assert!(router.navigate(Route::Map.path()));
    assert_eq!(router.current_path(), "/map");
    assert_eq!(router.current_route(), Some(Route::Map));
}

#[test]
fn test_unknown_path_renders_nothing() {
    let mut router = Router::new("/map");
    router.navigate("/campus");
    assert_eq!(router.current_route(), None);

    assert!(router.back());
    assert_eq!(router.current_route(), Some(Route::Map));
}

#[test]
fn test_route_display_is_its_path() {
    assert_eq!(Route::Landing.to_string(), "/");
    assert_eq!(Route::Map.to_string(), "/map");
    assert_eq!(Route::from_path(&Route::Map.to_string()), Some(Route::Map));
}
