//! Path-based navigation between the landing page and the map page.

use std::fmt;

/// Pages the application can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`
    Landing,
    /// `/map`
    Map,
}

impl Route {
    /// Resolves a path. `/` must match exactly; `/map` also matches nested
    /// paths. Query strings and fragments are ignored.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path
            .split(|c| c == '?' || c == '#')
            .next()
            .unwrap_or_default();

        if path == "/" {
            return Some(Route::Landing);
        }

        let rest = path.strip_prefix("/map")?;
        if rest.is_empty() || rest.starts_with('/') {
            Some(Route::Map)
        } else {
            None
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Map => "/map",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// In-memory browser-style history
#[derive(Debug, Clone)]
pub struct Router {
    history: Vec<String>,
}

impl Router {
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            history: vec![initial_path.into()],
        }
    }

    pub fn current_path(&self) -> &str {
        self.history.last().map_or("/", String::as_str)
    }

    /// Route of the current path; `None` renders nothing
    pub fn current_route(&self) -> Option<Route> {
        Route::from_path(self.current_path())
    }

    /// Pushes `path` onto the history. Returns `false` when already there.
    pub fn navigate(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if path == self.current_path() {
            return false;
        }
        log::info!("navigate {} -> {}", self.current_path(), path);
        self.history.push(path);
        true
    }

    pub fn can_go_back(&self) -> bool {
        self.history.len() > 1
    }

    /// Pops the current entry; the first entry is never popped
    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        if let Some(left) = self.history.pop() {
            log::info!("back {} -> {}", left, self.current_path());
        }
        true
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::Landing.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_matching() {
        assert_eq!(Route::from_path("/"), Some(Route::Landing));
        assert_eq!(Route::from_path("/map"), Some(Route::Map));
        assert_eq!(Route::from_path("/map/"), Some(Route::Map));
        assert_eq!(Route::from_path("/map?id=2#top"), Some(Route::Map));
        assert_eq!(Route::from_path("/?lang=ru"), Some(Route::Landing));
        assert_eq!(Route::from_path("/mapping"), None);
        assert_eq!(Route::from_path("/about"), None);
        assert_eq!(Route::from_path(""), None);
    }

    #[test]
    fn test_navigation_history() {
        let mut router = Router::default();
        assert_eq!(router.current_route(), Some(Route::Landing));
        assert!(!router.can_go_back());

        assert!(router.navigate("/map"));
        assert!(!router.navigate("/map"));
        assert_eq!(router.current_route(), Some(Route::Map));

        assert!(router.back());
        assert_eq!(router.current_path(), "/");
        assert!(!router.back());
    }
}
