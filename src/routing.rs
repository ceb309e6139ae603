use std::fmt;

use crate::catalog::DeskRecord;

const ADMIN_SEGMENT: &str = "admin";

/// The gallery's three URL shapes: `/`, `/admin` and `/<desk-slug>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Admin,
    Desk(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim()
            .trim_matches('/');

        match path {
            "" => Self::Home,
            ADMIN_SEGMENT => Self::Admin,
            slug => Self::Desk(slug.to_string()),
        }
    }

    pub fn for_desk(desk: &DeskRecord) -> Self {
        Self::Desk(desk.slug.clone())
    }

    pub fn slug(&self) -> Option<&str> {
        match self {
            Self::Desk(slug) => Some(slug),
            Self::Home | Self::Admin => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => f.write_str("/"),
            Self::Admin => write!(f, "/{ADMIN_SEGMENT}"),
            Self::Desk(slug) => write!(f, "/{slug}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_desk;

    #[test]
    fn parse_recognizes_home_admin_and_desk_paths() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/admin/"), Route::Admin);
        assert_eq!(
            Route::parse("/ada-lovelace"),
            Route::Desk("ada-lovelace".to_string())
        );
    }

    #[test]
    fn parse_ignores_query_and_fragment() {
        assert_eq!(
            Route::parse("/ada-lovelace?ref=share#photos"),
            Route::Desk("ada-lovelace".to_string())
        );
        assert_eq!(Route::parse("/?utm=x"), Route::Home);
    }

    #[test]
    fn desk_route_round_trips_through_display() {
        let desk = sample_desk(1, "Grace Hopper");
        let route = Route::for_desk(&desk);

        assert_eq!(route.to_string(), "/grace-hopper");
        assert_eq!(Route::parse(&route.to_string()), route);
        assert_eq!(route.slug(), Some("grace-hopper"));
        assert_eq!(Route::Admin.to_string(), "/admin");
    }
}
