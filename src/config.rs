//! Site-wide constants shared by the browser app and the static host.

/// Path prefix the site is published under.
pub const BASE_PATH: &str = "/saran";

pub const THEME_KEY: &str = "portfolio-theme";
pub const SOUND_KEY: &str = "portfolio-sound";

/// Query flag that swaps the page for the maintenance screen.
pub const MAINTENANCE_FLAG: &str = "maintenance";

/// Query flag that replaces the intro with the loader review switcher.
pub const LOADER_REVIEW_FLAG: &str = "loaders";

/// Prefixes `path` with [`BASE_PATH`], inserting the separating slash when the
/// caller left it out.
pub fn asset_path(path: &str) -> String {
    prefixed_path(BASE_PATH, path)
}

pub fn prefixed_path(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// True when the query string (with or without the leading `?`) names
/// `flag`, either bare or with a truthy value.
pub fn query_flag(search: &str, flag: &str) -> bool {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next()?;
            Some((key, parts.next()))
        })
        .any(|(key, value)| {
            key == flag && !matches!(value, Some("0") | Some("false") | Some("off"))
        })
}

pub fn maintenance_requested(search: &str) -> bool {
    query_flag(search, MAINTENANCE_FLAG)
}

pub fn loader_review_requested(search: &str) -> bool {
    query_flag(search, LOADER_REVIEW_FLAG)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_path_joins_with_single_slash() {
        assert_eq!(asset_path("/textures/earth.png"), "/saran/textures/earth.png");
        assert_eq!(asset_path("profile.png"), "/saran/profile.png");
        assert_eq!(prefixed_path("/site/", "/a.css"), "/site/a.css");
    }

    #[test]
    fn maintenance_flag_is_detected_in_query() {
        assert!(maintenance_requested("?maintenance"));
        assert!(maintenance_requested("?utm=x&maintenance=1"));
        assert!(!maintenance_requested("?maintenance=false"));
        assert!(!maintenance_requested(""));
        assert!(!maintenance_requested("?maintenances=1"));
        assert!(loader_review_requested("loaders=on"));
        assert!(!loader_review_requested("?maintenance"));
    }
}
