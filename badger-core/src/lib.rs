pub mod gamemode;
pub mod permission;
pub mod text;

pub use gamemode::GameMode;
pub use permission::{PermissionOracle, PermissionTable};

/// Case-insensitive name comparison. Agrees with maps keyed by `to_lowercase`,
/// so it also folds non-ASCII letters.
#[must_use]
pub fn names_match(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::names_match;

    #[test]
    fn names_match_folds_unicode() {
        assert!(names_match("Übung", "übung"));
        assert!(names_match("world", "WORLD"));
        assert!(!names_match("world", "world_nether"));
    }
}
