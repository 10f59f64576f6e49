//! Material Finder Library
//!
//! Finds the best-ranked materials of a requested type that are stocked by
//! suppliers in a requested locality. The materials catalog is fetched from
//! an upstream service and cached; the supplier directory is fetched fresh
//! for every query.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};

#[cfg(test)]
mod tests {
    use super::*;
    use constants::*;

    #[test]
    fn test_constants_accessible() {
        assert_eq!(MATERIALS_KEY, "materials");
        assert_eq!(CATALOG_ROUNDS, 5);
        assert!(USER_AGENT.contains("Material-Finder"));
    }

    #[test]
    fn test_error_types() {
        let query_error = errors::QueryError::NoMergedMatch {
            material_type: "steel".to_string(),
        };
        let app_error = AppError::Query(query_error);

        assert_eq!(app_error.category(), "query");
        assert_eq!(app_error.exit_code(), 2);
        assert!(!app_error.is_recoverable());
    }
}
