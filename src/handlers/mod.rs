//! HTTP handlers for the movie, director and genre resources.

pub mod director;
pub mod genre;
pub mod movie;

use crate::error::AppError;
use crate::model::DbId;

/// Parse an `{id}` path segment. Anything that is not an integer cannot name a row,
/// so it answers with the resource's not-found message.
fn parse_id(id_str: &str, not_found: &str) -> Result<DbId, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::NotFound(not_found.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_ids_are_not_found() {
        assert_eq!(parse_id("12", "gone").unwrap(), 12);
        assert!(matches!(parse_id("abc", "gone"), Err(AppError::NotFound(m)) if m == "gone"));
    }
}
