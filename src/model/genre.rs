//! Genre entity and request payloads.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{present, DbId, NAME_MAX_LENGTH};
use crate::service::validation::{max_length, not_blank, Validate};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Genre {
    pub id: DbId,
    pub name: String,
}

/// Body of `POST /genres/`.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NewGenre {
    pub name: String,
}

impl Validate for NewGenre {
    fn validate(&self) -> Result<(), String> {
        not_blank("name", &self.name)?;
        max_length("name", &self.name, NAME_MAX_LENGTH)
    }
}

/// Body of `PUT /genres/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct GenreChanges {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<String>,
}

impl GenreChanges {
    pub fn apply(&self, genre: &mut Genre) {
        if let Some(name) = &self.name {
            genre.name = name.clone();
        }
    }
}

impl Validate for GenreChanges {
    fn validate(&self) -> Result<(), String> {
        match &self.name {
            Some(name) => {
                not_blank("name", name)?;
                max_length("name", name, NAME_MAX_LENGTH)
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn name_is_required_on_create() {
        assert!(serde_json::from_value::<NewGenre>(json!({})).is_err());
        assert!(serde_json::from_value::<NewGenre>(json!({"name": "Drama", "title": "x"})).is_err());
    }

    #[test]
    fn empty_changes_are_valid_and_apply_nothing() {
        let changes: GenreChanges = serde_json::from_value(json!({})).unwrap();
        assert!(changes.validate().is_ok());
        let mut genre = Genre { id: 1, name: "Drama".into() };
        changes.apply(&mut genre);
        assert_eq!(genre.name, "Drama");
    }

    #[test]
    fn overlong_name_is_rejected() {
        let genre = NewGenre { name: "x".repeat(NAME_MAX_LENGTH + 1) };
        assert!(genre.validate().is_err());
    }
}
