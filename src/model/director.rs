//! Director entity and request payloads.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{present, DbId, NAME_MAX_LENGTH};
use crate::service::validation::{max_length, not_blank, Validate};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Director {
    pub id: DbId,
    pub name: String,
}

/// Body of `POST /directors/`.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NewDirector {
    pub name: String,
}

impl Validate for NewDirector {
    fn validate(&self) -> Result<(), String> {
        not_blank("name", &self.name)?;
        max_length("name", &self.name, NAME_MAX_LENGTH)
    }
}

/// Body of `PUT /directors/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct DirectorChanges {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<String>,
}

impl DirectorChanges {
    pub fn apply(&self, director: &mut Director) {
        if let Some(name) = &self.name {
            director.name = name.clone();
        }
    }
}

impl Validate for DirectorChanges {
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
