//! Movie entity, its joined projection and request payloads.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;
use utoipa::ToSchema;

use super::{present, DbId, NAME_MAX_LENGTH};
use crate::error::AppError;
use crate::service::validation::{max_length, not_blank, Validate};

/// Rows per page of `GET /movies/`.
pub const PAGE_SIZE: i64 = 10;

/// A row of the `movie` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub trailer: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub director_id: DbId,
    pub genre_id: DbId,
}

/// Movie joined with its genre and director names, as returned by list and get.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct MovieView {
    #[schema(value_type = i64)]
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub trailer: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub genre: String,
    pub director: String,
}

impl MovieView {
    pub fn new(movie: &Movie, director: &str, genre: &str) -> Self {
        MovieView {
            id: movie.id,
            title: movie.title.clone(),
            description: movie.description.clone(),
            trailer: movie.trailer.clone(),
            year: movie.year,
            rating: movie.rating,
            genre: genre.to_string(),
            director: director.to_string(),
        }
    }
}

/// Body of `POST /movies/`.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NewMovie {
    pub title: String,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub trailer: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "present")]
    pub rating: Option<f64>,
    #[schema(value_type = i64)]
    pub director_id: DbId,
    #[schema(value_type = i64)]
    pub genre_id: DbId,
}

impl NewMovie {
    /// Build the stored row once the store has assigned an id.
    pub fn into_movie(self, id: DbId) -> Movie {
        Movie {
            id,
            title: self.title,
            description: self.description,
            trailer: self.trailer,
            year: self.year,
            rating: self.rating,
            director_id: self.director_id,
            genre_id: self.genre_id,
        }
    }
}

impl Validate for NewMovie {
    fn validate(&self) -> Result<(), String> {
        not_blank("title", &self.title)?;
        max_length("title", &self.title, NAME_MAX_LENGTH)
    }
}

/// Body of `PUT /movies/{id}`. Only the supplied fields are written.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct MovieChanges {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub trailer: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "present")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i64>)]
    pub director_id: Option<DbId>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i64>)]
    pub genre_id: Option<DbId>,
}

impl MovieChanges {
    pub fn apply(&self, movie: &mut Movie) {
        if let Some(title) = &self.title {
            movie.title = title.clone();
        }
        if let Some(description) = &self.description {
            movie.description = Some(description.clone());
        }
        if let Some(trailer) = &self.trailer {
            movie.trailer = Some(trailer.clone());
        }
        if let Some(year) = self.year {
            movie.year = Some(year);
        }
        if let Some(rating) = self.rating {
            movie.rating = Some(rating);
        }
        if let Some(director_id) = self.director_id {
            movie.director_id = director_id;
        }
        if let Some(genre_id) = self.genre_id {
            movie.genre_id = genre_id;
        }
    }
}

impl Validate for MovieChanges {
    fn validate(&self) -> Result<(), String> {
        if let Some(title) = &self.title {
            not_blank("title", title)?;
            max_length("title", title, NAME_MAX_LENGTH)?;
        }
        Ok(())
    }
}

/// Optional director/genre restriction of the movie list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovieFilter {
    pub director_id: Option<DbId>,
    pub genre_id: Option<DbId>,
}

impl MovieFilter {
    /// Message for a filtered search that matched nothing. `None` for the unfiltered list,
    /// where an empty page is a regular result.
    pub fn empty_result_message(&self) -> Option<&'static str> {
        match (self.director_id, self.genre_id) {
            (Some(_), Some(_)) => Some("no movies found for this director and genre"),
            (Some(_), None) => Some("no movies found for this director"),
            (None, Some(_)) => Some("no movies found for this genre"),
            (None, None) => None,
        }
    }

    pub fn matches(&self, movie: &Movie) -> bool {
        self.director_id.map_or(true, |id| movie.director_id == id)
            && self.genre_id.map_or(true, |id| movie.genre_id == id)
    }
}

/// 1-based page number of the movie list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(i64);

impl Page {
    pub fn new(number: i64) -> Result<Self, AppError> {
        if number < 1 {
            return Err(AppError::Validation(format!(
                "page must be a positive integer, got {}",
                number
            )));
        }
        Ok(Page(number))
    }

    pub fn number(&self) -> i64 {
        self.0
    }

    pub fn limit(&self) -> i64 {
        PAGE_SIZE
    }

    pub fn offset(&self) -> i64 {
        (self.0 - 1).saturating_mul(PAGE_SIZE)
    }
}

impl Default for Page {
    fn default() -> Self {
        Page(1)
    }
}

/// Query string of `GET /movies/`: `page`, `director_id`, `genre_id`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovieQuery {
    pub page: Page,
    pub filter: MovieFilter,
}

impl MovieQuery {
    /// Values that do not parse as integers are treated as absent, and so is a zero
    /// `director_id` or `genre_id`. A page below 1 is rejected.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, AppError> {
        let int = |key: &str| params.get(key).and_then(|v| v.trim().parse::<i64>().ok());
        let id = |key: &str| int(key).filter(|id| *id != 0);
        let page = match int("page") {
            Some(n) => Page::new(n)?,
            None => Page::default(),
        };
        Ok(MovieQuery {
            page,
            filter: MovieFilter {
                director_id: id("director_id"),
                genre_id: id("genre_id"),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn new_movie_rejects_unknown_fields() {
        let body = json!({"title": "A", "director_id": 1, "genre_id": 1, "budget": 10});
        assert!(serde_json::from_value::<NewMovie>(body).is_err());
    }

    #[test]
    fn new_movie_rejects_an_explicit_id() {
        let body = json!({"id": 7, "title": "A", "director_id": 1, "genre_id": 1});
        assert!(serde_json::from_value::<NewMovie>(body).is_err());
    }

    #[test]
    fn new_movie_optional_fields_default_to_none() {
        let body = json!({"title": "A", "year": 2000, "rating": 5, "director_id": 1, "genre_id": 2});
        let movie: NewMovie = serde_json::from_value(body).unwrap();
        assert_eq!(movie.description, None);
        assert_eq!(movie.trailer, None);
        assert_eq!(movie.year, Some(2000));
        assert_eq!(movie.rating, Some(5.0));
    }

    #[test]
    fn changes_reject_null_and_wrong_types() {
        assert!(serde_json::from_value::<MovieChanges>(json!({"description": null})).is_err());
        assert!(serde_json::from_value::<MovieChanges>(json!({"year": "1999"})).is_err());
    }

    #[test]
    fn changes_touch_only_supplied_fields() {
        let mut movie = NewMovie {
            title: "Old".into(),
            description: Some("d".into()),
            trailer: Some("t".into()),
            year: Some(1990),
            rating: Some(7.5),
            director_id: 1,
            genre_id: 1,
        }
        .into_movie(3);
        let changes: MovieChanges = serde_json::from_value(json!({"title": "New", "year": 2001})).unwrap();
        changes.apply(&mut movie);
        assert_eq!(movie.title, "New");
        assert_eq!(movie.year, Some(2001));
        assert_eq!(movie.description.as_deref(), Some("d"));
        assert_eq!(movie.rating, Some(7.5));
        assert_eq!(movie.id, 3);
    }

    #[test]
    fn blank_title_fails_validation() {
        let changes = MovieChanges {
            title: Some("   ".into()),
            ..Default::default()
        };
        assert!(changes.validate().is_err());
    }

    #[test]
    fn query_defaults_to_first_page_without_filters() {
        let q = MovieQuery::from_params(&HashMap::new()).unwrap();
        assert_eq!(q.page.number(), 1);
        assert_eq!(q.page.offset(), 0);
        assert_eq!(q.filter, MovieFilter::default());
    }

    #[test]
    fn query_ignores_non_integer_values() {
        let q = MovieQuery::from_params(&params(&[("page", "x"), ("director_id", "abc"), ("genre_id", "4")])).unwrap();
        assert_eq!(q.page, Page::default());
        assert_eq!(q.filter.director_id, None);
        assert_eq!(q.filter.genre_id, Some(4));
    }

    #[test]
    fn query_treats_zero_ids_as_no_filter() {
        let q = MovieQuery::from_params(&params(&[("director_id", "0"), ("genre_id", "0")])).unwrap();
        assert_eq!(q.filter, MovieFilter::default());

        let q = MovieQuery::from_params(&params(&[("director_id", "0"), ("genre_id", "3")])).unwrap();
        assert_eq!(q.filter.director_id, None);
        assert_eq!(q.filter.genre_id, Some(3));
    }

    #[test]
    fn query_rejects_page_below_one() {
        assert!(MovieQuery::from_params(&params(&[("page", "0")])).is_err());
        assert!(MovieQuery::from_params(&params(&[("page", "-2")])).is_err());
    }

    #[test]
    fn page_offset_steps_by_page_size() {
        assert_eq!(Page::new(3).unwrap().offset(), 20);
        assert_eq!(Page::new(3).unwrap().limit(), PAGE_SIZE);
    }

    #[test]
    fn empty_result_message_only_for_filtered_searches() {
        assert!(MovieFilter::default().empty_result_message().is_none());
        let both = MovieFilter { director_id: Some(1), genre_id: Some(2) };
        assert_eq!(both.empty_result_message(), Some("no movies found for this director and genre"));
        let genre = MovieFilter { director_id: None, genre_id: Some(2) };
        assert_eq!(genre.empty_result_message(), Some("no movies found for this genre"));
    }
}
