//! Entities, the movie projection and the typed request payloads.

pub mod director;
pub mod genre;
pub mod movie;

use serde::{Deserialize, Deserializer};

pub use director::{Director, DirectorChanges, NewDirector};
pub use genre::{Genre, GenreChanges, NewGenre};
pub use movie::{Movie, MovieChanges, MovieFilter, MovieQuery, MovieView, NewMovie, Page, PAGE_SIZE};

/// Store-assigned primary key (BIGSERIAL).
pub type DbId = i64;

/// Maximum length of `movie.title`, `director.name` and `genre.name` (VARCHAR(255)).
pub const NAME_MAX_LENGTH: usize = 255;

/// Deserialize an optional field that may be omitted but never `null`.
///
/// Use together with `#[serde(default)]`: a missing key yields `None`, an explicit
/// `null` is a type error so a partial update can never clear a column.
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
