//! In-process catalog with the same semantics as the PostgreSQL store, including
//! foreign key checks. Backs the HTTP tests and `STORE=memory` runs.

use super::{Catalog, DirectorRepository, GenreRepository, MovieRepository};
use crate::error::AppError;
use crate::model::{
    DbId, Director, DirectorChanges, Genre, GenreChanges, Movie, MovieChanges, MovieFilter,
    MovieView, NewDirector, NewGenre, NewMovie, Page,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

const MOVIE_DIRECTOR_FK: &str = "movie_director_id_fkey";
const MOVIE_GENRE_FK: &str = "movie_genre_id_fkey";

#[derive(Default)]
struct Tables {
    directors: BTreeMap<DbId, Director>,
    genres: BTreeMap<DbId, Genre>,
    movies: BTreeMap<DbId, Movie>,
    last_director_id: DbId,
    last_genre_id: DbId,
    last_movie_id: DbId,
}

impl Tables {
    fn check_references(&self, director_id: DbId, genre_id: DbId) -> Result<(), AppError> {
        if !self.directors.contains_key(&director_id) {
            return Err(fk_violation(MOVIE_DIRECTOR_FK));
        }
        if !self.genres.contains_key(&genre_id) {
            return Err(fk_violation(MOVIE_GENRE_FK));
        }
        Ok(())
    }

    fn view(&self, movie: &Movie) -> Option<MovieView> {
        let director = self.directors.get(&movie.director_id)?;
        let genre = self.genres.get(&movie.genre_id)?;
        Some(MovieView::new(movie, &director.name, &genre.name))
    }
}

fn fk_violation(constraint: &str) -> AppError {
    AppError::Integrity(format!("violates {}", constraint))
}

#[derive(Default)]
pub struct MemoryCatalog {
    tables: RwLock<Tables>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.tables
            .read()
            .map_err(|_| AppError::Internal("catalog lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables
            .write()
            .map_err(|_| AppError::Internal("catalog lock poisoned".into()))
    }
}

#[async_trait]
impl MovieRepository for MemoryCatalog {
    async fn list_movies(&self, filter: &MovieFilter, page: Page) -> Result<Vec<MovieView>, AppError> {
        let tables = self.read()?;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(0);
        Ok(tables
            .movies
            .values()
            .filter(|m| filter.matches(m))
            .filter_map(|m| tables.view(m))
            .skip(offset)
            .take(limit)
            .collect())
    }

    async fn get_movie(&self, id: DbId) -> Result<Option<MovieView>, AppError> {
        let tables = self.read()?;
        Ok(tables.movies.get(&id).and_then(|m| tables.view(m)))
    }

    async fn create_movie(&self, input: &NewMovie) -> Result<DbId, AppError> {
        let mut tables = self.write()?;
        tables.check_references(input.director_id, input.genre_id)?;
        tables.last_movie_id += 1;
        let id = tables.last_movie_id;
        tables.movies.insert(id, input.clone().into_movie(id));
        Ok(id)
    }

    async fn update_movie(&self, id: DbId, changes: &MovieChanges) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        let Some(current) = tables.movies.get(&id) else {
            return Ok(false);
        };
        let mut next = current.clone();
        changes.apply(&mut next);
        tables.check_references(next.director_id, next.genre_id)?;
        tables.movies.insert(id, next);
        Ok(true)
    }

    async fn delete_movie(&self, id: DbId) -> Result<bool, AppError> {
        Ok(self.write()?.movies.remove(&id).is_some())
    }
}

#[async_trait]
impl DirectorRepository for MemoryCatalog {
    async fn create_director(&self, input: &NewDirector) -> Result<DbId, AppError> {
        let mut tables = self.write()?;
        tables.last_director_id += 1;
        let id = tables.last_director_id;
        tables.directors.insert(
            id,
            Director {
                id,
                name: input.name.clone(),
            },
        );
        Ok(id)
    }

    async fn update_director(&self, id: DbId, changes: &DirectorChanges) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        match tables.directors.get_mut(&id) {
            Some(director) => {
                changes.apply(director);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_director(&self, id: DbId) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        if !tables.directors.contains_key(&id) {
            return Ok(false);
        }
        if tables.movies.values().any(|m| m.director_id == id) {
            return Err(fk_violation(MOVIE_DIRECTOR_FK));
        }
        tables.directors.remove(&id);
        Ok(true)
    }
}

#[async_trait]
impl GenreRepository for MemoryCatalog {
    async fn create_genre(&self, input: &NewGenre) -> Result<DbId, AppError> {
        let mut tables = self.write()?;
        tables.last_genre_id += 1;
        let id = tables.last_genre_id;
        tables.genres.insert(
            id,
            Genre {
                id,
                name: input.name.clone(),
            },
        );
        Ok(id)
    }

    async fn update_genre(&self, id: DbId, changes: &GenreChanges) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        match tables.genres.get_mut(&id) {
            Some(genre) => {
                changes.apply(genre);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_genre(&self, id: DbId) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        if !tables.genres.contains_key(&id) {
            return Ok(false);
        }
        if tables.movies.values().any(|m| m.genre_id == id) {
            return Err(fk_violation(MOVIE_GENRE_FK));
        }
        tables.genres.remove(&id);
        Ok(true)
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }
}
