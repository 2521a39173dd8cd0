//! Builds the parameterized movie projection: movie joined with director and genre.

use crate::model::{DbId, MovieFilter, Page};

/// Columns of the projection; genre and director names are aliased to `genre` and `director`.
const PROJECTION: &str = "SELECT m.id, m.title, m.description, m.trailer, m.year, m.rating, \
     g.name AS genre, d.name AS director \
     FROM movie m \
     JOIN director d ON d.id = m.director_id \
     JOIN genre g ON g.id = m.genre_id";

/// SQL text plus positional parameters, bound in order as `$1, $2, ...`.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<i64>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: i64) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// One page of the projection, optionally restricted by director and/or genre, ordered by movie id.
pub fn select_movies(filter: &MovieFilter, page: Page) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_parts = Vec::new();
    if let Some(director_id) = filter.director_id {
        let n = q.push_param(director_id);
        where_parts.push(format!("m.director_id = ${}", n));
    }
    if let Some(genre_id) = filter.genre_id {
        let n = q.push_param(genre_id);
        where_parts.push(format!("m.genre_id = ${}", n));
    }
    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    let limit = q.push_param(page.limit());
    let offset = q.push_param(page.offset());
    q.sql = format!(
        "{}{} ORDER BY m.id LIMIT ${} OFFSET ${}",
        PROJECTION, where_clause, limit, offset
    );
    q
}

/// The projection restricted to one movie id.
pub fn select_movie_by_id(id: DbId) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id);
    q.sql = format!("{} WHERE m.id = ${}", PROJECTION, n);
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfiltered_list_only_binds_paging() {
        let q = select_movies(&MovieFilter::default(), Page::default());
        assert!(!q.sql.contains("WHERE"));
        assert!(q.sql.ends_with("ORDER BY m.id LIMIT $1 OFFSET $2"));
        assert_eq!(q.params, vec![10, 0]);
    }

    #[test]
    fn both_filters_bind_director_then_genre() {
        let filter = MovieFilter {
            director_id: Some(4),
            genre_id: Some(9),
        };
        let q = select_movies(&filter, Page::new(2).unwrap());
        assert!(q.sql.contains(" WHERE m.director_id = $1 AND m.genre_id = $2 "));
        assert!(q.sql.ends_with("LIMIT $3 OFFSET $4"));
        assert_eq!(q.params, vec![4, 9, 10, 10]);
    }

    #[test]
    fn genre_only_filter_takes_the_first_placeholder() {
        let filter = MovieFilter {
            director_id: None,
            genre_id: Some(3),
        };
        let q = select_movies(&filter, Page::default());
        assert!(q.sql.contains(" WHERE m.genre_id = $1 "));
        assert!(!q.sql.contains("m.director_id ="));
        assert_eq!(q.params, vec![3, 10, 0]);
    }

    #[test]
    fn projection_aliases_names_and_joins_both_tables() {
        let q = select_movie_by_id(5);
        assert!(q.sql.contains("g.name AS genre"));
        assert!(q.sql.contains("d.name AS director"));
        assert!(q.sql.contains("JOIN director d ON d.id = m.director_id"));
        assert!(q.sql.contains("JOIN genre g ON g.id = m.genre_id"));
        assert!(q.sql.ends_with("WHERE m.id = $1"));
        assert_eq!(q.params, vec![5]);
    }

    #[test]
    fn values_never_reach_the_sql_text() {
        let filter = MovieFilter {
            director_id: Some(123456),
            genre_id: None,
        };
        let q = select_movies(&filter, Page::new(77).unwrap());
        assert!(!q.sql.contains("123456"));
        assert!(!q.sql.contains("760"));
    }
}
