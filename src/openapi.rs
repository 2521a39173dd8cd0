//! OpenAPI document served at `/swagger.json`.

use crate::handlers::{director, genre, movie};
use crate::model::{DirectorChanges, GenreChanges, MovieChanges, MovieView, NewDirector, NewGenre, NewMovie};
use crate::response::{MessageBody, PageMeta};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Movie catalog API"),
    paths(
        movie::list,
        movie::read,
        movie::create,
        movie::update,
        movie::delete,
        director::create,
        director::update,
        director::delete,
        genre::create,
        genre::update,
        genre::delete,
    ),
    components(schemas(
        MovieView,
        NewMovie,
        MovieChanges,
        NewDirector,
        DirectorChanges,
        NewGenre,
        GenreChanges,
        MessageBody,
        PageMeta,
    )),
    tags(
        (name = "movies", description = "Movies with their director and genre"),
        (name = "directors", description = "Directors"),
        (name = "genres", description = "Genres"),
    )
)]
pub struct ApiDoc;
