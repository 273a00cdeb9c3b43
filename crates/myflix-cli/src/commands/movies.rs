use crate::cli::{MovieListArgs, MovieShowArgs, NameArgs};
use crate::client::{AppContext, CliResult};
use crate::commands::require_text;
use crate::output::{render_director, render_genre, render_movie_detail, render_movie_list};

pub(crate) async fn handle_movie_list(ctx: &AppContext, args: MovieListArgs) -> CliResult<()> {
    let mut movies = ctx.service.movies().await?;
    if args.featured {
        movies.retain(|movie| movie.featured);
    }
    if let Some(genre) = args.genre.as_deref().map(str::trim) {
        movies.retain(|movie| movie.genre.name.eq_ignore_ascii_case(genre));
    }
    render_movie_list(&movies, |id| ctx.service.is_favourite(id), ctx.output)
}

pub(crate) async fn handle_movie_show(ctx: &AppContext, args: MovieShowArgs) -> CliResult<()> {
    let title = require_text(&args.title, "title")?;
    let movie = ctx.service.movie(&title).await?;
    render_movie_detail(&movie, ctx.service.is_favourite(&movie.id), ctx.output)
}

pub(crate) async fn handle_genre(ctx: &AppContext, args: NameArgs) -> CliResult<()> {
    let name = require_text(&args.name, "genre")?;
    let genre = ctx.service.genre(&name).await?;
    render_genre(&genre, ctx.output)
}

pub(crate) async fn handle_director(ctx: &AppContext, args: NameArgs) -> CliResult<()> {
    let name = require_text(&args.name, "director")?;
    let director = ctx.service.director(&name).await?;
    render_director(&director, ctx.output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::{context_for, sample_user, seed_session};
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn list_sends_bearer_token() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/movies")
                .header("authorization", "Bearer tok")
                .header("x-request-id", "trace-test");
            then.status(200).json_body(json!([
                { "_id": "m1", "Title": "Alien", "Featured": true, "Genre": { "Name": "Horror" } },
                { "_id": "m2", "Title": "Heat", "Genre": { "Name": "Crime" } }
            ]));
        });

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        seed_session(&path, &sample_user(&["m1"]));
        let ctx = context_for(&server.base_url(), &path);
        handle_movie_list(
            &ctx,
            MovieListArgs {
                featured: true,
                genre: None,
            },
        )
        .await
        .expect("listing succeeds");
        mock.assert();
    }

    #[tokio::test]
    async fn show_fetches_movie_by_title() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/movies/Alien");
            then.status(200)
                .json_body(json!({ "_id": "m1", "Title": "Alien", "Description": "In space no one can hear you scream." }));
        });

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        seed_session(&path, &sample_user(&["m1"]));
        let ctx = context_for(&server.base_url(), &path);
        handle_movie_show(
            &ctx,
            MovieShowArgs {
                title: " Alien ".into(),
            },
        )
        .await
        .expect("detail loads");
        mock.assert();
    }

    #[tokio::test]
    async fn director_not_found_is_a_validation_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/movies/director/Nobody");
            then.status(404).body("Director not found");
        });

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        seed_session(&path, &sample_user(&[]));
        let ctx = context_for(&server.base_url(), &path);
        let err = handle_director(
            &ctx,
            NameArgs {
                name: "Nobody".into(),
            },
        )
        .await
        .expect_err("unknown director");
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.display_message(), "Director not found");
    }

    #[tokio::test]
    async fn anonymous_genre_lookup_requires_login() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = context_for("http://127.0.0.1:9", &dir.path().join("session.json"));
        let err = handle_genre(
            &ctx,
            NameArgs {
                name: "Horror".into(),
            },
        )
        .await
        .expect_err("anonymous");
        assert_eq!(err.exit_code(), 2);
    }
}
