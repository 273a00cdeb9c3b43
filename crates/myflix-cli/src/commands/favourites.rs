use myflix_client::FavouriteChange;
use myflix_client::notice::favourite_notice;
use serde_json::json;

use crate::cli::{MovieIdArgs, OutputFormat};
use crate::client::{AppContext, CliError, CliResult};
use crate::commands::require_text;
use crate::output::{render_json, render_message, render_movie_list};

pub(crate) async fn handle_fav_list(ctx: &AppContext) -> CliResult<()> {
    let profile = ctx.service.load_profile().await?;
    render_movie_list(&profile.favourites, |_| true, ctx.output)
}

/// Favourite ids as the server stores them, without joining the catalog.
pub(crate) async fn handle_fav_ids(ctx: &AppContext) -> CliResult<()> {
    let ids = ctx.service.favourites().await?;
    match ctx.output {
        OutputFormat::Json => render_json(&ids),
        OutputFormat::Table => {
            for id in &ids {
                println!("{id}");
            }
            Ok(())
        }
    }
}

pub(crate) async fn handle_fav_add(ctx: &AppContext, args: MovieIdArgs) -> CliResult<()> {
    let movie_id = require_text(&args.movie_id, "movie id")?;
    let result = ctx.service.add_favourite(&movie_id).await;
    report(ctx, FavouriteChange::Added, result)
}

pub(crate) async fn handle_fav_remove(ctx: &AppContext, args: MovieIdArgs) -> CliResult<()> {
    let movie_id = require_text(&args.movie_id, "movie id")?;
    let result = ctx.service.remove_favourite(&movie_id).await;
    report(ctx, FavouriteChange::Removed, result)
}

pub(crate) async fn handle_fav_toggle(ctx: &AppContext, args: MovieIdArgs) -> CliResult<()> {
    let movie_id = require_text(&args.movie_id, "movie id")?;
    let attempted = if ctx.service.is_favourite(&movie_id) {
        FavouriteChange::Removed
    } else {
        FavouriteChange::Added
    };
    let result = ctx.service.toggle_favourite(&movie_id).await.map(drop);
    report(ctx, attempted, result)
}

/// Answers from the cached session only.
pub(crate) fn handle_fav_check(ctx: &AppContext, args: &MovieIdArgs) -> CliResult<()> {
    if !ctx.service.is_authenticated() {
        return Err(CliError::validation("not logged in; run `myflix login` first"));
    }
    let favourite = ctx.service.is_favourite(&args.movie_id);
    match ctx.output {
        OutputFormat::Json => render_json(&json!({
            "movie_id": args.movie_id,
            "favourite": favourite,
        })),
        OutputFormat::Table => {
            println!("{}: {}", args.movie_id, if favourite { "favourite" } else { "not a favourite" });
            Ok(())
        }
    }
}

fn report(
    ctx: &AppContext,
    change: FavouriteChange,
    result: Result<(), myflix_client::ApiError>,
) -> CliResult<()> {
    match result {
        Ok(()) => render_message(favourite_notice(change, true), ctx.output),
        Err(err) => {
            let notice = favourite_notice(change, false);
            Err(match CliError::from(err) {
                CliError::Validation(detail) => CliError::validation(format!("{notice} {detail}")),
                CliError::Failure(source) => CliError::failure(source.context(notice)),
                unauthorized @ CliError::Unauthorized(_) => unauthorized,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::{context_for, sample_user, seed_session};
    use httpmock::prelude::*;

    #[tokio::test]
    async fn add_persists_to_session_file() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/users/ada/movies/m2")
                .header("authorization", "Bearer tok");
            then.status(201).body("Movie added");
        });

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        seed_session(&path, &sample_user(&["m1"]));
        let ctx = context_for(&server.base_url(), &path);
        handle_fav_add(
            &ctx,
            MovieIdArgs {
                movie_id: "m2".into(),
            },
        )
        .await
        .expect("add succeeds");
        mock.assert();

        let reopened = context_for(&server.base_url(), &path);
        assert!(reopened.service.is_favourite("m1"));
        assert!(reopened.service.is_favourite("m2"));
        handle_fav_check(
            &reopened,
            &MovieIdArgs {
                movie_id: "m2".into(),
            },
        )
        .expect("check succeeds");
    }

    #[tokio::test]
    async fn failed_remove_keeps_favourite_and_reports_notice() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(DELETE).path("/users/ada/movies/m1");
            then.status(500).body("Error: database unavailable");
        });

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        seed_session(&path, &sample_user(&["m1"]));
        let ctx = context_for(&server.base_url(), &path);
        let err = handle_fav_remove(
            &ctx,
            MovieIdArgs {
                movie_id: "m1".into(),
            },
        )
        .await
        .expect_err("server fails");
        assert_eq!(err.exit_code(), 3);
        assert!(
            err.display_message()
                .starts_with("Failed to remove movie from favourites.")
        );
        assert!(ctx.service.is_favourite("m1"));
    }

    #[tokio::test]
    async fn toggle_removes_existing_favourite() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(DELETE).path("/users/ada/movies/m1");
            then.status(200).body("removed");
        });

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        seed_session(&path, &sample_user(&["m1"]));
        let ctx = context_for(&server.base_url(), &path);
        handle_fav_toggle(
            &ctx,
            MovieIdArgs {
                movie_id: "m1".into(),
            },
        )
        .await
        .expect("toggle succeeds");
        mock.assert();
        assert!(!ctx.service.is_favourite("m1"));
    }

    #[tokio::test]
    async fn ids_refresh_session_file_from_server() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/users/ada")
                .header("authorization", "Bearer tok");
            then.status(200).json_body(serde_json::json!({
                "Username": "ada",
                "Email": "ada@example.com",
                "FavoriteMovies": ["m3", "m1"]
            }));
        });

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        seed_session(&path, &sample_user(&["m2"]));
        let ctx = context_for(&server.base_url(), &path);
        handle_fav_ids(&ctx).await.expect("ids load");
        mock.assert();

        let reopened = context_for(&server.base_url(), &path);
        assert!(reopened.service.is_favourite("m3"));
        assert!(!reopened.service.is_favourite("m2"));
    }

    #[test]
    fn check_requires_login() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = context_for("http://127.0.0.1:9", &dir.path().join("session.json"));
        let err = handle_fav_check(
            &ctx,
            &MovieIdArgs {
                movie_id: "m1".into(),
            },
        )
        .expect_err("anonymous");
        assert_eq!(err.exit_code(), 2);
    }
}
