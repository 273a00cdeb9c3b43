//! Output renderers and formatting helpers for CLI commands.

use anyhow::anyhow;
use myflix_api_models::{Director, Genre, Movie, User};
use myflix_client::ProfileView;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

const SYNOPSIS_WIDTH: usize = 72;

pub(crate) fn render_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
    println!("{text}");
    Ok(())
}

/// Print a one-line notice, or `{"message": ...}` in JSON mode.
pub(crate) fn render_message(message: &str, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => render_json(&serde_json::json!({ "message": message })),
        OutputFormat::Table => {
            println!("{message}");
            Ok(())
        }
    }
}

pub(crate) fn render_movie_list(
    movies: &[Movie],
    is_favourite: impl Fn(&str) -> bool,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => render_json(movies),
        OutputFormat::Table => {
            println!("{}", movie_table(movies, is_favourite).join("\n"));
            Ok(())
        }
    }
}

pub(crate) fn movie_table(movies: &[Movie], is_favourite: impl Fn(&str) -> bool) -> Vec<String> {
    let mut lines = Vec::with_capacity(movies.len() + 1);
    lines.push(format!(
        "{:<1} {:<24} {:<32} {:<14} DIRECTOR",
        "", "ID", "TITLE", "GENRE"
    ));
    for movie in movies {
        let marker = if is_favourite(&movie.id) { "*" } else { "" };
        lines.push(format!(
            "{:<1} {:<24} {:<32} {:<14} {}",
            marker,
            movie.id,
            truncate(&movie.title, 32),
            truncate(&movie.genre.name, 14),
            movie.director.name
        ));
    }
    lines
}

pub(crate) fn render_movie_detail(
    movie: &Movie,
    favourite: bool,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => render_json(movie)?,
        OutputFormat::Table => {
            println!("id: {}", movie.id);
            println!("title: {}", movie.title);
            println!("genre: {}", movie.genre.name);
            println!("director: {}", movie.director.name);
            if !movie.actors.is_empty() {
                println!("actors: {}", movie.actors.join(", "));
            }
            if let Some(image) = &movie.image_path {
                println!("image: {image}");
            }
            println!("featured: {}", movie.featured);
            println!("favourite: {favourite}");
            println!("synopsis:");
            for line in wrap(&movie.description, SYNOPSIS_WIDTH) {
                println!("  {line}");
            }
        }
    }
    Ok(())
}

pub(crate) fn render_genre(genre: &Genre, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => render_json(genre),
        OutputFormat::Table => {
            println!("{}", genre.name);
            for line in wrap(&genre.description, SYNOPSIS_WIDTH) {
                println!("  {line}");
            }
            Ok(())
        }
    }
}

pub(crate) fn render_director(director: &Director, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => render_json(director),
        OutputFormat::Table => {
            println!("{}", director.name);
            if let Some(lifespan) = lifespan(director) {
                println!("  {lifespan}");
            }
            for line in wrap(&director.bio, SYNOPSIS_WIDTH) {
                println!("  {line}");
            }
            Ok(())
        }
    }
}

pub(crate) fn render_user(user: &User, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => render_json(user),
        OutputFormat::Table => {
            println!("{}", user_lines(user).join("\n"));
            Ok(())
        }
    }
}

pub(crate) fn render_profile(profile: &ProfileView, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => render_json(&ProfileJson {
            user: &profile.user,
            favourites: &profile.favourites,
        }),
        OutputFormat::Table => {
            println!("{}", user_lines(&profile.user).join("\n"));
            if profile.favourites.is_empty() {
                println!("favourites: none");
            } else {
                println!("favourites:");
                for movie in &profile.favourites {
                    println!("  {:<24} {}", movie.id, movie.title);
                }
            }
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct ProfileJson<'a> {
    user: &'a User,
    favourites: &'a [Movie],
}

pub(crate) fn user_lines(user: &User) -> Vec<String> {
    let mut lines = vec![
        format!("username: {}", user.username),
        format!("email: {}", user.email),
    ];
    if let Some(birthday) = user.birthday {
        lines.push(format!("birthday: {}", birthday.format("%Y-%m-%d")));
    }
    lines.push(format!("favourite movies: {}", user.favourite_movies.len()));
    lines
}

fn lifespan(director: &Director) -> Option<String> {
    match (director.birth.as_deref(), director.death.as_deref()) {
        (Some(birth), Some(death)) => Some(format!("{birth} - {death}")),
        (Some(birth), None) => Some(format!("born {birth}")),
        (None, Some(death)) => Some(format!("died {death}")),
        (None, None) => None,
    }
}

pub(crate) fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let kept: String = value.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}

pub(crate) fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
