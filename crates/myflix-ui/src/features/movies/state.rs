//! Movie listing state.
//!
//! # Design
//! - Hold the fetched catalog plus the one detail dialog that may be open.
//! - Dialog content is derived from the movie, never stored twice.

use myflix_client::models::Movie;

/// Which detail a movie card can open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailKind {
    /// The movie's genre.
    Genre,
    /// The movie's director.
    Director,
    /// The movie's synopsis.
    Synopsis,
}

impl DetailKind {
    /// Button label on the movie card.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Genre => "Genre",
            Self::Director => "Director",
            Self::Synopsis => "Synopsis",
        }
    }

    /// Every kind in card order.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Genre, Self::Director, Self::Synopsis]
    }
}

/// Content of the detail dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetailPayload {
    /// Genre name and description.
    Genre {
        /// Genre name.
        name: String,
        /// Genre description.
        description: String,
    },
    /// Director name and biography.
    Director {
        /// Director name.
        name: String,
        /// Director biography.
        bio: String,
    },
    /// Movie title and synopsis.
    Synopsis {
        /// Movie title.
        title: String,
        /// Movie synopsis.
        description: String,
    },
}

impl DetailPayload {
    /// Build the dialog content for `kind` out of `movie`.
    #[must_use]
    pub fn for_movie(movie: &Movie, kind: DetailKind) -> Self {
        match kind {
            DetailKind::Genre => Self::Genre {
                name: movie.genre.name.clone(),
                description: movie.genre.description.clone(),
            },
            DetailKind::Director => Self::Director {
                name: movie.director.name.clone(),
                bio: movie.director.bio.clone(),
            },
            DetailKind::Synopsis => Self::Synopsis {
                title: movie.title.clone(),
                description: movie.description.clone(),
            },
        }
    }

    /// Which kind of detail this is.
    #[must_use]
    pub const fn kind(&self) -> DetailKind {
        match self {
            Self::Genre { .. } => DetailKind::Genre,
            Self::Director { .. } => DetailKind::Director,
            Self::Synopsis { .. } => DetailKind::Synopsis,
        }
    }

    /// Dialog heading.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Genre { name, .. } | Self::Director { name, .. } => name,
            Self::Synopsis { title, .. } => title,
        }
    }

    /// Dialog body.
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Self::Genre { description, .. } | Self::Synopsis { description, .. } => description,
            Self::Director { bio, .. } => bio,
        }
    }
}

/// State of the movies page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovieListState {
    /// Catalog as returned by the server.
    pub movies: Vec<Movie>,
    /// A fetch is in flight.
    pub loading: bool,
    /// Message of the last failed fetch.
    pub error: Option<String>,
    /// Open detail dialog, if any.
    pub detail: Option<DetailPayload>,
}

impl MovieListState {
    /// State shown while the catalog loads.
    #[must_use]
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    /// Replace the catalog after a successful fetch.
    pub fn loaded(&mut self, movies: Vec<Movie>) {
        self.movies = movies;
        self.loading = false;
        self.error = None;
    }

    /// Record a failed fetch, keeping whatever was shown before.
    pub fn failed(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    /// Open the dialog for `movie_id`; returns false if the movie is unknown.
    pub fn show_detail(&mut self, movie_id: &str, kind: DetailKind) -> bool {
        let payload = self
            .movies
            .iter()
            .find(|movie| movie.id == movie_id)
            .map(|movie| DetailPayload::for_movie(movie, kind));
        let found = payload.is_some();
        self.detail = payload;
        found
    }

    /// Close the dialog.
    pub fn close_detail(&mut self) {
        self.detail = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use myflix_client::models::{Director, Genre};

    fn alien() -> Movie {
        Movie {
            id: "m1".into(),
            title: "Alien".into(),
            description: "A crew meets a deadly alien.".into(),
            genre: Genre {
                name: "Horror".into(),
                description: "Meant to frighten.".into(),
            },
            director: Director {
                name: "Ridley Scott".into(),
                bio: "English filmmaker.".into(),
                birth: Some("1937".into()),
                death: None,
            },
            image_path: None,
            featured: true,
            actors: Vec::new(),
        }
    }

    #[test]
    fn payload_title_and_content_follow_kind() {
        let movie = alien();
        let genre = DetailPayload::for_movie(&movie, DetailKind::Genre);
        assert_eq!(genre.kind(), DetailKind::Genre);
        assert_eq!((genre.title(), genre.content()), ("Horror", "Meant to frighten."));

        let director = DetailPayload::for_movie(&movie, DetailKind::Director);
        assert_eq!(
            (director.title(), director.content()),
            ("Ridley Scott", "English filmmaker.")
        );

        let synopsis = DetailPayload::for_movie(&movie, DetailKind::Synopsis);
        assert_eq!(synopsis.kind(), DetailKind::Synopsis);
        assert_eq!(synopsis.title(), "Alien");
        assert_eq!(synopsis.content(), "A crew meets a deadly alien.");
    }

    #[test]
    fn show_detail_ignores_unknown_movies() {
        let mut state = MovieListState::loading();
        state.loaded(vec![alien()]);
        assert!(!state.loading);

        assert!(state.show_detail("m1", DetailKind::Director));
        assert_eq!(
            state.detail.as_ref().map(DetailPayload::kind),
            Some(DetailKind::Director)
        );
        assert!(!state.show_detail("missing", DetailKind::Genre));
        assert!(state.detail.is_none());

        state.show_detail("m1", DetailKind::Synopsis);
        state.close_detail();
        assert!(state.detail.is_none());
    }

    #[test]
    fn failed_fetch_keeps_previous_catalog() {
        let mut state = MovieListState::default();
        state.loaded(vec![alien()]);
        state.failed("Something bad happened; please try again later.");
        assert_eq!(state.movies.len(), 1);
        assert!(state.error.is_some());
    }
}
