//! Profile projection: the user plus the catalog entries they favourited.

use std::collections::HashSet;

use myflix_api_models::{Movie, MovieId, User};

/// Data backing the profile page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileView {
    /// Freshly fetched account.
    pub user: User,
    /// Favourited movies, in catalog order.
    pub favourites: Vec<Movie>,
}

impl ProfileView {
    /// Join `user`'s favourites against `catalog`.
    #[must_use]
    pub fn new(user: User, catalog: &[Movie]) -> Self {
        let favourites = select_favourites(catalog, &user.favourite_movies);
        Self { user, favourites }
    }
}

/// Catalog entries whose id appears in `favourite_ids`, in catalog order.
///
/// Ids that match no catalog entry are skipped; duplicated ids yield the movie once.
#[must_use]
pub fn select_favourites(catalog: &[Movie], favourite_ids: &[MovieId]) -> Vec<Movie> {
    let wanted: HashSet<&str> = favourite_ids.iter().map(String::as_str).collect();
    catalog
        .iter()
        .filter(|movie| wanted.contains(movie.id.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use myflix_api_models::{Director, Genre};

    fn movie(id: &str, title: &str) -> Movie {
        Movie {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            genre: Genre::default(),
            director: Director::default(),
            image_path: None,
            featured: false,
            actors: Vec::new(),
        }
    }

    #[test]
    fn favourites_follow_catalog_order() {
        let catalog = vec![movie("m1", "Alien"), movie("m2", "Heat"), movie("m3", "Ran")];
        let ids = vec!["m3".to_string(), "m1".to_string()];
        let selected = select_favourites(&catalog, &ids);
        let titles: Vec<&str> = selected.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Alien", "Ran"]);
    }

    #[test]
    fn unknown_and_duplicate_ids_are_tolerated() {
        let catalog = vec![movie("m1", "Alien"), movie("m2", "Heat")];
        let ids = vec!["m9".to_string(), "m2".to_string(), "m2".to_string()];
        let selected = select_favourites(&catalog, &ids);
        assert_eq!(selected, vec![movie("m2", "Heat")]);
        assert!(select_favourites(&catalog, &[]).is_empty());
    }

    #[test]
    fn profile_view_uses_user_favourites() {
        let user = User {
            username: "ada".into(),
            favourite_movies: vec!["m1".into(), "m3".into()],
            ..User::default()
        };
        let catalog = vec![movie("m1", "Alien"), movie("m2", "Heat"), movie("m3", "Ran")];
        let view = ProfileView::new(user, &catalog);
        assert_eq!(view.favourites, vec![movie("m1", "Alien"), movie("m3", "Ran")]);
    }
}
