use tracing::error;

use crate::catalog_client::CatalogClient;
use crate::models::{Movie, Theater};
use crate::storage::{LocalStore, RecordCollection, StoreError, MOVIES_KEY, THEATERS_KEY};

/// Genre chips of the movie listing; "All" disables the genre filter.
pub static GENRES: [&str; 6] = ["All", "Action", "Adventure", "Drama", "Sci-Fi", "Crime"];

pub const ALL_GENRES: &str = "All";

/// Keeps movies whose title contains `search` (case-insensitive) and whose
/// genre list contains `genre`. Input order is preserved.
pub fn filter_movies<'a>(movies: &'a [Movie], search: &str, genre: Option<&str>) -> Vec<&'a Movie> {
    let needle = search.to_lowercase();
    let genre = genre.filter(|g| !g.is_empty() && *g != ALL_GENRES);

    movies
        .iter()
        .filter(|m| m.title.to_lowercase().contains(&needle))
        .filter(|m| genre.is_none_or(|g| m.has_genre(g)))
        .collect()
}

/// Movies and theaters, either from the external backend or from the admin
/// tables when no backend is configured.
pub struct CatalogService {
    client: Option<CatalogClient>,
    pub movies: RecordCollection<Movie>,
    pub theaters: RecordCollection<Theater>,
}

impl CatalogService {
    pub async fn load(store: LocalStore, client: Option<CatalogClient>) -> Result<Self, StoreError> {
        let movies = RecordCollection::load(store.clone(), MOVIES_KEY, sample_movies()).await?;
        let theaters = RecordCollection::load(store, THEATERS_KEY, sample_theaters()).await?;
        Ok(Self { client, movies, theaters })
    }

    pub fn source(&self) -> &'static str {
        if self.client.is_some() { "remote" } else { "local" }
    }

    // Backend failures are logged and surface as an empty result.
    pub async fn list_movies(&self) -> Vec<Movie> {
        match &self.client {
            Some(client) => client.movies().await.unwrap_or_else(|e| {
                error!("Failed to fetch movies: {}", e);
                Vec::new()
            }),
            None => self.movies.list().await,
        }
    }

    pub async fn find_movie(&self, id: u64) -> Option<Movie> {
        match &self.client {
            Some(client) => client.movie(id).await.unwrap_or_else(|e| {
                error!("Failed to fetch movie {}: {}", id, e);
                None
            }),
            None => self.movies.get(id).await,
        }
    }

    pub async fn list_theaters(&self) -> Vec<Theater> {
        match &self.client {
            Some(client) => client.theaters().await.unwrap_or_else(|e| {
                error!("Failed to fetch theaters: {}", e);
                Vec::new()
            }),
            None => self.theaters.list().await,
        }
    }

    pub async fn find_theater(&self, id: u64) -> Option<Theater> {
        match &self.client {
            Some(client) => client.theater(id).await.unwrap_or_else(|e| {
                error!("Failed to fetch theater {}: {}", id, e);
                None
            }),
            None => self.theaters.get(id).await,
        }
    }
}

fn movie(id: u64, title: &str, poster: &str, rating: f32, duration: &str, genre: &[&str]) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        poster: Some(format!("https://images.unsplash.com/{}?w=400&h=600&fit=crop", poster)),
        description: None,
        rating,
        duration: duration.to_string(),
        genre: genre.iter().map(|g| g.to_string()).collect(),
        language: "English".to_string(),
    }
}

pub fn sample_movies() -> Vec<Movie> {
    vec![
        movie(1, "Avengers: Endgame", "photo-1626814026160-2237a95fc5a0", 8.4, "3h 1m", &["Action", "Adventure", "Drama"]),
        movie(2, "Spider-Man: No Way Home", "photo-1635805737707-575885ab0820", 8.2, "2h 28m", &["Action", "Adventure", "Sci-Fi"]),
        movie(3, "The Batman", "photo-1609743522653-52354461eb27", 7.8, "2h 56m", &["Action", "Crime", "Drama"]),
        movie(4, "Dune", "photo-1578662996442-48f60103fc96", 8.0, "2h 35m", &["Adventure", "Drama", "Sci-Fi"]),
        movie(5, "Top Gun: Maverick", "photo-1583716834097-6e3ad9cbb8a8", 8.3, "2h 11m", &["Action", "Drama"]),
        movie(6, "Black Panther", "photo-1608889825103-eb5ed706fc64", 7.3, "2h 14m", &["Action", "Adventure", "Sci-Fi"]),
    ]
}

pub fn sample_theaters() -> Vec<Theater> {
    vec![
        Theater {
            id: 1,
            name: "Cinepolis Pune".to_string(),
            location: "MG Road, Pune".to_string(),
            capacity: 250,
            screens: 4,
        },
        Theater {
            id: 2,
            name: "INOX Camp".to_string(),
            location: "Camp, Pune".to_string(),
            capacity: 180,
            screens: 3,
        },
    ]
}
