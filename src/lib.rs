pub mod catalog_client;
pub mod config;
pub mod controllers;
pub mod database;
pub mod error;
pub mod models;
pub mod redis_client;
pub mod services;
pub mod storage;

use axum::{routing::get, Router};
use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use models::{BookingRecord, Showtime};
use services::catalog::CatalogService;
use services::sessions::SessionRegistry;
use storage::{LocalStore, RecordCollection, StoreError, BOOKINGS_KEY};

// Shared state for the whole application
pub struct AppState {
    pub config: config::Config,
    pub store: LocalStore,
    pub db: Option<database::Database>,
    pub catalog: CatalogService,
    pub bookings: RecordCollection<BookingRecord>,
    pub showtimes: RecordCollection<Showtime>,
    pub sessions: SessionRegistry,
}

impl AppState {
    /// Connects whatever the configuration asks for: Redis for the admin
    /// tables, Postgres for the booking schema, the external catalog.
    pub async fn connect(config: config::Config) -> anyhow::Result<Arc<Self>> {
        let store = match &config.redis.url {
            Some(url) => LocalStore::redis(redis_client::RedisClient::connect(url).await?),
            None => {
                warn!("REDIS_URL not set, admin tables are kept in memory");
                LocalStore::memory()
            }
        };

        let db = match &config.database.url {
            Some(url) => {
                let db = database::Database::connect(url, config.database.pool_size).await?;
                db.run_migrations().await?;
                Some(db)
            }
            None => {
                info!("DATABASE_URL not set, booking schema is not migrated");
                None
            }
        };

        let client = catalog_client::CatalogClient::from_config(&config.catalog)?;
        if let Some(client) = &client {
            info!("Catalog served from {}", client.base_url());
        }

        Ok(Arc::new(Self::build(config, store, db, client).await?))
    }

    pub async fn build(
        config: config::Config,
        store: LocalStore,
        db: Option<database::Database>,
        client: Option<catalog_client::CatalogClient>,
    ) -> Result<Self, StoreError> {
        let catalog = CatalogService::load(store.clone(), client).await?;
        let bookings = RecordCollection::load(store.clone(), BOOKINGS_KEY, Vec::new()).await?;
        let showtimes = RecordCollection::in_memory(store.clone(), sample_showtimes());
        let sessions = SessionRegistry::new(Duration::from_secs(config.seat_map.idle_ttl_seconds));

        Ok(Self {
            config,
            store,
            db,
            catalog,
            bookings,
            showtimes,
            sessions,
        })
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "CinemaBook API v1.0" }))
        .route("/health", get(controllers::health))
        .nest("/api", controllers::routes())
        .fallback(controllers::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

fn sample_showtimes() -> Vec<Showtime> {
    let show = |id, movie: &str, theater: &str, (y, m, d), (h, min), screen| {
        Some(Showtime {
            id,
            movie: movie.to_string(),
            theater: theater.to_string(),
            date: NaiveDate::from_ymd_opt(y, m, d)?,
            time: NaiveTime::from_hms_opt(h, min, 0)?,
            screen,
        })
    };

    [
        show(1, "Jawan", "Cinepolis Pune", (2025, 9, 20), (19, 30), 1),
        show(2, "Pathaan", "INOX Camp", (2025, 9, 21), (18, 0), 2),
    ]
    .into_iter()
    .flatten()
    .collect()
}
