//! Open seat-selection views.
//!
//! Every view gets its own freshly generated seat map. Nothing here is
//! persisted or shared: a session ends at checkout, when the client
//! discards it, or when the sweeper finds it idle for too long.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::SeatStatus;
use crate::services::seat_map::{SeatMap, SeatMapError, SelectionSummary};

/// What the seat map is being shown for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Showing {
    pub movie_id: u64,
    pub movie_title: String,
    pub language: String,
    pub theater: String,
    pub screen: String,
    pub show_date: String,
    pub show_time: String,
}

#[derive(Debug, Clone)]
pub struct SeatSession {
    pub id: Uuid,
    pub showing: Showing,
    pub seat_map: SeatMap,
    pub opened_at: DateTime<Utc>,
    last_seen: Instant,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("seat map {0} not found")]
    NotFound(Uuid),
    #[error(transparent)]
    Seat(#[from] SeatMapError),
    #[error("no seats selected")]
    NothingSelected,
}

pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, SeatSession>>,
    idle_ttl: Duration,
}

impl SessionRegistry {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_ttl,
        }
    }

    pub async fn open(&self, showing: Showing, seat_map: SeatMap) -> SeatSession {
        let session = SeatSession {
            id: Uuid::new_v4(),
            showing,
            seat_map,
            opened_at: Utc::now(),
            last_seen: Instant::now(),
        };
        info!(
            "Opened seat map {} for movie {} ({} booked seats)",
            session.id,
            session.showing.movie_id,
            session.seat_map.count(SeatStatus::Booked)
        );
        self.sessions.write().await.insert(session.id, session.clone());
        session
    }

    pub async fn get(&self, id: Uuid) -> Result<SeatSession, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
        session.last_seen = Instant::now();
        Ok(session.clone())
    }

    pub async fn toggle(&self, id: Uuid, seat_id: &str) -> Result<(SeatStatus, SelectionSummary), SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
        session.last_seen = Instant::now();

        let status = session.seat_map.toggle(seat_id)?;
        debug!("Seat {} in {} is now {:?}", seat_id, id, status);
        Ok((status, session.seat_map.summary()))
    }

    /// Ends the session if at least one seat is selected.
    pub async fn checkout(&self, id: Uuid) -> Result<SeatSession, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get(&id).ok_or(SessionError::NotFound(id))?;
        if session.seat_map.selected().next().is_none() {
            return Err(SessionError::NothingSelected);
        }
        sessions.remove(&id).ok_or(SessionError::NotFound(id))
    }

    pub async fn discard(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    /// Drops sessions idle for longer than the TTL at `now`; returns how many.
    pub async fn sweep_idle(&self, now: Instant) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| now.saturating_duration_since(s.last_seen) <= self.idle_ttl);
        let swept = before - sessions.len();
        if swept > 0 {
            info!("Discarded {} idle seat maps", swept);
        }
        swept
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
