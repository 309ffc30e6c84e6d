//! Query layer between the feeds and the presentation.
//!
//! Fetches run concurrently, results are cached per feed key, and only the
//! most recently requested schedule ever reaches the view model.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::cache::{Loadable, QueryCache, Ticket};
use crate::feeds::{FeedError, FeedSource, ScheduleQuery};
use crate::models::{Movie, MovieShowtimes, Show, TheaterArea};
use crate::pipeline;
use crate::xml::{self, ParseError};

/// Cache key: which endpoint, with which parameters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FeedKey {
    Catalog,
    TheaterAreas,
    Schedule(ScheduleQuery),
}

type RecordCache<T> = Mutex<QueryCache<FeedKey, Arc<Vec<T>>>>;

/// Distinct theater and date combinations kept at once
const SCHEDULE_SLOT_LIMIT: usize = 16;

/// Outcome of one load, tied to the request that produced it
struct Loaded<T> {
    ticket: Ticket<FeedKey>,
    records: Result<Arc<Vec<T>>, FeedError>,
}

pub struct Showtimes<S> {
    source: S,
    catalog: RecordCache<Movie>,
    theater_areas: RecordCache<TheaterArea>,
    schedules: RecordCache<Show>,
}

impl<S: FeedSource> Showtimes<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            catalog: Mutex::new(QueryCache::new()),
            theater_areas: Mutex::new(QueryCache::new()),
            schedules: Mutex::new(QueryCache::with_limit(SCHEDULE_SLOT_LIMIT)),
        }
    }

    pub async fn catalog(&self) -> Result<Arc<Vec<Movie>>, FeedError> {
        let movies = load(
            &self.catalog,
            FeedKey::Catalog,
            || self.source.catalog(),
            xml::normalize_movies,
        )
        .await
        .records?;
        info!(
            "{}: {} movies in catalog",
            self.source.source_name(),
            movies.len()
        );
        Ok(movies)
    }

    pub async fn theater_areas(&self) -> Result<Arc<Vec<TheaterArea>>, FeedError> {
        let areas = load(
            &self.theater_areas,
            FeedKey::TheaterAreas,
            || self.source.theater_areas(),
            xml::normalize_theater_areas,
        )
        .await
        .records?;
        info!(
            "{}: {} theater areas",
            self.source.source_name(),
            areas.len()
        );
        Ok(areas)
    }

    async fn schedule(&self, query: &ScheduleQuery) -> Loaded<Show> {
        let loaded = load(
            &self.schedules,
            FeedKey::Schedule(query.clone()),
            || self.source.schedule(query),
            xml::normalize_shows,
        )
        .await;
        if let Ok(shows) = &loaded.records {
            info!(
                "{}: {} shows for {:?}",
                self.source.source_name(),
                shows.len(),
                query
            );
        }
        loaded
    }

    /// Correlated and filtered view for `query`.
    ///
    /// Waits for both the catalog and the schedule. Returns `Ok(None)` when
    /// another schedule was requested meanwhile, whether this one succeeded
    /// or failed; that newer call owns the view.
    pub async fn view_model(
        &self,
        query: &ScheduleQuery,
        search: &str,
    ) -> Result<Option<Vec<MovieShowtimes>>, FeedError> {
        let (movies, schedule) = tokio::join!(self.catalog(), self.schedule(query));

        if !self.schedules.lock().await.is_current(&schedule.ticket) {
            debug!("Discarding superseded schedule for {:?}", query);
            return Ok(None);
        }
        let movies = movies?;
        let shows = schedule.records?;

        let entries = pipeline::correlate(&movies, &shows);
        let visible = pipeline::filter(entries, search);
        debug!("{} movies with showtimes after filtering", visible.len());
        Ok(Some(visible))
    }

    /// State of the most recently requested schedule
    pub async fn current_schedule(&self) -> Option<Loadable<Arc<Vec<Show>>, String>> {
        self.schedules.lock().await.current().cloned()
    }
}

async fn load<T, F, Fut>(
    cache: &RecordCache<T>,
    key: FeedKey,
    fetch: F,
    normalize: fn(&str) -> Result<Vec<T>, ParseError>,
) -> Loaded<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<String, FeedError>>,
{
    let (ticket, cached) = {
        let mut cache = cache.lock().await;
        let ticket = cache.issue(key);
        let cached = cache.ready(ticket.key()).cloned();
        (ticket, cached)
    };
    if let Some(records) = cached {
        debug!("Serving {:?} from cache", ticket.key());
        return Loaded {
            ticket,
            records: Ok(records),
        };
    }

    let outcome = fetch()
        .await
        .and_then(|body| normalize(&body).map_err(FeedError::from))
        .map(Arc::new);

    let stored = cache.lock().await.resolve(
        &ticket,
        outcome
            .as_ref()
            .map(Arc::clone)
            .map_err(ToString::to_string),
    );
    if !stored {
        debug!("Dropping stale response for {:?}", ticket.key());
    }
    Loaded {
        ticket,
        records: outcome,
    }
}
