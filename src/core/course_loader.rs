use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use log::{debug, error, info};
use tokio::sync::watch;
use url::Url;

use crate::error::loader::LoaderError;
use crate::http::fetcher::Fetcher;
use crate::model::course::{CourseList, decode_courses};

/// Fetches the course list and publishes it to subscribers.
///
/// The loader is the only writer of the published list. Readers get a
/// `watch::Receiver` from [`CourseLoader::subscribe`] and never mutate it.
///
/// Delivery guarantee: the network request runs on a spawned tokio task, but
/// the new list is published by the task that awaited [`CourseLoader::load_all`].
/// A view that drives `load_all` from its own context therefore observes the
/// update on that same context.
pub struct CourseLoader<F: Fetcher> {
    fetcher: Arc<F>,
    endpoint: String,
    courses: watch::Sender<CourseList>,
    in_flight: AtomicBool,
    last_loaded_at: Mutex<Option<DateTime<Utc>>>,
}

// Set while a load runs; also cleared if the future is dropped
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<F: Fetcher> CourseLoader<F> {
    pub fn new(fetcher: Arc<F>, endpoint: impl Into<String>) -> Self {
        let (courses, _) = watch::channel(CourseList::new());
        CourseLoader {
            fetcher,
            endpoint: endpoint.into(),
            courses,
            in_flight: AtomicBool::new(false),
            last_loaded_at: Mutex::new(None),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn fetcher(&self) -> Arc<F> {
        Arc::clone(&self.fetcher)
    }

    pub fn subscribe(&self) -> watch::Receiver<CourseList> {
        self.courses.subscribe()
    }

    /// Snapshot of the currently published list.
    pub fn courses(&self) -> CourseList {
        self.courses.borrow().clone()
    }

    pub fn last_loaded_at(&self) -> Option<DateTime<Utc>> {
        *self.last_loaded_at.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Fetches and decodes the list without publishing it.
    pub async fn fetch_courses(&self) -> Result<CourseList, LoaderError> {
        let url = Url::parse(&self.endpoint)
            .map_err(|source| LoaderError::invalid_url(&self.endpoint, source))?;

        let fetcher = Arc::clone(&self.fetcher);
        let body = tokio::spawn(async move { fetcher.get_bytes(url).await }).await??;

        Ok(decode_courses(&body)?)
    }

    /// Loads the list and publishes it, replacing whatever was there.
    ///
    /// Failures are logged and leave the published list untouched. A call made
    /// while another load is still running returns immediately.
    pub async fn load_all(&self) {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            debug!("Course load already in flight, ignoring request");
            return;
        }
        let _guard = InFlightGuard(&self.in_flight);

        match self.fetch_courses().await {
            Ok(courses) => self.publish(courses),
            Err(err) if err.is_invalid_url() => debug!("Skipping course load: {}", err),
            Err(err) => error!("Failed to load courses: {}", err),
        }
    }

    fn publish(&self, courses: CourseList) {
        debug_assert!(self.is_loading(), "publish outside of a running load");
        let count = courses.len();
        self.courses.send_replace(courses);

        let now = Utc::now();
        *self.last_loaded_at.lock().unwrap_or_else(PoisonError::into_inner) = Some(now);

        if self.courses.receiver_count() == 0 {
            debug!("Published {} courses with no subscriber left", count);
        } else {
            info!("Published {} courses at {}", count, now.to_rfc3339());
        }
    }
}
