//! The in-process calendar projection.
//!
//! Holds the [`Calendar`] computed from the latest store snapshot. Every store
//! revision triggers one full recomputation; readers always see a complete
//! `Calendar`, never a partially updated one.

use std::sync::Arc;
use std::time::Instant;

use jaarplan_db::{DocumentStore, StoreError};
use jaarplan_engine::{AcademicYear, Calendar};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};

use crate::metrics::record_calendar;

/// A computed calendar and the store revision it reflects.
#[derive(Debug, Default)]
pub struct CalendarView {
    pub calendar: Calendar,
    pub revision: u64,
}

#[derive(Clone)]
pub struct CalendarProjection {
    store: DocumentStore,
    academic_year: AcademicYear,
    current: Arc<watch::Sender<Arc<CalendarView>>>,
}

impl std::fmt::Debug for CalendarProjection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalendarProjection")
            .field("academic_year", &self.academic_year)
            .field("revision", &self.current.borrow().revision)
            .finish_non_exhaustive()
    }
}

impl CalendarProjection {
    pub fn new(store: DocumentStore, academic_year: AcademicYear) -> Self {
        let (current, _) = watch::channel(Arc::new(CalendarView::default()));
        Self {
            store,
            academic_year,
            current: Arc::new(current),
        }
    }

    /// Latest complete view.
    pub fn current(&self) -> Arc<CalendarView> {
        Arc::clone(&self.current.borrow())
    }

    pub fn academic_year(&self) -> AcademicYear {
        self.academic_year
    }

    /// Receiver notified whenever a new view is installed.
    pub fn subscribe(&self) -> watch::Receiver<Arc<CalendarView>> {
        self.current.subscribe()
    }

    /// Reads a snapshot and recomputes the calendar from scratch.
    ///
    /// A view computed from an older revision than the installed one is
    /// discarded, so concurrent refreshes cannot move the projection backwards.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<Arc<CalendarView>, StoreError> {
        let snapshot = self.store.snapshot().await?;
        let started = Instant::now();
        let calendar = Calendar::build(&snapshot.activities, &snapshot.weeks, &self.academic_year)
            .with_undecodable_documents(snapshot.undecodable);
        record_calendar(&calendar, snapshot.revision, started.elapsed().as_secs_f64());

        let view = Arc::new(CalendarView {
            calendar,
            revision: snapshot.revision,
        });
        let installed = self.current.send_if_modified(|current| {
            if view.revision >= current.revision {
                *current = Arc::clone(&view);
                true
            } else {
                false
            }
        });
        if !installed {
            debug!(revision = view.revision, "Discarding stale calendar view");
        }

        Ok(self.current())
    }

    /// Recomputes on every store revision.
    pub fn spawn(self) -> JoinHandle<()> {
        let mut changes = self.store.subscribe();
        // Catch up on writes made between the last refresh and this subscription.
        changes.mark_changed();
        tokio::spawn(async move {
            info!("Calendar projection following store changes");
            while changes.changed().await.is_ok() {
                let revision = *changes.borrow_and_update();
                if let Err(e) = self.refresh().await {
                    error!(revision, error = %e, "Calendar recomputation failed");
                }
            }
        })
    }
}
