//! Daily screening schedule with an explicit refresh policy.
//!
//! The schedule is derived data: a fixed movie lineup stamped with the
//! current show date in IST. Listings roll over to the next day once it is
//! past the evening boundary (20:00 IST), so the cache refreshes when the
//! IST calendar day changes, when the boundary is crossed, or when its TTL
//! elapses - whichever comes first. Time always comes from the injected
//! [`Clock`], never from ambient state.

use crate::types::{EventId, EventType, ScreeningEvent};
use chrono::{DateTime, Days, FixedOffset, Timelike, Utc};
use cinebook_core::environment::Clock;
use std::sync::Arc;
use tokio::sync::RwLock;

/// IST is UTC+5:30
const IST_OFFSET_SECS: i32 = 5 * 3600 + 1800;

fn ist_time(now: DateTime<Utc>) -> DateTime<FixedOffset> {
    #[allow(clippy::expect_used)] // +05:30 is statically within the valid offset range
    let offset = FixedOffset::east_opt(IST_OFFSET_SECS).expect("IST offset is valid");
    now.with_timezone(&offset)
}

/// One entry of the fixed movie lineup
#[derive(Clone, Copy, Debug)]
pub struct ScheduleEntry {
    /// Base id the daily event id is derived from
    pub id: u32,
    /// Display title
    pub title: &'static str,
    /// Kind of screening
    pub event_type: EventType,
    /// Show time
    pub time: &'static str,
    /// Venue
    pub location: &'static str,
    /// Capacity as displayed
    pub capacity: &'static str,
    /// City
    pub city: &'static str,
    /// Movie name
    pub movie_name: &'static str,
}

/// The fixed movie-event lineup the daily schedule is generated from
pub const MOVIE_LINEUP: [ScheduleEntry; 10] = [
    ScheduleEntry {
        id: 1,
        title: "Drive-in Cinema: My Fault",
        event_type: EventType::DriveIn,
        time: "8:00 pm",
        location: "JLN gate 14, Delhi",
        capacity: "4",
        city: "Delhi NCR",
        movie_name: "My Fault",
    },
    ScheduleEntry {
        id: 2,
        title: "Open Air Screening: Ghosted",
        event_type: EventType::OpenAir,
        time: "5:00 PM",
        location: "JLN gate 14, Delhi",
        capacity: "9 people",
        city: "Delhi NCR",
        movie_name: "Inception",
    },
    ScheduleEntry {
        id: 3,
        title: "Private Screening: Interstellar",
        event_type: EventType::PrivateScreening,
        time: "11:00 PM",
        location: "JLN gate 14, Delhi",
        capacity: "20 cabins",
        city: "Delhi NCR",
        movie_name: "Interstellar",
    },
    ScheduleEntry {
        id: 4,
        title: "Special Event: Bollywood Night",
        event_type: EventType::SpecialEvent,
        time: "8:30 PM",
        location: "DLF Avenue Saket, Delhi",
        capacity: "300 people",
        city: "Delhi NCR",
        movie_name: "3 Idiots",
    },
    ScheduleEntry {
        id: 5,
        title: "Drive-in Cinema: Dune",
        event_type: EventType::DriveIn,
        time: "7:45 PM",
        location: "Faridabad Drive-in Theatre",
        capacity: "120 cars",
        city: "Delhi NCR",
        movie_name: "Dune",
    },
    ScheduleEntry {
        id: 6,
        title: "Open Air Screening: Avatar",
        event_type: EventType::OpenAir,
        time: "8:15 PM",
        location: "Nehru Park, Delhi",
        capacity: "250 people",
        city: "Delhi NCR",
        movie_name: "Avatar",
    },
    ScheduleEntry {
        id: 7,
        title: "Drive-in Cinema: Top Gun Maverick",
        event_type: EventType::DriveIn,
        time: "2:30 PM",
        location: "Chittaranjan Park",
        capacity: "18 cars",
        city: "Delhi NCR",
        movie_name: "Top Gun: Maverick",
    },
    ScheduleEntry {
        id: 8,
        title: "Special Event: Marvel Marathon",
        event_type: EventType::SpecialEvent,
        time: "6:00 PM",
        location: "Connaught Place, Delhi",
        capacity: "200 people",
        city: "Delhi NCR",
        movie_name: "Avengers: Endgame",
    },
    ScheduleEntry {
        id: 9,
        title: "Open Air Screening: The Matrix",
        event_type: EventType::OpenAir,
        time: "8:00 PM",
        location: "Lodhi Garden, Delhi",
        capacity: "200 people",
        city: "Delhi NCR",
        movie_name: "The Matrix",
    },
    ScheduleEntry {
        id: 10,
        title: "Drive-in Cinema: Jurassic Park",
        event_type: EventType::DriveIn,
        time: "7:15 PM",
        location: "Faridabad Drive-in Theatre",
        capacity: "120 cars",
        city: "Delhi NCR",
        movie_name: "Jurassic Park",
    },
];

/// When the cached schedule must be regenerated
#[derive(Clone, Copy, Debug)]
pub struct RefreshPolicy {
    /// IST hour after which listings show the next day (24h clock)
    pub boundary_hour: u32,
    /// Maximum snapshot age
    pub ttl: chrono::Duration,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self {
            boundary_hour: 20,
            ttl: chrono::Duration::hours(1),
        }
    }
}

impl RefreshPolicy {
    /// Whether a snapshot refreshed at `last_refresh` is stale at `now`
    ///
    /// Stale when there is no snapshot, the IST calendar day changed, the
    /// evening boundary was crossed since the last refresh, or the TTL
    /// elapsed.
    #[must_use]
    pub fn needs_refresh(&self, now: DateTime<Utc>, last_refresh: Option<DateTime<Utc>>) -> bool {
        let Some(last_refresh) = last_refresh else {
            return true;
        };

        let now_ist = ist_time(now);
        let last_ist = ist_time(last_refresh);

        now_ist.date_naive() != last_ist.date_naive()
            || (now_ist.hour() >= self.boundary_hour && last_ist.hour() < self.boundary_hour)
            || now.signed_duration_since(last_refresh) > self.ttl
    }
}

/// Generate the daily schedule for `now`
fn generate(now: DateTime<Utc>, boundary_hour: u32) -> Vec<ScreeningEvent> {
    let ist = ist_time(now);
    let show_date = if ist.hour() >= boundary_hour {
        ist.date_naive() + Days::new(1)
    } else {
        ist.date_naive()
    };
    let formatted_date = show_date.format("%B %-d, %Y").to_string();

    MOVIE_LINEUP
        .iter()
        .enumerate()
        .map(|(index, entry)| ScreeningEvent {
            // Offset keeps ids unique across regenerated batches
            id: EventId::new(entry.id + u32::try_from(index).unwrap_or(0) * 100),
            title: entry.title.to_owned(),
            event_type: entry.event_type,
            date: formatted_date.clone(),
            time: entry.time.to_owned(),
            location: entry.location.to_owned(),
            capacity: entry.capacity.to_owned(),
            city: entry.city.to_owned(),
            movie_name: entry.movie_name.to_owned(),
        })
        .collect()
}

struct Snapshot {
    events: Vec<ScreeningEvent>,
    refreshed_at: DateTime<Utc>,
}

/// Cache over the generated schedule
///
/// Injected wherever events are read; refreshes itself lazily according to
/// its [`RefreshPolicy`].
pub struct ScheduleCache {
    clock: Arc<dyn Clock>,
    policy: RefreshPolicy,
    snapshot: RwLock<Option<Snapshot>>,
}

impl ScheduleCache {
    /// Create a cache with the default refresh policy
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_policy(clock, RefreshPolicy::default())
    }

    /// Create a cache with a custom refresh policy
    #[must_use]
    pub fn with_policy(clock: Arc<dyn Clock>, policy: RefreshPolicy) -> Self {
        Self {
            clock,
            policy,
            snapshot: RwLock::new(None),
        }
    }

    /// Current schedule, refreshed first if stale
    pub async fn events(&self) -> Vec<ScreeningEvent> {
        self.refresh_if_needed().await;
        self.snapshot
            .read()
            .await
            .as_ref()
            .map(|snapshot| snapshot.events.clone())
            .unwrap_or_default()
    }

    /// Resolve a single event by id, refreshing first if stale
    pub async fn event(&self, id: EventId) -> Option<ScreeningEvent> {
        self.refresh_if_needed().await;
        self.snapshot
            .read()
            .await
            .as_ref()
            .and_then(|snapshot| snapshot.events.iter().find(|event| event.id == id).cloned())
    }

    /// When the snapshot was last regenerated
    pub async fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.snapshot
            .read()
            .await
            .as_ref()
            .map(|snapshot| snapshot.refreshed_at)
    }

    async fn refresh_if_needed(&self) {
        let now = self.clock.now();
        let mut guard = self.snapshot.write().await;

        let last_refresh = guard.as_ref().map(|snapshot| snapshot.refreshed_at);
        if self.policy.needs_refresh(now, last_refresh) {
            tracing::info!(at = %now, "regenerating daily schedule");
            *guard = Some(Snapshot {
                events: generate(now, self.policy.boundary_hour),
                refreshed_at: now,
            });
        }
    }
}
