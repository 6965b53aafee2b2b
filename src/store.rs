// Catalog store: the in-memory authority for destinations, reviews and
// bookings, and the only way to query or mutate them.

use std::{
    collections::HashSet,
    sync::atomic::{AtomicU64, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::{
    config::{EnrichmentPolicy, StoreConfig},
    error::{CatalogError, CatalogResult, Entity},
    filter::DestinationFilter,
    ids::{IdGenerator, BOOKING_PREFIX, DESTINATION_PREFIX, REVIEW_PREFIX},
    latency::{LatencySimulator, Operation},
    models::{
        Booking, BookingPatch, Deleted, Destination, DestinationPatch, EnrichedBooking, Location,
        NewBooking, NewDestination, NewReview, Review, ReviewPatch,
    },
    seed,
};

// Data-access contract consumed by the presentation layer
#[async_trait]
pub trait CatalogApi: Send + Sync + 'static {
    // Destinations
    async fn list_destinations(&self, filter: &DestinationFilter) -> Vec<Destination>;
    async fn get_destination(&self, id: &str) -> CatalogResult<Destination>;
    async fn create_destination(&self, data: NewDestination) -> Destination;
    async fn update_destination(
        &self,
        id: &str,
        patch: DestinationPatch,
    ) -> CatalogResult<Destination>;
    async fn delete_destination(&self, id: &str) -> CatalogResult<Deleted>;

    // Home page helpers
    async fn list_featured_destinations(&self) -> Vec<Destination>;
    async fn locations(&self) -> Vec<Location>;

    // Reviews
    async fn list_reviews_for_destination(&self, destination_id: &str) -> Vec<Review>;
    async fn create_review(&self, data: NewReview) -> CatalogResult<Review>;
    async fn update_review(&self, id: &str, patch: ReviewPatch) -> CatalogResult<Review>;
    async fn delete_review(&self, id: &str) -> CatalogResult<Deleted>;

    // Bookings
    async fn list_bookings_for_user(&self, user_id: &str) -> CatalogResult<Vec<EnrichedBooking>>;
    async fn create_booking(&self, data: NewBooking) -> CatalogResult<Booking>;
    async fn update_booking(&self, id: &str, patch: BookingPatch) -> CatalogResult<Booking>;
    async fn delete_booking(&self, id: &str) -> CatalogResult<Deleted>;

    fn stats(&self) -> StoreStats;
}

// Point-in-time copy of the store counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub operations: usize,
    pub not_found: usize,
    pub rejected: usize,
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
}

#[derive(Debug, Default)]
struct Counters {
    operations: AtomicUsize,
    not_found: AtomicUsize,
    rejected: AtomicUsize,
    created: AtomicUsize,
    updated: AtomicUsize,
    deleted: AtomicUsize,
}

impl Counters {
    fn snapshot(&self) -> StoreStats {
        StoreStats {
            operations: self.operations.load(Ordering::SeqCst),
            not_found: self.not_found.load(Ordering::SeqCst),
            rejected: self.rejected.load(Ordering::SeqCst),
            created: self.created.load(Ordering::SeqCst),
            updated: self.updated.load(Ordering::SeqCst),
            deleted: self.deleted.load(Ordering::SeqCst),
        }
    }
}

#[derive(Debug)]
struct Slot<T> {
    seq: u64,
    record: T,
}

// Records keyed by id. `seq` remembers insertion order so listings come back
// in storage order.
#[derive(Debug)]
struct Collection<T> {
    entity: Entity,
    records: DashMap<String, Slot<T>>,
    next_seq: AtomicU64,
    ids: IdGenerator,
}

impl<T: Clone> Collection<T> {
    fn new(entity: Entity, prefix: &'static str) -> Self {
        Self {
            entity,
            records: DashMap::new(),
            next_seq: AtomicU64::new(0),
            ids: IdGenerator::new(prefix),
        }
    }

    fn with_records(
        entity: Entity,
        prefix: &'static str,
        records: Vec<T>,
        id_of: impl Fn(&T) -> &str,
    ) -> Self {
        let collection = Self::new(entity, prefix);
        for record in records {
            let id = id_of(&record).to_string();
            collection.insert(id, record);
        }
        collection
    }

    fn next_id(&self) -> String {
        self.ids.next_id()
    }

    fn insert(&self, id: String, record: T) {
        self.ids.observe(&id);
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        self.records.insert(id, Slot { seq, record });
    }

    fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    fn get(&self, id: &str) -> CatalogResult<T> {
        self.records
            .get(id)
            .map(|slot| slot.record.clone())
            .ok_or_else(|| CatalogError::not_found(self.entity, id))
    }

    // The change is applied to a copy and only written back when it succeeds
    fn update<F>(&self, id: &str, change: F) -> CatalogResult<T>
    where
        F: FnOnce(&mut T) -> CatalogResult<()>,
    {
        let mut slot = self
            .records
            .get_mut(id)
            .ok_or_else(|| CatalogError::not_found(self.entity, id))?;

        let mut updated = slot.record.clone();
        change(&mut updated)?;
        slot.record = updated.clone();

        Ok(updated)
    }

    fn remove(&self, id: &str) -> CatalogResult<T> {
        self.records
            .remove(id)
            .map(|(_, slot)| slot.record)
            .ok_or_else(|| CatalogError::not_found(self.entity, id))
    }

    fn filtered(&self, keep: impl Fn(&T) -> bool) -> Vec<T> {
        let mut matching: Vec<(u64, T)> = self
            .records
            .iter()
            .filter(|entry| keep(&entry.record))
            .map(|entry| (entry.seq, entry.record.clone()))
            .collect();

        matching.sort_by_key(|(seq, _)| *seq);
        matching.into_iter().map(|(_, record)| record).collect()
    }

    fn all(&self) -> Vec<T> {
        self.filtered(|_| true)
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

pub struct CatalogStore {
    destinations: Collection<Destination>,
    reviews: Collection<Review>,
    bookings: Collection<Booking>,
    config: StoreConfig,
    latency: LatencySimulator,
    counters: Counters,
    today: fn() -> NaiveDate,
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("destinations", &self.destinations.len())
            .field("reviews", &self.reviews.len())
            .field("bookings", &self.bookings.len())
            .field("config", &self.config)
            .finish()
    }
}

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

impl CatalogStore {
    // Empty store
    pub fn new(config: StoreConfig) -> Self {
        Self::from_records(config, vec![], vec![], vec![])
    }

    // Store preloaded with the default catalog
    pub fn with_seed_data(config: StoreConfig) -> Self {
        Self::from_records(
            config,
            seed::destinations(),
            seed::reviews(),
            seed::bookings(),
        )
    }

    pub fn from_records(
        config: StoreConfig,
        destinations: Vec<Destination>,
        reviews: Vec<Review>,
        bookings: Vec<Booking>,
    ) -> Self {
        Self {
            destinations: Collection::with_records(
                Entity::Destination,
                DESTINATION_PREFIX,
                destinations,
                |d| d.id.as_str(),
            ),
            reviews: Collection::with_records(
                Entity::Review,
                REVIEW_PREFIX,
                reviews,
                |r| r.id.as_str(),
            ),
            bookings: Collection::with_records(
                Entity::Booking,
                BOOKING_PREFIX,
                bookings,
                |b| b.id.as_str(),
            ),
            latency: LatencySimulator::new(&config.latency),
            config,
            counters: Counters::default(),
            today: utc_today,
        }
    }

    // Overrides the date source used to stamp new reviews
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn latency(&self) -> &LatencySimulator {
        &self.latency
    }

    pub fn destination_count(&self) -> usize {
        self.destinations.len()
    }

    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }

    pub fn booking_count(&self) -> usize {
        self.bookings.len()
    }

    async fn begin(&self, operation: Operation) {
        self.latency.wait(operation).await;
        self.counters.operations.fetch_add(1, Ordering::SeqCst);
    }

    // Counts and logs failures on their way back to the caller
    fn track<T>(&self, operation: Operation, result: CatalogResult<T>) -> CatalogResult<T> {
        match &result {
            Err(err @ CatalogError::NotFound { .. }) => {
                self.counters.not_found.fetch_add(1, Ordering::SeqCst);
                warn!(%operation, error = %err, "lookup failed");
            }
            Err(err) => {
                self.counters.rejected.fetch_add(1, Ordering::SeqCst);
                warn!(%operation, error = %err, "update rejected");
            }
            Ok(_) => {}
        }
        result
    }

    // Destination read for enrichment: pays the lookup latency but leaves
    // the operation and failure counters alone
    async fn lookup_destination(&self, id: &str) -> CatalogResult<Destination> {
        self.latency.wait(Operation::GetDestination).await;
        self.destinations.get(id)
    }

    fn ensure_destination(&self, destination_id: &str) -> CatalogResult<()> {
        if !self.config.enforce_references || self.destinations.contains(destination_id) {
            Ok(())
        } else {
            Err(CatalogError::not_found(Entity::Destination, destination_id))
        }
    }

    fn ensure_patched_destination(&self, destination_id: Option<&str>) -> CatalogResult<()> {
        match destination_id {
            Some(id) => self.ensure_destination(id),
            None => Ok(()),
        }
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::with_seed_data(StoreConfig::default())
    }
}

#[async_trait]
impl CatalogApi for CatalogStore {
    async fn list_destinations(&self, filter: &DestinationFilter) -> Vec<Destination> {
        self.begin(Operation::ListDestinations).await;

        let results = filter.apply(&self.destinations.all());
        debug!(?filter, count = results.len(), "listed destinations");
        results
    }

    async fn get_destination(&self, id: &str) -> CatalogResult<Destination> {
        self.begin(Operation::GetDestination).await;
        self.track(Operation::GetDestination, self.destinations.get(id))
    }

    async fn create_destination(&self, data: NewDestination) -> Destination {
        self.begin(Operation::CreateDestination).await;

        let destination = data.into_destination(self.destinations.next_id());
        self.destinations
            .insert(destination.id.clone(), destination.clone());
        self.counters.created.fetch_add(1, Ordering::SeqCst);

        info!(id = %destination.id, name = %destination.name, "destination created");
        destination
    }

    async fn update_destination(
        &self,
        id: &str,
        patch: DestinationPatch,
    ) -> CatalogResult<Destination> {
        self.begin(Operation::UpdateDestination).await;

        let result = self.destinations.update(id, |destination| {
            patch.apply(destination);
            Ok(())
        });
        if result.is_ok() {
            self.counters.updated.fetch_add(1, Ordering::SeqCst);
            info!(%id, "destination updated");
        }
        self.track(Operation::UpdateDestination, result)
    }

    // Reviews and bookings pointing at the destination are left in place
    async fn delete_destination(&self, id: &str) -> CatalogResult<Deleted> {
        self.begin(Operation::DeleteDestination).await;

        let result = self.destinations.remove(id).map(|_| {
            self.counters.deleted.fetch_add(1, Ordering::SeqCst);
            info!(%id, "destination deleted");
            Deleted::new("Destination deleted successfully")
        });
        self.track(Operation::DeleteDestination, result)
    }

    async fn list_featured_destinations(&self) -> Vec<Destination> {
        self.begin(Operation::ListDestinations).await;
        self.destinations.filtered(|d| d.featured)
    }

    // Distinct locations in order of first appearance
    async fn locations(&self) -> Vec<Location> {
        self.begin(Operation::ListDestinations).await;

        let mut seen = HashSet::new();
        self.destinations
            .all()
            .into_iter()
            .map(|d| d.location)
            .filter(|location| seen.insert(*location))
            .collect()
    }

    async fn list_reviews_for_destination(&self, destination_id: &str) -> Vec<Review> {
        self.begin(Operation::ListReviews).await;

        let reviews = self
            .reviews
            .filtered(|r| r.destination_id == destination_id);
        debug!(%destination_id, count = reviews.len(), "listed reviews");
        reviews
    }

    async fn create_review(&self, data: NewReview) -> CatalogResult<Review> {
        self.begin(Operation::CreateReview).await;

        if let Err(err) = self.ensure_destination(&data.destination_id) {
            return self.track(Operation::CreateReview, Err(err));
        }

        let review = data.into_review(self.reviews.next_id(), (self.today)());
        self.reviews.insert(review.id.clone(), review.clone());
        self.counters.created.fetch_add(1, Ordering::SeqCst);

        info!(id = %review.id, destination_id = %review.destination_id, "review created");
        Ok(review)
    }

    async fn update_review(&self, id: &str, patch: ReviewPatch) -> CatalogResult<Review> {
        self.begin(Operation::UpdateReview).await;

        let result = self
            .ensure_patched_destination(patch.destination_id.as_deref())
            .and_then(|_| {
                self.reviews.update(id, |review| {
                    patch.apply(review);
                    Ok(())
                })
            });
        if result.is_ok() {
            self.counters.updated.fetch_add(1, Ordering::SeqCst);
            info!(%id, "review updated");
        }
        self.track(Operation::UpdateReview, result)
    }

    async fn delete_review(&self, id: &str) -> CatalogResult<Deleted> {
        self.begin(Operation::DeleteReview).await;

        let result = self.reviews.remove(id).map(|_| {
            self.counters.deleted.fetch_add(1, Ordering::SeqCst);
            info!(%id, "review deleted");
            Deleted::new("Review deleted successfully")
        });
        self.track(Operation::DeleteReview, result)
    }

    // Destinations are resolved concurrently, each lookup paying its own
    // latency. A missing destination is handled per EnrichmentPolicy and is
    // not counted in `stats().not_found` unless it fails the listing.
    async fn list_bookings_for_user(&self, user_id: &str) -> CatalogResult<Vec<EnrichedBooking>> {
        self.begin(Operation::ListBookings).await;

        let bookings = self.bookings.filtered(|b| b.user_id == user_id);
        let lookups = bookings
            .iter()
            .map(|booking| self.lookup_destination(&booking.destination_id));
        let destinations = join_all(lookups).await;

        let mut enriched = Vec::with_capacity(bookings.len());
        for (booking, destination) in bookings.into_iter().zip(destinations) {
            match (destination, self.config.enrichment_policy) {
                (Ok(destination), _) => enriched.push(EnrichedBooking {
                    booking,
                    destination: Some(destination),
                }),
                (Err(err), EnrichmentPolicy::Propagate) => {
                    return self.track(Operation::ListBookings, Err(err))
                }
                (Err(_), EnrichmentPolicy::Skip) => {
                    warn!(booking_id = %booking.id, destination_id = %booking.destination_id,
                        "skipping booking with missing destination");
                }
                (Err(_), EnrichmentPolicy::MarkUnavailable) => {
                    warn!(booking_id = %booking.id, destination_id = %booking.destination_id,
                        "destination unavailable for booking");
                    enriched.push(EnrichedBooking {
                        booking,
                        destination: None,
                    });
                }
            }
        }

        debug!(%user_id, count = enriched.len(), "listed bookings");
        Ok(enriched)
    }

    async fn create_booking(&self, data: NewBooking) -> CatalogResult<Booking> {
        self.begin(Operation::CreateBooking).await;

        if let Err(err) = self.ensure_destination(&data.destination_id) {
            return self.track(Operation::CreateBooking, Err(err));
        }

        let booking = data.into_booking(self.bookings.next_id());
        self.bookings.insert(booking.id.clone(), booking.clone());
        self.counters.created.fetch_add(1, Ordering::SeqCst);

        info!(id = %booking.id, user_id = %booking.user_id, "booking created");
        Ok(booking)
    }

    async fn update_booking(&self, id: &str, patch: BookingPatch) -> CatalogResult<Booking> {
        self.begin(Operation::UpdateBooking).await;

        let result = self
            .ensure_patched_destination(patch.destination_id.as_deref())
            .and_then(|_| self.bookings.update(id, |booking| patch.apply(booking)));
        if let Ok(booking) = &result {
            self.counters.updated.fetch_add(1, Ordering::SeqCst);
            info!(%id, status = %booking.status, "booking updated");
        }
        self.track(Operation::UpdateBooking, result)
    }

    async fn delete_booking(&self, id: &str) -> CatalogResult<Deleted> {
        self.begin(Operation::DeleteBooking).await;

        let result = self.bookings.remove(id).map(|_| {
            self.counters.deleted.fetch_add(1, Ordering::SeqCst);
            info!(%id, "booking cancelled");
            Deleted::new("Booking cancelled successfully")
        });
        self.track(Operation::DeleteBooking, result)
    }

    fn stats(&self) -> StoreStats {
        self.counters.snapshot()
    }
}
