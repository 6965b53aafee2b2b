// Travel catalog: destinations, reviews and bookings behind an in-memory store

pub mod booking;
pub mod config;
pub mod error;
pub mod filter;
pub mod ids;
pub mod latency;
pub mod models;
pub mod seed;
pub mod session;
pub mod store;
pub mod validation;

// Re-export key types for convenience
pub use config::{EnrichmentPolicy, LatencyConfig, StoreConfig};
pub use error::{CatalogError, CatalogResult, Entity, SessionError};
pub use filter::{paginate, DestinationFilter, Page, SortOrder};
pub use models::{
    Booking, BookingPatch, BookingStatus, Deleted, Destination, DestinationPatch,
    EnrichedBooking, Location, NewBooking, NewDestination, NewReview, Review, ReviewPatch,
};
pub use session::{AuthService, FileStorage, MemoryStorage, SessionStorage, User};
pub use store::{CatalogApi, CatalogStore, StoreStats};
pub use validation::{BookingForm, ReviewDraft, ValidationErrors};
