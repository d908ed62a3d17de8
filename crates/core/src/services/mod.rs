//! Business logic services.

pub mod retention;
pub mod tag;
pub mod user;
pub mod visit;

pub use retention::{RetentionService, SweepOutcome};
pub use tag::{TagGroup, TagImportEntry, TagImportGroup, TagImportSummary, TagService};
pub use user::{UserFilter, UserService};
pub use visit::{AreaWithDesks, DeskAvailability, Visitor, VisitService};
