//! Database repositories.

mod form_submission;
mod office;
mod tag;
mod user;
mod user_tag;
mod visit;

pub use form_submission::FormSubmissionRepository;
pub use office::OfficeRepository;
pub use tag::TagRepository;
pub use user::UserRepository;
pub use user_tag::UserTagRepository;
pub use visit::VisitRepository;
