//! Database entities.

pub mod area;
pub mod desk;
pub mod form_submission;
pub mod office;
pub mod tag;
pub mod user;
pub mod user_tag;
pub mod visit;

pub use area::Entity as Area;
pub use desk::Entity as Desk;
pub use form_submission::Entity as FormSubmission;
pub use office::Entity as Office;
pub use tag::Entity as Tag;
pub use user::Entity as User;
pub use user_tag::Entity as UserTag;
pub use visit::Entity as Visit;
