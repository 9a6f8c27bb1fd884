/// Context element entity module
pub mod context_element;
/// User entity module
pub mod user;

pub use context_element::Entity as ContextElement;
pub use user::Entity as User;
