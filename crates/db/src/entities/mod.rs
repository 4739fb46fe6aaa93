//! Database entities.

#![allow(missing_docs)]

pub mod application;
pub mod favorite;
pub mod location;
pub mod pet;
pub mod user;

pub use application::Entity as Application;
pub use favorite::Entity as Favorite;
pub use location::Entity as Location;
pub use pet::Entity as Pet;
pub use user::Entity as User;
