//! Database repositories.

mod application;
mod favorite;
mod location;
mod pet;
mod user;

pub use application::{ApplicationDetails, ApplicationRepository, StatusCounts};
pub use favorite::FavoriteRepository;
pub use location::LocationRepository;
pub use pet::{PetFilter, PetRepository};
pub use user::UserRepository;
