//! Business logic services.

pub mod application;
pub mod favorite;
pub mod location;
pub mod media;
pub mod oauth;
pub mod pet;
pub mod user;

pub use application::ApplicationService;
pub use favorite::FavoriteService;
pub use location::LocationService;
pub use media::MediaService;
pub use oauth::GoogleOAuthService;
pub use pet::PetService;
pub use user::UserService;
