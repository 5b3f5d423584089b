pub mod config;
pub mod db;
pub mod handlers;
pub mod models;

pub use config::AppConfig;
pub use handlers::router;
pub use models::SongSnapshot;
