pub mod config;
pub mod csv_rows;
pub mod derived;
pub mod error;
pub mod feed;
pub mod http_client;
pub mod loader;
pub mod normalize;
pub mod player;
pub mod profiles;
pub mod rankings;
pub mod selection;
pub mod state;
pub mod summary;
