pub mod config;
pub mod db;
pub mod error;
pub mod flash;
pub mod forms;
pub mod models;
mod utils;

pub use db::Store;
pub use error::{DirectoryError, Entity, Result};
pub use forms::{ArtistForm, ShowForm, VenueForm};
