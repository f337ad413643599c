// Service exports
pub mod appwrite;
pub mod cache;

pub use appwrite::{AppwriteClient, AppwriteError};
pub use cache::{CacheKey, ProfileCache};
