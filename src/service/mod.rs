pub mod passwords;
pub mod sessions;
