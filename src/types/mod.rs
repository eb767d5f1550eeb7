pub mod requests;
pub mod validate;
