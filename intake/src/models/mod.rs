pub mod preferences;
pub mod requests;
pub mod responses;
pub mod snapshot;
