// Static reference data (read-only, compiled in)

pub mod countries;
pub mod options;
pub mod vaccines;
