pub mod form;
pub mod public;

#[cfg(test)]
pub(crate) mod stub;
