pub mod config;
pub mod logging;
pub mod module;

#[cfg(test)]
pub(crate) mod test_support;
