pub mod catalog;
pub mod debounce;
pub mod render;
pub mod session;
pub mod trending;
