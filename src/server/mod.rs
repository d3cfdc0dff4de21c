pub mod daemon;
pub mod loader;
