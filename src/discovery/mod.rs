pub mod codec;
pub mod publisher;
pub mod resolver;
pub mod service;
