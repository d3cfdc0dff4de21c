pub mod directory_store;
