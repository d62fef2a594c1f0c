pub mod game;
pub mod registry;
pub mod score_store;
pub mod word_loader;
