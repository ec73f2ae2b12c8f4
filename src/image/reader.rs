pub mod decoder;
pub mod directory;
