//! Port definitions (trait interfaces implemented by adapter crates)

pub mod directory_access;
pub mod filesystem;
