pub mod profile;
pub mod recommendation;
