pub mod favorites;
pub mod identity;
pub mod sync;
