//! Store query functions organized by collection.

pub mod participants;
pub mod presales;
pub mod stats;
pub mod tokens;
