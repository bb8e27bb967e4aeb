//! Pure view helpers over already-fetched data.

pub mod timeline;
