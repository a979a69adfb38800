//! Job CRUD over the key layout.

mod read;
mod write;
