// Service module exports

pub mod codec;
pub mod csv;
pub mod grid;
pub mod selection;
pub mod settings;
pub mod share;
