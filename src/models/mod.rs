// Module exports for models

pub mod axis;
pub mod coordinate;
pub mod event;
pub mod schedule;
pub mod settings;
