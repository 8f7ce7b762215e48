// Timetable Weaver Library
// Grid model, share token codec and exchange formats

pub mod models;
pub mod services;
pub mod utils;
