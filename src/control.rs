pub mod controller;
pub mod events;
pub mod scheduler;
