pub mod level;
pub mod step;
pub mod world;
