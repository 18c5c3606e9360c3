// simulation_engine/mod.rs
pub mod geometry;
pub mod intersections;
pub mod simulation;
pub mod vehicles;
