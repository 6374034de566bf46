pub mod camera;
pub mod gameloop;
pub mod input;
