pub mod fallback;
pub mod host;
pub mod renderer;
pub mod surface;
