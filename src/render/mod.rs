pub mod alpha;
pub mod blur;
pub mod compare;
pub mod effects;
pub mod raster;
