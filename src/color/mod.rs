pub mod mapper;
pub mod palette;
