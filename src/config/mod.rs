pub mod request;
pub mod visual;
