pub mod output;
pub mod pass;
