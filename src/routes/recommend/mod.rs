pub mod utils;
pub mod views;
