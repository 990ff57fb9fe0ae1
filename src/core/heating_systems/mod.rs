pub mod heat_pump;
pub mod recommendations;
pub mod review;
