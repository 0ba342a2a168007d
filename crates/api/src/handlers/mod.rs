pub mod assignments;
pub mod rankings;
pub mod units;
