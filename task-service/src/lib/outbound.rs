pub mod audit;
pub mod repositories;
