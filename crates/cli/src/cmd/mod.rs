pub mod doctor;
pub mod filter;
pub mod update;
