pub mod participant;
pub mod serve;
