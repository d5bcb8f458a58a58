pub mod restart;
pub mod update;
