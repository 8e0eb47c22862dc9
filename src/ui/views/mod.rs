pub mod history;
pub mod multi_result;
pub mod quiz;
pub mod result;
pub mod start;
