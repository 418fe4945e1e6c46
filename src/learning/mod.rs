pub mod action;
pub mod policy;
pub mod q_table;
pub mod reward;
pub mod state;
pub mod trainer;
pub mod transition;
