pub mod persistence;
pub mod youbora;
