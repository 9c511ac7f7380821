pub mod output;
pub mod table;
