pub mod search;
pub mod track;
