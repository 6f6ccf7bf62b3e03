pub mod catalog;
pub mod check;
pub mod edit;
pub mod generate;
pub mod info;
