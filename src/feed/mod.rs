pub mod agenda;
pub mod news;
