pub mod polynomial;
