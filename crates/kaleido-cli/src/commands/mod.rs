pub mod lower;
pub mod subset;
pub mod thompson;
