pub mod extraction;
pub mod trajectory;
