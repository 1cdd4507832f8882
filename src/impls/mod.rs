pub mod decimal;
pub mod default;
