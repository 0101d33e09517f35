pub mod dividend;
pub mod money;
pub mod ownership;
pub mod quote;
pub mod settings;
pub mod stock;
pub mod transaction;
