pub mod dividend_service;
pub mod fx_service;
pub mod ledger_service;
pub mod stock_service;
pub mod tax_service;
