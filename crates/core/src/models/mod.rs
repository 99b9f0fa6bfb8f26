pub mod expense;
pub mod form;
pub mod ledger;
pub mod settings;
