pub mod accounts;
pub mod dashboard;
pub mod import;
pub mod kpi;
