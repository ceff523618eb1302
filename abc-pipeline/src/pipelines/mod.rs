pub mod abc_report;
