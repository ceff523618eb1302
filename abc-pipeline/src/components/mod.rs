pub mod category_filter;
pub mod class_filter;
pub mod classification_source;
pub mod csv_export_side_effect;
pub mod report_cache_side_effect;
pub mod value_selector;
