//! View layer over ABC classification output.
//!
//! The classifier in `abc-core` runs exactly once per dataset; everything a
//! report wants after that (category filters, class filters, top-N by value,
//! CSV export, caching) is a cheap staged pass over the already-classified
//! rows. The stages are generic traits wired into concrete pipelines under
//! [`pipelines`], with the reusable components under [`components`].
//!
//! Also home to the CSV dataset loader, since ingesting the table is the
//! view layer's job, not the core's.

pub mod components;
pub mod dataset_loader;
pub mod filter;
pub mod pipelines;
pub mod selector;
pub mod side_effect;
pub mod source;
pub mod summary;
pub mod types;
pub mod util;
pub mod view_pipeline;
