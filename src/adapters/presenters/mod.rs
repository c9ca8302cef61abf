//! Presenters - format application state for display

pub mod catalog_presenter;

pub use catalog_presenter::{AppRowViewModel, CatalogPresenter};
