//! UI Components for the Gem ERP application.
//!
//! This module contains all Leptos components organized by function:
//!
//! # Layout Components
//! - [`Header`] - Navigation bar
//! - [`Footer`] - Page footer
//! - [`Dashboard`] - Landing page
//!
//! # Feature Components
//! - [`ProductCreation`] - Scan → type → details → save workflow
//! - [`ScannerPanel`] - Camera QR scanning with manual fallback
//! - [`TypeSelector`] - Product category buttons
//! - [`DynamicForm`] - Form generated from a field schema
//! - [`MediaUploader`] - Photo picker with upload progress
//! - [`LogsPanel`] - Activity log

mod header;
mod footer;
mod dashboard;
mod product_creation;
mod scanner;
mod type_selector;
mod dynamic_form;
mod media_uploader;
mod logs;

pub use header::*;
pub use footer::*;
pub use dashboard::*;
pub use product_creation::*;
pub use scanner::*;
pub use type_selector::*;
pub use dynamic_form::*;
pub use media_uploader::*;
pub use logs::*;
