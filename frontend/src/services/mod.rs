//! Backend and device services.
//!
//! This module provides services for external communication:
//!
//! # Services
//!
//! - [`schema`] - Form schema per product type (mocked or remote)
//! - [`product`] - Product creation on the inventory backend
//! - [`scanner`] - Camera QR widget integration
//!
//! # JavaScript Bindings
//!
//! The scanner uses a JavaScript shim located in `src/js/scanner.js`
//! wrapping the html5-qrcode widget.

pub mod schema;
pub mod product;
pub mod scanner;

pub use schema::*;
pub use product::*;
pub use scanner::*;
