//! Gem ERP - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for registering gemstones, jewelry and carvings:
//! scan the item's QR tag, pick its product type, fill in the form generated
//! for that type and save it to the inventory backend.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (navigation)                                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  /dashboard    Dashboard                                     │
//! │  /new-product  ProductCreation                               │
//! │                ├── ScannerPanel                              │
//! │                ├── TypeSelector                              │
//! │                └── DynamicForm (→ MediaUploader)             │
//! │                LogsPanel                                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Schema, product and error types
//! - [`form`] - Dynamic form state and validation
//! - [`upload`] - Simulated upload progress
//! - [`workflow`] - Intake state machine
//! - [`components`] - UI components
//! - [`services`] - Backend and camera communication

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod form;
pub mod upload;
pub mod workflow;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Schema
    FieldKind, FieldOption, FormField, SchemaError, validate_schema,
    // Products
    ProductType, CreateProductPayload,
    // Logs
    LogEntry, LogLevel,
    // Errors
    AppError, AppResult,
};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application
// =============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Gem ERP"/>
        <Router>
            <Header/>
            <main class="container">
                <Routes>
                    <Route path="/" view=|| view! { <Redirect path="/dashboard"/> }/>
                    <Route path="/dashboard" view=Dashboard/>
                    <Route path="/new-product" view=NewProductPage/>
                </Routes>
            </main>
            <Footer/>
        </Router>
    }
}

#[component]
fn NewProductPage() -> impl IntoView {
    let (logs, set_logs) = create_signal(Vec::<LogEntry>::new());

    view! {
        <div class="hero">
            <h1>"New product"</h1>
            <p class="subtitle">"Scan the tag, choose the type and describe the item."</p>
        </div>
        <ProductCreation set_logs=set_logs/>
        <LogsPanel logs=logs set_logs=set_logs/>
    }
}
