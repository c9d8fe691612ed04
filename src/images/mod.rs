//! Images Module
//!
//! Stores image metadata captured by the companion browser extension: the
//! image URL, a description of what the image shows, and when it was saved.
//! A URL can only be saved once.
//!
//! # Features
//!
//! - Create, list, and fetch-by-url operations over stored records
//! - Ready-to-use HTTP handlers and routes
//! - Database migrations included
//!
//! # Usage
//!
//! ```rust,ignore
//! use lightbox::images;
//!
//! // Get the migrations to run
//! for (name, sql) in images::migrations() {
//!     // Run migration...
//! }
//!
//! // Mount the routes
//! let app = Router::new()
//!     .nest("/api/images", images::routes())
//!     .with_state(app_state);
//!
//! // Use the store directly
//! let store = images::ImageStore::new(connection);
//! let record = store.create_image(input).await?;
//! ```

mod handler;
mod lib;
mod routes;

// Re-export the store types and functions
pub use lib::*;

// Re-export the routes function
pub use routes::routes;

/// Returns the migrations for the images module.
///
/// These should be run during application startup to ensure the database
/// schema is up to date.
pub fn migrations() -> &'static [(&'static str, &'static str)] {
    &[(
        "images/001_images.sql",
        include_str!("migrations/001_images.sql"),
    )]
}
