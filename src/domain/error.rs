//! Error types for the layout picker.
//!
//! This module defines the centralized error type [`PickerError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for layout picker operations.
///
/// Consolidates the error conditions of the plugin, from collaborator lookups
/// (selected site, catalog) to I/O failures and configuration issues.
///
/// # Examples
///
/// ```
/// use layout_picker::PickerError;
///
/// fn read_catalog() -> Result<(), PickerError> {
///     Err(PickerError::Catalog("duplicate layout slug: about-1".to_string()))
/// }
///
/// assert!(read_catalog().is_err());
/// ```
#[derive(Debug, Error)]
pub enum PickerError {
    /// Storage operation failed.
    ///
    /// Occurs when the preference, site or page store cannot answer, including
    /// when no site is selected or the selected id is unknown.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Automatically converts from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with background worker failed.
    ///
    /// Occurs when the worker has no storage or cannot decode a message.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Layout catalog could not be read or is malformed.
    ///
    /// Raised for unparsable catalog files and for catalogs with duplicate slugs.
    #[error("Catalog error: {0}")]
    Catalog(String),
}

/// A specialized `Result` type for layout picker operations.
pub type Result<T> = std::result::Result<T, PickerError>;
