//! Resource locators for docweave.
//!
//! This crate provides platform-specific implementations of the
//! `ResourceLocator` trait from docweave-traits.
//!
//! ## Available Locators
//!
//! - [`FilesystemResourceLocator`]: Looks resources up across ordered directories
//!
//! ## Re-exports
//!
//! For convenience, we also re-export the in-memory locator from docweave-traits:
//! - [`InMemoryResourceLocator`]: Pre-populated in-memory storage

mod filesystem;

pub use filesystem::FilesystemResourceLocator;

pub use docweave_traits::InMemoryResourceLocator;
