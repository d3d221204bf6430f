//! Frontend file helpers used alongside manifest reconciliation
//!
//! This module provides:
//! - Import path rewriting for resources packaged in jars
//! - Listing of generated frontend modules

mod generated;
mod resource;

pub use generated::{generated_modules, GENERATED_PREFIX};
pub use resource::{
    DirectoryResourceLocator, ResourceLocator, ResourcePathResolver,
    COMPATIBILITY_RESOURCES_FRONTEND_DEFAULT, FLOW_NPM_PACKAGE_NAME, RESOURCES_FRONTEND_DEFAULT,
};
