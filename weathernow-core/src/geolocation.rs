//! "My location" lookups.
//!
//! Coordinates are never resolved to a city. A granted permission searches
//! for a fixed placeholder label; anything else does nothing.

use async_trait::async_trait;
use std::fmt::Debug;

pub const PLACEHOLDER_LOCATION: &str = "Your Location";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationPermission {
    Granted,
    Denied,
    /// The host has no location capability at all.
    Unavailable,
}

#[async_trait]
pub trait LocationAccess: Send + Sync + Debug {
    async fn request_permission(&self) -> LocationPermission;
}

pub fn location_query(permission: LocationPermission) -> Option<&'static str> {
    match permission {
        LocationPermission::Granted => Some(PLACEHOLDER_LOCATION),
        LocationPermission::Denied | LocationPermission::Unavailable => None,
    }
}

/// Location permission taken from the `[location] allow` config flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfiguredLocationAccess {
    allow: Option<bool>,
}

impl ConfiguredLocationAccess {
    pub fn new(allow: Option<bool>) -> Self {
        Self { allow }
    }
}

#[async_trait]
impl LocationAccess for ConfiguredLocationAccess {
    async fn request_permission(&self) -> LocationPermission {
        match self.allow {
            Some(true) => LocationPermission::Granted,
            Some(false) => LocationPermission::Denied,
            None => LocationPermission::Unavailable,
        }
    }
}
