//! Named client registry
//!
//! Lets several connections share one pre-authenticated HTTP client by name.
//! A registry is an explicit object handed to the driver; all access goes
//! through a mutex so clients can be (un)registered from any thread.

use parking_lot::Mutex;
use reqwest::Client;
use std::collections::HashMap;

/// Name-addressable set of pre-built HTTP clients
#[derive(Debug, Default)]
pub struct ClientRegistry {
    clients: Mutex<HashMap<String, Client>>,
}

impl ClientRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client, replacing any client with the same name
    pub fn register(&self, name: impl Into<String>, client: Client) -> Option<Client> {
        self.clients.lock().insert(name.into(), client)
    }

    /// Remove a client
    pub fn unregister(&self, name: &str) -> Option<Client> {
        self.clients.lock().remove(name)
    }

    /// Look up a client by name
    pub fn get(&self, name: &str) -> Option<Client> {
        // reqwest clients are reference counted, cloning shares the pool
        self.clients.lock().get(name).cloned()
    }

    /// Check whether a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.clients.lock().contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.clients.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered clients
    pub fn len(&self) -> usize {
        self.clients.lock().len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.clients.lock().is_empty()
    }
}
