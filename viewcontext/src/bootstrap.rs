//! One-time registry population at application start.
//!
//! Providers receive the registry explicitly; whatever collaborators they
//! need to compute shared values are fields of the provider, supplied by the
//! composition root when it constructs them.

use crate::registry::ContextRegistry;
use anyhow::Context as _;
use tracing::{debug, info};

/// A source of view context registered during bootstrap.
pub trait ContextProvider: Send + Sync {
    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    /// Registers this provider's context.
    ///
    /// # Errors
    ///
    /// Any error aborts bootstrap.
    fn register(&self, registry: &ContextRegistry) -> anyhow::Result<()>;
}

/// An ordered set of providers, run exactly once.
///
/// [`run`](Self::run) consumes the bootstrap, so the providers cannot be
/// applied twice.
#[derive(Default)]
pub struct Bootstrap {
    providers: Vec<Box<dyn ContextProvider>>,
}

impl std::fmt::Debug for Bootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bootstrap")
            .field(
                "providers",
                &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Bootstrap {
    /// Creates an empty bootstrap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a provider.
    #[must_use]
    pub fn provider(mut self, provider: impl ContextProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Returns the number of providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if no providers were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Runs every provider in order against `registry`.
    ///
    /// # Errors
    ///
    /// Stops at the first failing provider and returns its error with the
    /// provider name attached.
    pub fn run(self, registry: &ContextRegistry) -> anyhow::Result<()> {
        for provider in &self.providers {
            debug!(provider = provider.name(), "Registering view context provider");
            provider
                .register(registry)
                .with_context(|| format!("View context provider '{}' failed", provider.name()))?;
        }

        let snap = registry.snapshot();
        info!(
            providers = self.providers.len(),
            global_keys = snap.global().len(),
            scoped_entries = snap.entries().len(),
            "View context bootstrap complete"
        );
        Ok(())
    }
}
