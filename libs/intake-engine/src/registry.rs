use intake_api::component::{ComponentDescriptor, INTAKE_API_VERSION};
use intake_api::config::ConfigValues;
use intake_api::reader::InputReader;

use crate::error::EngineError;

/// Registry of every component known to the host.
///
/// Populated by discrete [`register`](Self::register) calls at startup and
/// queried by the ingest driver — not a global mutable list. Registration
/// order is preserved and observable through [`iter`](Self::iter).
#[derive(Default)]
pub struct ComponentRegistry {
    components: Vec<ComponentDescriptor>,
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field(
                "components",
                &self.components.iter().map(|c| c.name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component descriptor. Names are unique.
    pub fn register(&mut self, descriptor: ComponentDescriptor) -> Result<(), EngineError> {
        if self.components.iter().any(|c| c.name == descriptor.name) {
            return Err(EngineError::Config(format!(
                "component '{}' is already registered",
                descriptor.name
            )));
        }
        tracing::info!(
            component = descriptor.name,
            version = ?descriptor.version,
            api_version = descriptor.api_version,
            "registered component"
        );
        self.components.push(descriptor);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&ComponentDescriptor> {
        self.components.iter().find(|c| c.name == name)
    }

    /// Descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentDescriptor> {
        self.components.iter()
    }

    /// Construct a reader from a registered component.
    ///
    /// Checks API-version compatibility and the enabled flag before calling
    /// the component's factory.
    pub fn instantiate(
        &self,
        name: &str,
        config: &ConfigValues,
    ) -> Result<Box<dyn InputReader>, EngineError> {
        let descriptor = self
            .lookup(name)
            .ok_or_else(|| EngineError::ComponentNotFound(name.to_string()))?;

        if descriptor.api_version != INTAKE_API_VERSION {
            return Err(EngineError::ApiVersionMismatch {
                component: name.to_string(),
                component_api: descriptor.api_version,
                host_api: INTAKE_API_VERSION,
            });
        }

        if !descriptor.enabled {
            return Err(EngineError::ComponentDisabled {
                component: name.to_string(),
            });
        }

        let reader = (descriptor.factory)(config)
            .map_err(|e| e.with_context(format!("component '{name}'")))?;
        Ok(reader)
    }
}
