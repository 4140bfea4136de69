use crate::config::ConfigValues;
use crate::error::ReaderError;
use crate::reader::InputReader;

/// Host API version. A component built against a different version is
/// rejected at instantiation time.
pub const INTAKE_API_VERSION: u32 = 1;

/// What a component provides. Readers are the only kind today; the tag keeps
/// the registry contract open for other capabilities (writers, analyzers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ComponentKind {
    Reader,
}

/// Constructs a fresh reader instance from validated config values.
pub type ReaderFactory = fn(&ConfigValues) -> Result<Box<dyn InputReader>, ReaderError>;

/// Immutable description of one registered component.
///
/// Built by the component crate and handed to the host's registry in a
/// discrete registration call at startup — there is no ambient global list.
#[derive(Debug, Clone)]
pub struct ComponentDescriptor {
    pub name: &'static str,
    /// `None` for builtin components shipped with the host.
    pub version: Option<u32>,
    pub api_version: u32,
    pub kind: ComponentKind,
    /// Disabled components stay listed but cannot be instantiated.
    pub enabled: bool,
    /// Best-effort component: may not handle every input it claims.
    pub partial: bool,
    pub factory: ReaderFactory,
}
