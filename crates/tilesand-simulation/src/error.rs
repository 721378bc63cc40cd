//! Startup errors raised while loading or resolving a material catalog

use std::path::PathBuf;

/// A material catalog that cannot be turned into a registry
///
/// These are configuration errors: they abort startup and are never
/// recovered from at runtime.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("material `{0}` is declared more than once")]
    DuplicateMaterial(String),

    #[error("material `{material}` refers to undeclared material `{reference}`")]
    UnresolvedMaterial { material: String, reference: String },

    #[error("material `{0}` is movable but has an empty candidate ordering")]
    EmptyMovement(String),

    #[error("material `{0}` is corrosive with a chance of zero")]
    ZeroChance(String),

    #[error("catalog declares {0} materials, more than a registry can index")]
    TooManyMaterials(usize),

    #[error("failed to read catalog file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse RON catalog")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to serialize catalog to RON")]
    Serialize(#[from] ron::Error),
}
