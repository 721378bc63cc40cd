//! Material declarations and the resolved material registry
//!
//! Materials are declared by name and may refer to materials declared later
//! in the same catalog (wood ignites into burning wood, which cools back into
//! wood). Declarations are collected in a [`MaterialCatalog`] and resolved once
//! into [`Materials`], where every reference is a [`MaterialId`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::RegistryError;
use crate::directions::{Direction, GAS_ORDERINGS, LIQUID_ORDERINGS, POWDER_ORDERINGS};

/// Handle of a resolved material (its index in [`Materials`])
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaterialId(pub u16);

impl MaterialId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Per-instance color rule
///
/// Each channel is `base + rand(v)` for a positive variation `v`,
/// `base - rand(-v)` for a negative one, and just `base` for zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub base: [u8; 3],
    #[serde(default)]
    pub variation: [i16; 3],
}

impl ColorSpec {
    pub const fn fixed(base: [u8; 3]) -> Self {
        Self {
            base,
            variation: [0; 3],
        }
    }

    pub const fn varied(base: [u8; 3], variation: [i16; 3]) -> Self {
        Self { base, variation }
    }
}

impl Default for ColorSpec {
    fn default() -> Self {
        Self::fixed([255, 0, 255]) // Magenta for missing colors
    }
}

/// Candidate orderings tried by the movement system
///
/// With one ordering it is always used; with several, one is drawn at random
/// each tick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub orderings: Vec<Vec<Direction>>,
}

impl Movement {
    pub fn powder() -> Self {
        Self::from_table(POWDER_ORDERINGS)
    }

    pub fn liquid() -> Self {
        Self::from_table(LIQUID_ORDERINGS)
    }

    pub fn gas() -> Self {
        Self::from_table(GAS_ORDERINGS)
    }

    fn from_table(table: &[&[Direction]]) -> Self {
        Self {
            orderings: table.iter().map(|ordering| ordering.to_vec()).collect(),
        }
    }
}

/// A heat boundary and the material a tile turns into when crossing it
///
/// `successor: None` destroys the tile instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdDecl {
    pub heat: i32,
    #[serde(default)]
    pub successor: Option<String>,
}

/// Declared thermal capability
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThermalDecl {
    pub base_heat: i32,
    /// Random extra heat at construction, in `0..heat_variation`
    #[serde(default)]
    pub heat_variation: u32,
    pub transfer_coefficient: f64,
    /// Added to the tile's heat every tick (negative cools it)
    #[serde(default)]
    pub passive_heat_delta: i32,
    /// Transition when heat >= threshold
    #[serde(default)]
    pub upper: Option<ThresholdDecl>,
    /// Transition when heat <= threshold
    #[serde(default)]
    pub lower: Option<ThresholdDecl>,
}

impl Default for ThermalDecl {
    fn default() -> Self {
        Self {
            base_heat: 25,
            heat_variation: 0,
            transfer_coefficient: 1.0,
            passive_heat_delta: 0,
            upper: None,
            lower: None,
        }
    }
}

/// Declared per-tick custom behavior
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BehaviorDecl {
    /// Wanders upward, heating what it touches, until its lifetime runs out
    Igniter {
        lifetime: i32,
        #[serde(default)]
        lifetime_variation: u32,
        heat_injection: i32,
        burn_cost: i32,
    },
    /// Converts every neighbor into this material
    Contagion,
    /// With probability `1 / chance`, destroys a foreign neighbor and itself
    Corrosive { chance: u32 },
    /// After `delay` ticks, expands into the 4 cardinal cells `range` times,
    /// leaving `residue` behind at the last ring
    Explosive {
        range: u32,
        delay: u32,
        #[serde(default)]
        residue: Option<String>,
    },
}

/// One material as written in a catalog, before name resolution
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialDecl {
    pub name: String,
    #[serde(default)]
    pub color: ColorSpec,
    /// Displacement priority: a mover swaps only with strictly lighter tiles
    #[serde(default)]
    pub density: i32,
    /// Offered in the placement palette
    #[serde(default = "default_selectable")]
    pub selectable: bool,
    #[serde(default)]
    pub movement: Option<Movement>,
    #[serde(default)]
    pub thermal: Option<ThermalDecl>,
    #[serde(default)]
    pub behavior: Option<BehaviorDecl>,
}

fn default_selectable() -> bool {
    true
}

impl Default for MaterialDecl {
    fn default() -> Self {
        Self {
            name: "unknown".to_string(),
            color: ColorSpec::default(),
            density: 0,
            selectable: true,
            movement: None,
            thermal: None,
            behavior: None,
        }
    }
}

/// A resolved heat boundary
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Threshold {
    pub heat: i32,
    pub successor: Option<MaterialId>,
}

/// Threshold evaluation specialized to the rules a material declares
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThresholdCheck {
    Never,
    Upper(Threshold),
    Lower(Threshold),
    Both { upper: Threshold, lower: Threshold },
}

impl ThresholdCheck {
    fn from_rules(upper: Option<Threshold>, lower: Option<Threshold>) -> Self {
        match (upper, lower) {
            (None, None) => Self::Never,
            (Some(upper), None) => Self::Upper(upper),
            (None, Some(lower)) => Self::Lower(lower),
            (Some(upper), Some(lower)) => Self::Both { upper, lower },
        }
    }

    /// The rule crossed at `heat`, if any. Upper wins when both apply.
    #[inline]
    pub fn crossed(&self, heat: i32) -> Option<Threshold> {
        match *self {
            Self::Never => None,
            Self::Upper(upper) => (heat >= upper.heat).then_some(upper),
            Self::Lower(lower) => (heat <= lower.heat).then_some(lower),
            Self::Both { upper, lower } => {
                if heat >= upper.heat {
                    Some(upper)
                } else if heat <= lower.heat {
                    Some(lower)
                } else {
                    None
                }
            }
        }
    }
}

/// Resolved thermal capability
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThermalDef {
    pub base_heat: i32,
    pub heat_variation: u32,
    pub transfer_coefficient: f64,
    pub passive_heat_delta: i32,
    pub thresholds: ThresholdCheck,
}

/// Resolved custom behavior
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Behavior {
    Igniter {
        lifetime: i32,
        lifetime_variation: u32,
        heat_injection: i32,
        burn_cost: i32,
    },
    Contagion,
    Corrosive {
        chance: u32,
    },
    Explosive {
        range: u32,
        delay: u32,
        residue: Option<MaterialId>,
    },
}

/// Definition of a material's properties, with every reference resolved
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialDef {
    pub id: MaterialId,
    pub name: String,
    pub color: ColorSpec,
    pub density: i32,
    pub selectable: bool,
    pub movement: Option<Movement>,
    pub thermal: Option<ThermalDef>,
    pub behavior: Option<Behavior>,
}

impl MaterialDef {
    /// Name for display ("burning_wood" becomes "burning wood")
    pub fn display_name(&self) -> String {
        self.name.replace('_', " ")
    }
}

/// First phase of the registry: declarations referring to each other by name
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialCatalog {
    decls: Vec<MaterialDecl>,
}

impl MaterialCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration; returns the id it will resolve to
    pub fn declare(&mut self, decl: MaterialDecl) -> MaterialId {
        self.decls.push(decl);
        MaterialId((self.decls.len() - 1) as u16)
    }

    pub fn declarations(&self) -> &[MaterialDecl] {
        &self.decls
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Parse a catalog written as a RON list of declarations
    pub fn from_ron_str(source: &str) -> Result<Self, RegistryError> {
        Ok(ron::from_str(source)?)
    }

    /// Load a catalog from a RON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&content)
    }

    pub fn to_ron_string(&self) -> Result<String, RegistryError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Second phase: turn every material name into a [`MaterialId`]
    ///
    /// Fails on duplicate names, references to undeclared materials and
    /// capability data that could never run.
    pub fn resolve(self) -> Result<Materials, RegistryError> {
        if self.decls.len() > u16::MAX as usize {
            return Err(RegistryError::TooManyMaterials(self.decls.len()));
        }

        let mut by_name = HashMap::with_capacity(self.decls.len());
        for (index, decl) in self.decls.iter().enumerate() {
            if by_name
                .insert(decl.name.clone(), MaterialId(index as u16))
                .is_some()
            {
                return Err(RegistryError::DuplicateMaterial(decl.name.clone()));
            }
        }

        let lookup = |owner: &str, reference: Option<&str>| -> Result<_, RegistryError> {
            reference
                .map(|name| {
                    by_name
                        .get(name)
                        .copied()
                        .ok_or_else(|| RegistryError::UnresolvedMaterial {
                            material: owner.to_string(),
                            reference: name.to_string(),
                        })
                })
                .transpose()
        };

        let mut materials = Vec::with_capacity(self.decls.len());
        for (index, decl) in self.decls.into_iter().enumerate() {
            if let Some(movement) = &decl.movement
                && (movement.orderings.is_empty()
                    || movement.orderings.iter().any(|ordering| ordering.is_empty()))
            {
                return Err(RegistryError::EmptyMovement(decl.name));
            }

            let thermal = match decl.thermal {
                Some(thermal) => {
                    let rule = |threshold: Option<ThresholdDecl>| {
                        threshold
                            .map(|t| {
                                lookup(&decl.name, t.successor.as_deref()).map(|successor| {
                                    Threshold {
                                        heat: t.heat,
                                        successor,
                                    }
                                })
                            })
                            .transpose()
                    };
                    let upper = rule(thermal.upper)?;
                    let lower = rule(thermal.lower)?;
                    Some(ThermalDef {
                        base_heat: thermal.base_heat,
                        heat_variation: thermal.heat_variation,
                        transfer_coefficient: thermal.transfer_coefficient,
                        passive_heat_delta: thermal.passive_heat_delta,
                        thresholds: ThresholdCheck::from_rules(upper, lower),
                    })
                }
                None => None,
            };

            let behavior = match decl.behavior {
                Some(BehaviorDecl::Igniter {
                    lifetime,
                    lifetime_variation,
                    heat_injection,
                    burn_cost,
                }) => Some(Behavior::Igniter {
                    lifetime,
                    lifetime_variation,
                    heat_injection,
                    burn_cost,
                }),
                Some(BehaviorDecl::Contagion) => Some(Behavior::Contagion),
                Some(BehaviorDecl::Corrosive { chance }) => {
                    if chance == 0 {
                        return Err(RegistryError::ZeroChance(decl.name));
                    }
                    Some(Behavior::Corrosive { chance })
                }
                Some(BehaviorDecl::Explosive {
                    range,
                    delay,
                    residue,
                }) => Some(Behavior::Explosive {
                    range,
                    delay,
                    residue: lookup(&decl.name, residue.as_deref())?,
                }),
                None => None,
            };

            materials.push(MaterialDef {
                id: MaterialId(index as u16),
                name: decl.name,
                color: decl.color,
                density: decl.density,
                selectable: decl.selectable,
                movement: decl.movement,
                thermal,
                behavior,
            });
        }

        log::info!("Resolved {} materials", materials.len());

        Ok(Materials { materials, by_name })
    }
}

/// Resolved registry of all materials
#[derive(Clone, Debug)]
pub struct Materials {
    materials: Vec<MaterialDef>,
    by_name: HashMap<String, MaterialId>,
}

impl Materials {
    /// Registry built from [`MaterialCatalog::builtin`]
    ///
    /// # Panics
    /// If the built-in catalog does not resolve, which is a startup bug.
    pub fn builtin() -> Self {
        match MaterialCatalog::builtin().resolve() {
            Ok(materials) => materials,
            Err(err) => panic!("built-in material catalog is inconsistent: {err}"),
        }
    }

    /// Get material definition by ID
    ///
    /// Ids are only handed out by the registry that resolved them.
    pub fn get(&self, id: MaterialId) -> &MaterialDef {
        &self.materials[id.index()]
    }

    pub fn try_get(&self, id: MaterialId) -> Option<&MaterialDef> {
        self.materials.get(id.index())
    }

    /// Look a material up by its catalog name
    pub fn id(&self, name: &str) -> Option<MaterialId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MaterialDef> {
        self.materials.iter()
    }

    /// Materials offered in the placement palette, in catalog order
    pub fn palette(&self) -> impl Iterator<Item = &MaterialDef> {
        self.materials.iter().filter(|material| material.selectable)
    }
}

impl Default for Materials {
    fn default() -> Self {
        Self::builtin()
    }
}
