//! Built-in material catalog
//!
//! Numeric tuning for the default palette. Registration order fixes the
//! [`MaterialId`] constants below.

use crate::materials::{
    BehaviorDecl, ColorSpec, MaterialCatalog, MaterialDecl, MaterialId, Movement, ThermalDecl,
    ThresholdDecl,
};

/// Built-in material IDs
impl MaterialId {
    // Solids
    pub const CONCRETE: MaterialId = MaterialId(0);
    pub const WOOD: MaterialId = MaterialId(1);
    pub const BURNING_WOOD: MaterialId = MaterialId(2);
    pub const GLASS: MaterialId = MaterialId(3);

    // Powders
    pub const SAND: MaterialId = MaterialId(4);
    pub const ROCK: MaterialId = MaterialId(5);
    pub const ICE: MaterialId = MaterialId(6);
    pub const ASH: MaterialId = MaterialId(7);
    pub const GUNPOWDER: MaterialId = MaterialId(8);

    // Liquids
    pub const WATER: MaterialId = MaterialId(9);
    pub const OIL: MaterialId = MaterialId(10);
    pub const LAVA: MaterialId = MaterialId(11);
    pub const LIQUID_NITROGEN: MaterialId = MaterialId(12);

    // Gases
    pub const VAPOR: MaterialId = MaterialId(13);
    pub const SMOKE: MaterialId = MaterialId(14);

    // Reactive
    pub const FIRE: MaterialId = MaterialId(15);
    pub const GREY_GOO: MaterialId = MaterialId(16);
    pub const ACID: MaterialId = MaterialId(17);
    pub const EXPLOSION: MaterialId = MaterialId(18);
}

/// Threshold that turns the tile into `successor`
fn becomes(heat: i32, successor: &str) -> Option<ThresholdDecl> {
    Some(ThresholdDecl {
        heat,
        successor: Some(successor.to_string()),
    })
}

/// Threshold that destroys the tile without a successor
fn vanish(heat: i32) -> Option<ThresholdDecl> {
    Some(ThresholdDecl {
        heat,
        successor: None,
    })
}

impl MaterialCatalog {
    /// The default palette
    pub fn builtin() -> Self {
        let mut catalog = Self::new();

        // SOLIDS

        catalog.declare(MaterialDecl {
            name: "concrete".to_string(),
            color: ColorSpec::varied([140, 140, 140], [40, 40, 40]),
            density: 100_000,
            thermal: Some(ThermalDecl::default()),
            ..Default::default()
        });

        catalog.declare(MaterialDecl {
            name: "wood".to_string(),
            color: ColorSpec::varied([117, 63, 4], [40, 40, 40]),
            density: 10_000,
            thermal: Some(ThermalDecl {
                transfer_coefficient: 0.01,
                upper: becomes(500, "burning_wood"),
                ..Default::default()
            }),
            ..Default::default()
        });

        // Only reachable by heating wood
        catalog.declare(MaterialDecl {
            name: "burning_wood".to_string(),
            color: ColorSpec::varied([209, 118, 4], [40, 40, 0]),
            density: 100_000,
            selectable: false,
            thermal: Some(ThermalDecl {
                base_heat: 500,
                transfer_coefficient: 1.0,
                passive_heat_delta: 5, // combustion
                upper: becomes(2000, "ash"),
                lower: becomes(90, "wood"),
                ..Default::default()
            }),
            ..Default::default()
        });

        catalog.declare(MaterialDecl {
            name: "glass".to_string(),
            color: ColorSpec::varied([152, 203, 206], [40, 40, 40]),
            density: 100_000,
            thermal: Some(ThermalDecl {
                transfer_coefficient: 0.5,
                ..Default::default()
            }),
            ..Default::default()
        });

        // POWDERS

        catalog.declare(MaterialDecl {
            name: "sand".to_string(),
            color: ColorSpec::varied([205, 205, 0], [-50, -50, 0]),
            density: 10,
            movement: Some(Movement::powder()),
            thermal: Some(ThermalDecl {
                transfer_coefficient: 0.05,
                upper: becomes(800, "glass"),
                ..Default::default()
            }),
            ..Default::default()
        });

        catalog.declare(MaterialDecl {
            name: "rock".to_string(),
            color: ColorSpec::varied([40, 40, 50], [-10, -10, -10]),
            density: 800,
            movement: Some(Movement::powder()),
            thermal: Some(ThermalDecl {
                upper: becomes(1000, "lava"),
                ..Default::default()
            }),
            ..Default::default()
        });

        catalog.declare(MaterialDecl {
            name: "ice".to_string(),
            color: ColorSpec::varied([200, 200, 255], [-20, -20, -20]),
            density: 1,
            movement: Some(Movement::powder()),
            thermal: Some(ThermalDecl {
                base_heat: -40,
                upper: becomes(10, "water"),
                ..Default::default()
            }),
            ..Default::default()
        });

        catalog.declare(MaterialDecl {
            name: "ash".to_string(),
            color: ColorSpec::varied([140, 140, 140], [-20, -20, -20]),
            density: 1,
            movement: Some(Movement::powder()),
            thermal: Some(ThermalDecl {
                base_heat: 100,
                ..Default::default()
            }),
            ..Default::default()
        });

        catalog.declare(MaterialDecl {
            name: "gunpowder".to_string(),
            color: ColorSpec::varied([40, 40, 40], [-20, -20, -20]),
            density: 4,
            movement: Some(Movement::powder()),
            thermal: Some(ThermalDecl {
                upper: becomes(500, "explosion"),
                ..Default::default()
            }),
            ..Default::default()
        });

        // LIQUIDS

        catalog.declare(MaterialDecl {
            name: "water".to_string(),
            color: ColorSpec::varied([0, 0, 155], [0, 0, 100]),
            density: 2,
            movement: Some(Movement::liquid()),
            thermal: Some(ThermalDecl {
                upper: becomes(100, "vapor"),
                lower: becomes(0, "ice"),
                ..Default::default()
            }),
            ..Default::default()
        });

        catalog.declare(MaterialDecl {
            name: "oil".to_string(),
            color: ColorSpec::varied([193, 193, 69], [-20, -20, -10]),
            density: 1,
            movement: Some(Movement::liquid()),
            thermal: Some(ThermalDecl {
                upper: becomes(300, "fire"),
                ..Default::default()
            }),
            ..Default::default()
        });

        catalog.declare(MaterialDecl {
            name: "lava".to_string(),
            color: ColorSpec::varied([255, 0, 0], [-20, 0, 0]),
            density: 1000,
            movement: Some(Movement::liquid()),
            thermal: Some(ThermalDecl {
                base_heat: 10_000,
                transfer_coefficient: 0.1,
                lower: becomes(500, "rock"),
                ..Default::default()
            }),
            ..Default::default()
        });

        // Boils off as soon as anything warms it to zero
        catalog.declare(MaterialDecl {
            name: "liquid_nitrogen".to_string(),
            color: ColorSpec::fixed([255, 255, 255]),
            density: 0,
            movement: Some(Movement::liquid()),
            thermal: Some(ThermalDecl {
                base_heat: -10_000,
                upper: vanish(0),
                ..Default::default()
            }),
            ..Default::default()
        });

        // GASES

        catalog.declare(MaterialDecl {
            name: "vapor".to_string(),
            color: ColorSpec::varied([255, 255, 255], [-20, -20, -20]),
            density: 0,
            movement: Some(Movement::gas()),
            thermal: Some(ThermalDecl {
                base_heat: 220,
                heat_variation: 120,
                passive_heat_delta: -1,
                lower: becomes(60, "water"),
                ..Default::default()
            }),
            ..Default::default()
        });

        catalog.declare(MaterialDecl {
            name: "smoke".to_string(),
            color: ColorSpec::varied([50, 50, 50], [-20, -20, -20]),
            density: 0,
            movement: Some(Movement::gas()),
            thermal: Some(ThermalDecl {
                base_heat: 300,
                heat_variation: 120,
                passive_heat_delta: -1,
                lower: vanish(100),
                ..Default::default()
            }),
            ..Default::default()
        });

        // REACTIVE

        catalog.declare(MaterialDecl {
            name: "fire".to_string(),
            color: ColorSpec::varied([242, 141, 0], [-20, -20, 0]),
            density: -2,
            behavior: Some(BehaviorDecl::Igniter {
                lifetime: 180,
                lifetime_variation: 180,
                heat_injection: 100,
                burn_cost: 50,
            }),
            ..Default::default()
        });

        catalog.declare(MaterialDecl {
            name: "grey_goo".to_string(),
            color: ColorSpec::fixed([180, 180, 180]),
            density: 0,
            behavior: Some(BehaviorDecl::Contagion),
            ..Default::default()
        });

        catalog.declare(MaterialDecl {
            name: "acid".to_string(),
            color: ColorSpec::varied([0, 235, 0], [0, 20, 0]),
            density: 0,
            movement: Some(Movement::liquid()),
            thermal: Some(ThermalDecl::default()),
            behavior: Some(BehaviorDecl::Corrosive { chance: 20 }),
            ..Default::default()
        });

        catalog.declare(MaterialDecl {
            name: "explosion".to_string(),
            color: ColorSpec::fixed([255, 255, 0]),
            density: 10_000,
            thermal: Some(ThermalDecl {
                base_heat: 2000,
                ..Default::default()
            }),
            behavior: Some(BehaviorDecl::Explosive {
                range: 10,
                delay: 2,
                residue: Some("smoke".to_string()),
            }),
            ..Default::default()
        });

        catalog
    }
}
