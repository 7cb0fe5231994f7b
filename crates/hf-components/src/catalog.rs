//! Pipe materials and minor-loss fittings, keyed by identifier.
//!
//! Both catalogs start from a built-in table and may be extended or
//! overridden at the configuration boundary. Looking up a name that is not
//! present is an error; there is no fallback entry.

use crate::error::{ComponentError, ComponentResult};
use crate::friction::FrictionLaw;
use hf_core::units::{KinVisc, m};

/// Which major-loss law a pipe uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FrictionModel {
    #[default]
    HazenWilliams,
    DarcyWeisbach,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub id: String,
    pub display_name: String,
    /// Hazen-Williams roughness coefficient C
    pub hazen_williams_c: f64,
    /// Absolute roughness (m)
    pub roughness_m: f64,
}

impl Material {
    /// Friction law for a pipe of this material.
    pub fn friction_law(
        &self,
        model: FrictionModel,
        kinematic_viscosity: KinVisc,
    ) -> ComponentResult<FrictionLaw> {
        match model {
            FrictionModel::HazenWilliams => FrictionLaw::hazen_williams(self.hazen_williams_c),
            FrictionModel::DarcyWeisbach => {
                FrictionLaw::darcy_weisbach(m(self.roughness_m), kinematic_viscosity)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fitting {
    pub id: String,
    pub display_name: String,
    /// Minor-loss coefficient K (multiplies velocity head)
    pub k: f64,
}

struct BuiltinMaterial {
    id: &'static str,
    display_name: &'static str,
    aliases: &'static [&'static str],
    hazen_williams_c: f64,
    roughness_m: f64,
}

struct BuiltinFitting {
    id: &'static str,
    display_name: &'static str,
    aliases: &'static [&'static str],
    k: f64,
}

const BUILTIN_MATERIALS: [BuiltinMaterial; 7] = [
    BuiltinMaterial {
        id: "pvc",
        display_name: "PVC",
        aliases: &["cpvc"],
        hazen_williams_c: 150.0,
        roughness_m: 1.5e-6,
    },
    BuiltinMaterial {
        id: "hdpe",
        display_name: "HDPE",
        aliases: &["polyethylene", "pe"],
        hazen_williams_c: 150.0,
        roughness_m: 7.0e-6,
    },
    BuiltinMaterial {
        id: "copper",
        display_name: "Copper",
        aliases: &["drawn tubing"],
        hazen_williams_c: 140.0,
        roughness_m: 1.5e-6,
    },
    BuiltinMaterial {
        id: "steel",
        display_name: "Commercial steel",
        aliases: &["commercial steel", "carbon steel"],
        hazen_williams_c: 120.0,
        roughness_m: 4.5e-5,
    },
    BuiltinMaterial {
        id: "galvanized_steel",
        display_name: "Galvanized steel",
        aliases: &["galvanized"],
        hazen_williams_c: 120.0,
        roughness_m: 1.5e-4,
    },
    BuiltinMaterial {
        id: "cast_iron",
        display_name: "Cast iron",
        aliases: &["iron"],
        hazen_williams_c: 100.0,
        roughness_m: 2.6e-4,
    },
    BuiltinMaterial {
        id: "concrete",
        display_name: "Concrete",
        aliases: &[],
        hazen_williams_c: 130.0,
        roughness_m: 1.0e-3,
    },
];

const BUILTIN_FITTINGS: [BuiltinFitting; 14] = [
    BuiltinFitting {
        id: "none",
        display_name: "No fitting",
        aliases: &[],
        k: 0.0,
    },
    BuiltinFitting {
        id: "exit",
        display_name: "Pipe exit",
        aliases: &["outlet", "discharge"],
        k: 1.0,
    },
    BuiltinFitting {
        id: "entrance_sharp",
        display_name: "Sharp-edged entrance",
        aliases: &["entrance"],
        k: 0.5,
    },
    BuiltinFitting {
        id: "entrance_rounded",
        display_name: "Well-rounded entrance",
        aliases: &["bellmouth"],
        k: 0.04,
    },
    BuiltinFitting {
        id: "entrance_reentrant",
        display_name: "Re-entrant entrance",
        aliases: &["inward projecting"],
        k: 0.8,
    },
    BuiltinFitting {
        id: "elbow_90",
        display_name: "90° elbow, flanged",
        aliases: &["elbow"],
        k: 0.3,
    },
    BuiltinFitting {
        id: "elbow_90_threaded",
        display_name: "90° elbow, threaded",
        aliases: &[],
        k: 1.5,
    },
    BuiltinFitting {
        id: "elbow_45",
        display_name: "45° elbow",
        aliases: &[],
        k: 0.2,
    },
    BuiltinFitting {
        id: "tee_line",
        display_name: "Tee, line flow",
        aliases: &["tee"],
        k: 0.2,
    },
    BuiltinFitting {
        id: "tee_branch",
        display_name: "Tee, branch flow",
        aliases: &[],
        k: 1.0,
    },
    BuiltinFitting {
        id: "gate_valve",
        display_name: "Gate valve, fully open",
        aliases: &[],
        k: 0.15,
    },
    BuiltinFitting {
        id: "ball_valve",
        display_name: "Ball valve, fully open",
        aliases: &[],
        k: 0.05,
    },
    BuiltinFitting {
        id: "globe_valve",
        display_name: "Globe valve, fully open",
        aliases: &[],
        k: 10.0,
    },
    BuiltinFitting {
        id: "check_valve",
        display_name: "Swing check valve",
        aliases: &["check"],
        k: 2.0,
    },
];

fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

/// Exact identifiers win over aliases, so an entry inserted under a name
/// that is also a built-in alias shadows the alias.
fn lookup<'a, T>(
    entries: &'a [T],
    aliases: &[(String, String)],
    name: &str,
    id: impl Fn(&T) -> &str,
) -> Option<&'a T> {
    let key = normalize(name);
    entries.iter().find(|e| id(e) == key).or_else(|| {
        let target = aliases.iter().find(|(alias, _)| *alias == key)?.1.as_str();
        entries.iter().find(|e| id(e) == target)
    })
}

/// Lookup table from material identifier to its roughness data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialCatalog {
    entries: Vec<Material>,
    aliases: Vec<(String, String)>,
}

impl MaterialCatalog {
    /// Catalog with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Catalog of common pipe materials.
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        for b in &BUILTIN_MATERIALS {
            catalog.insert(Material {
                id: b.id.to_string(),
                display_name: b.display_name.to_string(),
                hazen_williams_c: b.hazen_williams_c,
                roughness_m: b.roughness_m,
            });
            catalog
                .aliases
                .extend(b.aliases.iter().map(|a| (normalize(a), b.id.to_string())));
        }
        catalog
    }

    /// Add a material, replacing any entry with the same identifier.
    pub fn insert(&mut self, material: Material) {
        let id = normalize(&material.id);
        let material = Material { id, ..material };
        match self.entries.iter_mut().find(|e| e.id == material.id) {
            Some(existing) => *existing = material,
            None => self.entries.push(material),
        }
    }

    /// Look up a material by identifier or alias (case-insensitive).
    pub fn get(&self, name: &str) -> ComponentResult<&Material> {
        lookup(&self.entries, &self.aliases, name, |e| e.id.as_str())
            .ok_or_else(|| ComponentError::UnknownMaterial {
                name: name.to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.entries.iter()
    }
}

/// Lookup table from fitting identifier to its minor-loss coefficient.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FittingCatalog {
    entries: Vec<Fitting>,
    aliases: Vec<(String, String)>,
}

impl FittingCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Catalog of common fittings with textbook K values.
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        for b in &BUILTIN_FITTINGS {
            catalog.insert(Fitting {
                id: b.id.to_string(),
                display_name: b.display_name.to_string(),
                k: b.k,
            });
            catalog
                .aliases
                .extend(b.aliases.iter().map(|a| (normalize(a), b.id.to_string())));
        }
        catalog
    }

    /// Add a fitting, replacing any entry with the same identifier.
    pub fn insert(&mut self, fitting: Fitting) {
        let id = normalize(&fitting.id);
        let fitting = Fitting { id, ..fitting };
        match self.entries.iter_mut().find(|e| e.id == fitting.id) {
            Some(existing) => *existing = fitting,
            None => self.entries.push(fitting),
        }
    }

    pub fn get(&self, name: &str) -> ComponentResult<&Fitting> {
        lookup(&self.entries, &self.aliases, name, |e| e.id.as_str())
            .ok_or_else(|| ComponentError::UnknownComponent {
                name: name.to_string(),
            })
    }

    /// Minor-loss coefficient of the named fitting.
    pub fn k(&self, name: &str) -> ComponentResult<f64> {
        self.get(name).map(|f| f.k)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fitting> {
        self.entries.iter()
    }
}
