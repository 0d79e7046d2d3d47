//! Chemical component database: Antoine coefficients, critical constants and
//! default binary interaction parameters.

use crate::antoine::AntoineParams;
use crate::eos::CriticalProps;
use crate::error::FluidError;
use serde::{Deserialize, Serialize};

/// Components available to the vapor-pressure, EOS and mixture calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    /// Water (H₂O)
    Water,
    /// Ethanol (C₂H₅OH)
    Ethanol,
    /// Methane (CH₄)
    Methane,
    /// Benzene (C₆H₆)
    Benzene,
}

/// Static per-component reference record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentData {
    pub name: &'static str,
    pub formula: &'static str,
    pub antoine: AntoineParams,
    /// Critical pressure [kPa]
    pub pc_kpa: f64,
    /// Critical temperature [K]
    pub tc_k: f64,
    /// Acentric factor
    pub omega: f64,
}

impl ComponentData {
    pub fn critical(&self) -> CriticalProps {
        CriticalProps {
            pc_kpa: self.pc_kpa,
            tc_k: self.tc_k,
            omega: self.omega,
        }
    }
}

const WATER: ComponentData = ComponentData {
    name: "Water",
    formula: "H2O",
    antoine: AntoineParams {
        a: 8.07131,
        b: 1730.63,
        c: 233.426,
        t_min: 1.0,
        t_max: 100.0,
    },
    pc_kpa: 22060.0,
    tc_k: 647.1,
    omega: 0.344,
};

const ETHANOL: ComponentData = ComponentData {
    name: "Ethanol",
    formula: "C2H5OH",
    antoine: AntoineParams {
        a: 8.20417,
        b: 1642.89,
        c: 230.3,
        t_min: -57.0,
        t_max: 80.0,
    },
    pc_kpa: 6148.0,
    tc_k: 513.9,
    omega: 0.645,
};

const METHANE: ComponentData = ComponentData {
    name: "Methane",
    formula: "CH4",
    antoine: AntoineParams {
        a: 6.61184,
        b: 389.93,
        c: 266.0,
        t_min: -180.0,
        t_max: -150.0,
    },
    pc_kpa: 4599.0,
    tc_k: 190.6,
    omega: 0.011,
};

const BENZENE: ComponentData = ComponentData {
    name: "Benzene",
    formula: "C6H6",
    antoine: AntoineParams {
        a: 6.90565,
        b: 1211.033,
        c: 220.79,
        t_min: 8.0,
        t_max: 80.0,
    },
    pc_kpa: 4895.0,
    tc_k: 562.2,
    omega: 0.211,
};

/// Margules A used when a pair has no tabulated value.
pub const DEFAULT_MARGULES: f64 = 0.5;

/// Tabulated one-parameter Margules coefficients (symmetric).
const INTERACTIONS: [(Component, Component, f64); 3] = [
    (Component::Ethanol, Component::Water, 1.2),
    (Component::Ethanol, Component::Benzene, 1.8),
    (Component::Water, Component::Benzene, 3.2),
];

impl Component {
    pub const ALL: [Component; 4] = [
        Component::Water,
        Component::Ethanol,
        Component::Methane,
        Component::Benzene,
    ];

    pub fn data(&self) -> &'static ComponentData {
        match self {
            Component::Water => &WATER,
            Component::Ethanol => &ETHANOL,
            Component::Methane => &METHANE,
            Component::Benzene => &BENZENE,
        }
    }

    pub fn key(&self) -> &'static str {
        self.data().name
    }

    pub fn formula(&self) -> &'static str {
        self.data().formula
    }
}

impl std::str::FromStr for Component {
    type Err = FluidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "WATER" | "H2O" => Ok(Component::Water),
            "ETHANOL" | "C2H5OH" | "ETOH" => Ok(Component::Ethanol),
            "METHANE" | "CH4" => Ok(Component::Methane),
            "BENZENE" | "C6H6" => Ok(Component::Benzene),
            _ => Err(FluidError::UnknownComponent {
                name: s.trim().to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Seed value for the Margules coefficient of a binary pair.
///
/// Identical components do not interact; untabulated pairs get
/// [`DEFAULT_MARGULES`]. The caller owns the value afterwards.
pub fn default_margules(a: Component, b: Component) -> f64 {
    if a == b {
        return 0.0;
    }
    INTERACTIONS
        .iter()
        .find(|(i, j, _)| (*i == a && *j == b) || (*i == b && *j == a))
        .map(|(_, _, coeff)| *coeff)
        .unwrap_or(DEFAULT_MARGULES)
}
