use serde::{Deserialize, Serialize};

use crate::atom::DynAtom;
use crate::bond::DynBond;

/// Which properties must agree when a new component is matched to an R-group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Whole bond pairs and both charges must agree.
    #[default]
    Pair,
    /// Only the product side must agree: product bond order and product charge.
    Product,
}

impl MatchMode {
    pub fn atoms_match(self, target: &DynAtom, query: &DynAtom) -> bool {
        if target.atomic_num != query.atomic_num || target.isotope != query.isotope {
            return false;
        }
        match self {
            Self::Pair => target.charge == query.charge && target.p_charge == query.p_charge,
            Self::Product => target.p_charge == query.p_charge,
        }
    }

    pub fn bonds_match(self, target: &DynBond, query: &DynBond) -> bool {
        match self {
            Self::Pair => target == query,
            Self::Product => target.product == query.product,
        }
    }
}

/// Settings for [`clone_subgraphs_with`](super::clone_subgraphs_with).
///
/// # Examples
///
/// ```
/// use cgrcrab::{CloneOptions, MatchMode};
///
/// let options = CloneOptions::from_json(r#"{"match_mode": "product"}"#).unwrap();
/// assert_eq!(options.match_mode, MatchMode::Product);
/// assert!(options.strict_roles);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloneOptions {
    pub match_mode: MatchMode,
    /// Reject components that are both a leaving group and a substituent.
    /// When false the leaving-group role wins.
    pub strict_roles: bool,
}

impl Default for CloneOptions {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::Pair,
            strict_roles: true,
        }
    }
}

impl CloneOptions {
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
