use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    /// Integer code of the order (aromatic is `4`).
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Single => 1,
            Self::Double => 2,
            Self::Triple => 3,
            Self::Aromatic => 4,
        }
    }

    pub fn from_u8(order: u8) -> Option<Self> {
        match order {
            1 => Some(Self::Single),
            2 => Some(Self::Double),
            3 => Some(Self::Triple),
            4 => Some(Self::Aromatic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bond {
    pub order: BondOrder,
}

impl Bond {
    pub fn new(order: BondOrder) -> Self {
        Self { order }
    }
}

/// Paired bond state of a condensed reaction graph edge (the sp_bond).
///
/// `reactant` is the order before the reaction, `product` after it. `None`
/// means no bond on that side. An edge with both slots empty is not a valid
/// reaction graph edge.
///
/// # Examples
///
/// ```
/// use cgrcrab::{BondOrder, DynBond};
///
/// let leaving = DynBond::broken(BondOrder::Single);
/// assert_eq!(leaving.reactant, Some(BondOrder::Single));
/// assert_eq!(leaving.product, None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DynBond {
    pub reactant: Option<BondOrder>,
    pub product: Option<BondOrder>,
}

impl DynBond {
    pub fn new(reactant: Option<BondOrder>, product: Option<BondOrder>) -> Self {
        Self { reactant, product }
    }

    pub fn unchanged(order: BondOrder) -> Self {
        Self::new(Some(order), Some(order))
    }

    pub fn broken(order: BondOrder) -> Self {
        Self::new(Some(order), None)
    }

    pub fn formed(order: BondOrder) -> Self {
        Self::new(None, Some(order))
    }

    pub fn is_empty(&self) -> bool {
        self.reactant.is_none() && self.product.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_codes() {
        for order in [
            BondOrder::Single,
            BondOrder::Double,
            BondOrder::Triple,
            BondOrder::Aromatic,
        ] {
            assert_eq!(BondOrder::from_u8(order.as_u8()), Some(order));
        }
        assert_eq!(BondOrder::from_u8(0), None);
    }

    #[test]
    fn dyn_bond_constructors() {
        assert_eq!(
            DynBond::formed(BondOrder::Double),
            DynBond::new(None, Some(BondOrder::Double))
        );
        assert!(DynBond::default().is_empty());
        assert!(!DynBond::unchanged(BondOrder::Single).is_empty());
    }
}
