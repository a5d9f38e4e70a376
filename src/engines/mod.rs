mod quicklife;
mod sparse;

pub use quicklife::QuickLifeEngine;
pub use sparse::SparseEngine;

/// State stored for a cell born with `neighbors` alive neighbours.
#[inline]
pub(crate) const fn birth_state(neighbors: u8) -> u8 {
    neighbors + 1
}

/// State stored for a cell that survived with `neighbors` alive neighbours.
#[inline]
pub(crate) const fn survival_state(neighbors: u8) -> u8 {
    neighbors + 10
}

/// How an alive cell got its state, decoded from the value engines store.
///
/// Intended for renderers that colour births and survivals differently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellOrigin {
    /// Born in the last step with the given number of neighbours.
    Born(u8),
    /// Survived the last step with the given number of neighbours.
    Survived(u8),
    /// Written directly, e.g. loaded from a pattern file.
    Placed,
}

impl CellOrigin {
    /// Decodes a stored state; `None` for dead cells.
    pub fn from_state(state: u8) -> Option<Self> {
        match state {
            0 => None,
            // 1 is both "born with 0 neighbours" and the state codecs assign;
            // only B0 rules can produce the former.
            1 => Some(CellOrigin::Placed),
            2..=9 => Some(CellOrigin::Born(state - 1)),
            10..=18 => Some(CellOrigin::Survived(state - 10)),
            _ => Some(CellOrigin::Placed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_origin() {
        assert_eq!(CellOrigin::from_state(0), None);
        assert_eq!(CellOrigin::from_state(1), Some(CellOrigin::Placed));
        assert_eq!(CellOrigin::from_state(birth_state(3)), Some(CellOrigin::Born(3)));
        assert_eq!(
            CellOrigin::from_state(survival_state(0)),
            Some(CellOrigin::Survived(0))
        );
        assert_eq!(
            CellOrigin::from_state(survival_state(8)),
            Some(CellOrigin::Survived(8))
        );
        assert_eq!(CellOrigin::from_state(200), Some(CellOrigin::Placed));
    }
}
