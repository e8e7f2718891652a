//! Lepton-pair predicates, Z-candidate search and b-jet queries.

use hepsel_core::{Jet, Lepton, PairingError};

use crate::kinematics::mll;

/// Nominal Z boson mass in GeV.
pub const Z_MASS: f64 = 91.2;

/// Same lepton flavour.
pub fn is_same_flavor<A: Lepton, B: Lepton>(a: &A, b: &B) -> bool {
    a.flavor() == b.flavor()
}

/// Same flavour, opposite charge.
pub fn is_sfos<A: Lepton, B: Lepton>(a: &A, b: &B) -> bool {
    is_same_flavor(a, b) && a.charge() * b.charge() < 0
}

/// Same flavour, same charge.
pub fn is_sfss<A: Lepton, B: Lepton>(a: &A, b: &B) -> bool {
    is_same_flavor(a, b) && a.charge() * b.charge() > 0
}

/// SFOS with `|mll - m_Z| < window`.
pub fn is_z<A: Lepton, B: Lepton>(a: &A, b: &B, window: f64) -> bool {
    is_sfos(a, b) && (mll(a, b) - Z_MASS).abs() < window
}

/// SFOS with `min < mll < max`.
pub fn is_z_window<A: Lepton, B: Lepton>(a: &A, b: &B, min: f64, max: f64) -> bool {
    if !is_sfos(a, b) {
        return false;
    }
    let m = mll(a, b);
    m > min && m < max
}

fn any_pair<L, F>(leptons: &[L], mut pred: F) -> bool
where
    F: FnMut(&L, &L) -> bool,
{
    leptons
        .iter()
        .enumerate()
        .any(|(i, a)| leptons[i + 1..].iter().any(|b| pred(a, b)))
}

/// Any SFOS pair in the collection.
pub fn has_sfos<L: Lepton>(leptons: &[L]) -> bool {
    any_pair(leptons, |a, b| is_sfos(a, b))
}

/// Any pair passing [`is_z`].
pub fn has_z<L: Lepton>(leptons: &[L], window: f64) -> bool {
    any_pair(leptons, |a, b| is_z(a, b, window))
}

/// Any pair passing [`is_z_window`].
pub fn has_z_window<L: Lepton>(leptons: &[L], min: f64, max: f64) -> bool {
    any_pair(leptons, |a, b| is_z_window(a, b, min, max))
}

/// Indices `(i, j)`, `i < j`, of the SFOS pair with mass closest to the Z.
///
/// Pairs are visited in `(i, j)` lexicographic order and a candidate is only
/// replaced by a strictly closer one, so the first pair wins ties.
pub fn best_z<L: Lepton>(leptons: &[L]) -> Result<(usize, usize), PairingError> {
    let mut best: Option<(usize, usize, f64)> = None;
    for (i, a) in leptons.iter().enumerate() {
        for (j, b) in leptons.iter().enumerate().skip(i + 1) {
            if !is_sfos(a, b) {
                continue;
            }
            let dm = (mll(a, b) - Z_MASS).abs();
            if best.is_none_or(|(_, _, min)| dm < min) {
                best = Some((i, j, dm));
            }
        }
    }
    best.map(|(i, j, _)| (i, j))
        .ok_or(PairingError::NoCandidatePair {
            candidates: leptons.len(),
        })
}

/// MV1 discriminant above the working point.
pub fn is_b_jet(jet: &Jet, working_point: f64) -> bool {
    jet.mv1 > working_point
}

/// Any jet passing [`is_b_jet`].
pub fn has_b_jet<J: std::ops::Deref<Target = Jet>>(jets: &[J], working_point: f64) -> bool {
    jets.iter().any(|j| is_b_jet(j, working_point))
}
