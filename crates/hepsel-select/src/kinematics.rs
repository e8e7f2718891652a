//! Derived kinematic quantities.
//!
//! All functions are pure over borrowed collections. Degenerate inputs
//! produce the [`MT2_SENTINEL`] where a quantity is undefined; nothing here
//! returns an error.

use std::f64::consts::FRAC_PI_2;

use hepsel_core::{Kinematic, LorentzVector, Met};

use crate::mt2::Mt2Solver;

/// Returned by [`mt2`] when fewer than two leptons are supplied.
pub const MT2_SENTINEL: f64 = -999.0;

/// Jets above this pT (GeV) enter [`meff`].
pub const MEFF_JET_PT: f64 = 40.0;

/// Invariant mass of a pair.
pub fn mll<A: Kinematic, B: Kinematic>(a: &A, b: &B) -> f64 {
    (*a.p4() + *b.p4()).m()
}

/// Invariant mass of a triplet.
pub fn mlll<A: Kinematic, B: Kinematic, C: Kinematic>(a: &A, b: &B, c: &C) -> f64 {
    (*a.p4() + *b.p4() + *c.p4()).m()
}

/// Transverse mass of a lepton and the missing energy,
/// `sqrt(2 pT MET (1 - cos Δφ))`.
pub fn mt<L: Kinematic>(lepton: &L, met: &Met) -> f64 {
    let dphi = lepton.p4().delta_phi(&met.lv());
    (2.0 * lepton.pt() * met.et * (1.0 - dphi.cos())).sqrt()
}

/// Effective mass: scalar lepton pT sum, plus jets above [`MEFF_JET_PT`],
/// plus MET.
pub fn meff<L: Kinematic, J: Kinematic>(leptons: &[L], jets: &[J], met: &Met) -> f64 {
    let lep: f64 = leptons.iter().map(Kinematic::pt).sum();
    let jet: f64 = jets
        .iter()
        .map(Kinematic::pt)
        .filter(|&pt| pt > MEFF_JET_PT)
        .sum();
    lep + jet + met.et
}

/// Relative missing energy: `MET · sin(Δφ_min)`.
///
/// `Δφ_min` is the smallest `|Δφ|` between the missing energy and any
/// lepton or any jet with pT at or above `min_jet_pt`, capped at π/2 so that
/// well-separated events keep the full MET.
pub fn met_rel<L: Kinematic, J: Kinematic>(
    met: &Met,
    leptons: &[L],
    jets: &[J],
    min_jet_pt: f64,
) -> f64 {
    let met_lv = met.lv();
    let dphi_to = |v: &LorentzVector| met_lv.delta_phi(v).abs();
    let lep_min = leptons.iter().map(|l| dphi_to(l.p4()));
    let jet_min = jets
        .iter()
        .filter(|j| j.pt() >= min_jet_pt)
        .map(|j| dphi_to(j.p4()));
    let dphi = lep_min.chain(jet_min).fold(FRAC_PI_2, f64::min);
    met_lv.et() * dphi.sin()
}

/// Contransverse mass, `sqrt(|(mT1 + mT2)² − |pT1 − pT2|²|)`.
///
/// `mTi` is the signed transverse mass of each four-vector. A negative
/// argument is reflected rather than clamped.
pub fn mct(v1: &LorentzVector, v2: &LorentzVector) -> f64 {
    let sum_mt = v1.mt() + v2.mt();
    let x = sum_mt * sum_mt - (*v1 - *v2).perp2();
    if x >= 0.0 {
        x.sqrt()
    } else {
        (-x).sqrt()
    }
}

/// Stransverse mass of the two leading leptons with massless invisible
/// particles.
///
/// Returns [`MT2_SENTINEL`] for fewer than two leptons.
pub fn mt2<L: Kinematic>(leptons: &[L], met: &Met) -> f64 {
    let [l0, l1, ..] = leptons else {
        return MT2_SENTINEL;
    };
    Mt2Solver::new(0.0).solve(l0.p4().transverse(), l1.p4().transverse(), met.vector())
}
