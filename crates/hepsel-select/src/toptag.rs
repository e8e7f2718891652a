//! Dilepton top-quark veto.
//!
//! An event is "top-like" when the two leading leptons and the missing
//! energy are consistent with a W decay and some pair among the leading
//! jets can complete two leptonic top decays. [`pass_top_tag`] returns
//! `true` for events that do **not** look like top.

use hepsel_core::{Kinematic, LorentzVector, Met, TransverseVector};
use smallvec::SmallVec;

use crate::kinematics::mct;

/// W boson mass (GeV) in the W-consistency test.
pub const W_MASS: f64 = 80.4;
/// Top quark mass (GeV) in the jet-pair tests.
pub const TOP_MASS: f64 = 172.5;
/// Upper bound (GeV) on each lepton–jet invariant mass.
pub const MLJ_CUT: f64 = 155.0;
/// Upper bound (GeV) on the jet-pair contransverse mass, before boost
/// correction.
pub const MCT_JJ_CUT: f64 = 137.0;
/// Jets considered for pairing.
pub const MAX_TAG_JETS: usize = 3;

/// Which jet pairs the veto examines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TopTagMode {
    /// Every pair among the leading jets, with the effective-mass cut and
    /// all three pair stages.
    #[default]
    AllPairs,
    /// Only pairs containing the leading jet, jet-pair mct stage only.
    LeadingJetPairs,
}

/// Default subleading-jet pT threshold (GeV).
pub const DEFAULT_TOP_TAG_JET_PT: f64 = 30.0;
/// Default effective-mass threshold (GeV).
pub const DEFAULT_TOP_TAG_MEFF: f64 = 100.0;

/// `true` when the event is **not** top-like.
///
/// Requires two leptons: with fewer the answer is `false`. When the leptons
/// and missing energy fail the W-consistency test, or there are fewer than
/// two jets, the answer is `true`. Otherwise the event is top-like, and the
/// answer `false`, as soon as one jet pair among the first
/// [`MAX_TAG_JETS`] passes the pair test.
pub fn pass_top_tag<L: Kinematic, J: Kinematic>(
    leptons: &[L],
    jets: &[J],
    met: &Met,
    mode: TopTagMode,
    pt_jet_cut: f64,
    meff_cut: f64,
) -> bool {
    let [l1, l2, ..] = leptons else {
        return false;
    };
    let (l1, l2) = (*l1.p4(), *l2.p4());
    let met = met.vector();

    if !w_consistent(&l1, &l2, &met) {
        return true;
    }
    if jets.len() < 2 {
        return true;
    }

    let n = jets.len().min(MAX_TAG_JETS);
    let pairs: SmallVec<[(usize, usize); 3]> = (0..n - 1)
        .filter(|&i| i == 0 || mode == TopTagMode::AllPairs)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .collect();

    let top_like = pairs.iter().any(|&(i, j)| {
        let pair = JetPair {
            j1: *jets[i].p4(),
            j2: *jets[j].p4(),
        };
        pair.is_top_like(&l1, &l2, &met, mode, pt_jet_cut, meff_cut)
    });
    if top_like {
        tracing::trace!(?mode, "event is top-like");
    }
    !top_like
}

/// The two leptons plus missing energy are consistent with a W:
/// `mct(ℓ1, ℓ2) < m_W (r + sqrt(1 + r²))`, `r = |pT(ℓ1 + ℓ2) + MET| / 2 m_W`.
fn w_consistent(l1: &LorentzVector, l2: &LorentzVector, met: &TransverseVector) -> bool {
    let upstream = l1.transverse() + l2.transverse() + *met;
    let rr = upstream.mag() / (2.0 * W_MASS);
    mct(l1, l2) < W_MASS * boost_factor(rr)
}

fn boost_factor(rr: f64) -> f64 {
    rr + (1.0 + rr * rr).sqrt()
}

struct JetPair {
    j1: LorentzVector,
    j2: LorentzVector,
}

impl JetPair {
    fn is_top_like(
        &self,
        l1: &LorentzVector,
        l2: &LorentzVector,
        met: &TransverseVector,
        mode: TopTagMode,
        pt_jet_cut: f64,
        meff_cut: f64,
    ) -> bool {
        if self.j2.pt() < pt_jet_cut {
            return false;
        }
        let meff_top = self.j1.pt() + self.j2.pt() + l1.pt() + l2.pt();
        if mode == TopTagMode::AllPairs && meff_top < meff_cut {
            return false;
        }

        // Stage 1: jet-pair mct against the boost-corrected bound.
        let upstream =
            self.j1.transverse() + self.j2.transverse() + l1.transverse() + l2.transverse() + *met;
        let factj = boost_factor(upstream.mag() / (2.0 * TOP_MASS));
        let mct_jj_ok = mct(&self.j1, &self.j2) < MCT_JJ_CUT * factj;
        if mode == TopTagMode::LeadingJetPairs {
            return mct_jj_ok;
        }
        if !mct_jj_ok {
            return false;
        }

        // Stage 2: lepton–jet assignments with both masses under the cut.
        let jets = [self.j1, self.j2];
        let assignments: SmallVec<[(usize, usize); 2]> = [(0, 1), (1, 0)]
            .into_iter()
            .filter(|&(i, j)| (*l1 + jets[i]).m() < MLJ_CUT && (*l2 + jets[j]).m() < MLJ_CUT)
            .collect();

        // Stage 3: mct of the two lepton+jet systems.
        assignments.iter().any(|&(i, j)| {
            let v1 = jets[i] + *l1;
            let v2 = jets[j] + *l2;
            let mmax = v1.m().max(v2.m());
            let upper = mmax * mmax / TOP_MASS + TOP_MASS;
            mct(&v1, &v2) < upper * factj
        })
    }
}
