//! Geometric overlap removal.
//!
//! Each stage compares two collections by angular distance and removes
//! members according to an asymmetric rule for that pair of object types.
//! Collections are scanned from the end toward the start; a pair overlaps
//! when its ΔR is at or below the stage threshold.
//!
//! Stages only change collection membership. The stored records are never
//! touched, so the routines are generic over anything [`Kinematic`]:
//! `ObjRef` views in the pipeline, plain references in tests.

use hepsel_core::{Kinematic, Lepton};

use crate::config::OverlapConfig;
use crate::kinematics::mll;
use crate::pairing::is_sfos;

fn overlaps<A: Kinematic, B: Kinematic>(a: &A, b: &B, min_dr: f64) -> bool {
    a.delta_r(b) <= min_dr
}

/// Remove every member of `targets` that overlaps any member of `others`.
fn remove_near<A: Kinematic, B: Kinematic>(
    targets: &mut Vec<A>,
    others: &[B],
    min_dr: f64,
    stage: &'static str,
) {
    if targets.is_empty() || others.is_empty() {
        return;
    }
    targets.retain(|t| {
        let hit = others.iter().any(|o| overlaps(t, o, min_dr));
        if hit {
            tracing::trace!(stage, pt = t.pt(), eta = t.eta(), "overlap removed");
        }
        !hit
    });
}

/// Applies the overlap stages with one set of thresholds.
#[derive(Clone, Debug, Default)]
pub struct OverlapRemover {
    config: OverlapConfig,
}

impl OverlapRemover {
    /// Remover with the given thresholds.
    pub fn new(config: OverlapConfig) -> Self {
        Self { config }
    }

    /// The thresholds in use.
    pub fn config(&self) -> &OverlapConfig {
        &self.config
    }

    /// Electron–electron: of a close pair keep the higher-pT electron.
    ///
    /// The later electron is removed only when its pT is strictly below the
    /// earlier one's; on a tie the earlier one goes. Repeats until no close
    /// pair remains among the survivors.
    pub fn e_e<E: Kinematic>(&self, electrons: &mut Vec<E>) {
        let min_dr = self.config.e_e;
        if electrons.len() < 2 {
            return;
        }
        let mut i = electrons.len();
        while i > 0 {
            i -= 1;
            let mut j = i;
            while j > 0 {
                j -= 1;
                if !overlaps(&electrons[i], &electrons[j], min_dr) {
                    continue;
                }
                if electrons[i].pt() < electrons[j].pt() {
                    tracing::trace!(stage = "e_e", pt = electrons[i].pt(), "overlap removed");
                    electrons.remove(i);
                    break;
                }
                tracing::trace!(stage = "e_e", pt = electrons[j].pt(), "overlap removed");
                electrons.remove(j);
                // The outer electron shifted down into the freed slot.
                i -= 1;
            }
        }
    }

    /// Remove every jet close to a surviving electron.
    pub fn j_e<J: Kinematic, E: Kinematic>(&self, jets: &mut Vec<J>, electrons: &[E]) {
        remove_near(jets, electrons, self.config.j_e, "j_e");
    }

    /// Remove every electron close to a surviving jet.
    pub fn e_j<E: Kinematic, J: Kinematic>(&self, electrons: &mut Vec<E>, jets: &[J]) {
        remove_near(electrons, jets, self.config.e_j, "e_j");
    }

    /// Remove every muon close to a surviving jet.
    pub fn m_j<M: Kinematic, J: Kinematic>(&self, muons: &mut Vec<M>, jets: &[J]) {
        remove_near(muons, jets, self.config.m_j, "m_j");
    }

    /// Electron–muon: a close pair is removed together.
    ///
    /// Each electron is paired with at most one muon, the last close one in
    /// collection order.
    pub fn e_m<E: Kinematic, M: Kinematic>(&self, electrons: &mut Vec<E>, muons: &mut Vec<M>) {
        let min_dr = self.config.e_m;
        if electrons.is_empty() || muons.is_empty() {
            return;
        }
        let mut ie = electrons.len();
        while ie > 0 {
            ie -= 1;
            let hit = (0..muons.len())
                .rev()
                .find(|&im| overlaps(&electrons[ie], &muons[im], min_dr));
            if let Some(im) = hit {
                tracing::trace!(
                    stage = "e_m",
                    e_pt = electrons[ie].pt(),
                    m_pt = muons[im].pt(),
                    "overlap removed"
                );
                electrons.remove(ie);
                muons.remove(im);
            }
        }
    }

    /// Muon–muon: a close pair is removed together.
    pub fn m_m<M: Kinematic>(&self, muons: &mut Vec<M>) {
        let min_dr = self.config.m_m;
        if muons.len() < 2 {
            return;
        }
        let mut i = muons.len();
        while i > 0 {
            i -= 1;
            let hit = (0..i).rev().find(|&j| overlaps(&muons[i], &muons[j], min_dr));
            if let Some(j) = hit {
                tracing::trace!(
                    stage = "m_m",
                    pt1 = muons[i].pt(),
                    pt2 = muons[j].pt(),
                    "overlap removed"
                );
                muons.remove(i);
                muons.remove(j);
                // Everything between j and i moved down one slot.
                i -= 1;
            }
        }
    }

    /// Remove every tau close to a surviving electron.
    pub fn t_e<T: Kinematic, E: Kinematic>(&self, taus: &mut Vec<T>, electrons: &[E]) {
        remove_near(taus, electrons, self.config.t_e, "t_e");
    }

    /// Remove every tau close to a surviving muon.
    pub fn t_m<T: Kinematic, M: Kinematic>(&self, taus: &mut Vec<T>, muons: &[M]) {
        remove_near(taus, muons, self.config.t_m, "t_m");
    }

    /// Remove every jet close to a surviving tau.
    pub fn j_t<J: Kinematic, T: Kinematic>(&self, jets: &mut Vec<J>, taus: &[T]) {
        remove_near(jets, taus, self.config.j_t, "j_t");
    }

    /// The six light-lepton stages in their fixed order:
    /// e–e, j–e, e–j, m–j, e–m, m–m.
    pub fn perform_overlap<E, M, J>(
        &self,
        electrons: &mut Vec<E>,
        muons: &mut Vec<M>,
        jets: &mut Vec<J>,
    ) where
        E: Kinematic,
        M: Kinematic,
        J: Kinematic,
    {
        self.e_e(electrons);
        self.j_e(jets, electrons);
        self.e_j(electrons, jets);
        self.m_j(muons, jets);
        self.e_m(electrons, muons);
        self.m_m(muons);
    }

    /// The tau stages, run after [`perform_overlap`](Self::perform_overlap):
    /// t–e, t–m, j–t.
    pub fn perform_tau_overlap<E, M, T, J>(
        &self,
        electrons: &[E],
        muons: &[M],
        taus: &mut Vec<T>,
        jets: &mut Vec<J>,
    ) where
        E: Kinematic,
        M: Kinematic,
        T: Kinematic,
        J: Kinematic,
    {
        self.t_e(taus, electrons);
        self.t_m(taus, muons);
        self.j_t(jets, taus);
    }
}

/// Low-mass SFOS veto.
///
/// Removes every lepton that forms a same-flavour opposite-sign pair with
/// invariant mass below `mll_min` with any other member of the input. All
/// decisions are made against the input collection, so both members of a
/// low-mass pair go even when one of them also pairs elsewhere.
pub fn remove_sfos_pairs<L: Lepton>(leptons: &mut Vec<L>, mll_min: f64) {
    let n = leptons.len();
    if n < 2 {
        return;
    }
    let keep: Vec<bool> = (0..n)
        .map(|i| {
            !(0..n).any(|j| {
                i != j && is_sfos(&leptons[i], &leptons[j]) && mll(&leptons[i], &leptons[j]) < mll_min
            })
        })
        .collect();
    let mut flags = keep.iter();
    leptons.retain(|l| {
        let kept = flags.next().copied().unwrap_or(true);
        if !kept {
            tracing::trace!(pt = l.pt(), flavor = %l.flavor(), "low-mass SFOS removed");
        }
        kept
    });
}
