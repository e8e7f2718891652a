//! Flavour-tagged lepton views.

use hepsel_core::{Electron, Flavor, Kinematic, Lepton, LeptonCommon, LorentzVector, Muon, Tau};
use hepsel_store::ObjRef;

/// A view of any stored lepton, tagged by flavour.
///
/// Merged lepton collections hold `LeptonRef`s so pairing and kinematic
/// routines can treat electrons, muons and taus uniformly through the
/// [`Lepton`] trait, while callers can still recover the concrete record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LeptonRef<'a> {
    /// An electron.
    Electron(ObjRef<'a, Electron>),
    /// A muon.
    Muon(ObjRef<'a, Muon>),
    /// A hadronic tau.
    Tau(ObjRef<'a, Tau>),
}

impl<'a> LeptonRef<'a> {
    /// The electron record, if this is an electron.
    pub fn as_electron(&self) -> Option<&'a Electron> {
        match self {
            Self::Electron(e) => Some(e.get()),
            _ => None,
        }
    }

    /// The muon record, if this is a muon.
    pub fn as_muon(&self) -> Option<&'a Muon> {
        match self {
            Self::Muon(m) => Some(m.get()),
            _ => None,
        }
    }

    /// The tau record, if this is a tau.
    pub fn as_tau(&self) -> Option<&'a Tau> {
        match self {
            Self::Tau(t) => Some(t.get()),
            _ => None,
        }
    }

    /// Position in the stored collection of its flavour.
    pub fn index(&self) -> usize {
        match self {
            Self::Electron(e) => e.index(),
            Self::Muon(m) => m.index(),
            Self::Tau(t) => t.index(),
        }
    }
}

impl Kinematic for LeptonRef<'_> {
    fn p4(&self) -> &LorentzVector {
        match self {
            Self::Electron(e) => e.get().p4(),
            Self::Muon(m) => m.get().p4(),
            Self::Tau(t) => t.get().p4(),
        }
    }
}

impl Lepton for LeptonRef<'_> {
    fn flavor(&self) -> Flavor {
        match self {
            Self::Electron(_) => Flavor::Electron,
            Self::Muon(_) => Flavor::Muon,
            Self::Tau(_) => Flavor::Tau,
        }
    }

    fn common(&self) -> &LeptonCommon {
        match self {
            Self::Electron(e) => &e.get().lepton,
            Self::Muon(m) => &m.get().lepton,
            Self::Tau(t) => &t.get().lepton,
        }
    }
}

impl<'a> From<ObjRef<'a, Electron>> for LeptonRef<'a> {
    fn from(e: ObjRef<'a, Electron>) -> Self {
        Self::Electron(e)
    }
}

impl<'a> From<ObjRef<'a, Muon>> for LeptonRef<'a> {
    fn from(m: ObjRef<'a, Muon>) -> Self {
        Self::Muon(m)
    }
}

impl<'a> From<ObjRef<'a, Tau>> for LeptonRef<'a> {
    fn from(t: ObjRef<'a, Tau>) -> Self {
        Self::Tau(t)
    }
}

/// Merge electrons and muons into one collection ordered by descending pT.
///
/// The sort is stable, so equal-pT leptons keep electrons ahead of muons.
pub fn build_leptons<'a>(
    electrons: &[ObjRef<'a, Electron>],
    muons: &[ObjRef<'a, Muon>],
) -> Vec<LeptonRef<'a>> {
    let mut leptons: Vec<LeptonRef<'a>> = electrons
        .iter()
        .copied()
        .map(LeptonRef::from)
        .chain(muons.iter().copied().map(LeptonRef::from))
        .collect();
    sort_by_pt(&mut leptons);
    leptons
}

/// Like [`build_leptons`], with taus merged in as well.
pub fn build_leptons_with_taus<'a>(
    electrons: &[ObjRef<'a, Electron>],
    muons: &[ObjRef<'a, Muon>],
    taus: &[ObjRef<'a, Tau>],
) -> Vec<LeptonRef<'a>> {
    let mut leptons = build_leptons(electrons, muons);
    leptons.extend(taus.iter().copied().map(LeptonRef::from));
    sort_by_pt(&mut leptons);
    leptons
}

/// Sort any kinematic collection by descending pT.
pub fn sort_by_pt<K: Kinematic>(objects: &mut [K]) {
    objects.sort_by(|a, b| b.pt().total_cmp(&a.pt()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use hepsel_core::{EventInfo, LeptonCommon, Particle};
    use hepsel_store::EventStore;

    fn fill(store: &mut EventStore) {
        store.begin_event(EventInfo::default());
        store.push(Electron::new(
            Particle::from_pt_eta_phi_m(25.0, 0.0, 0.0, 0.0),
            LeptonCommon::with_charge(1),
        ));
        store.push(Electron::new(
            Particle::from_pt_eta_phi_m(60.0, 1.0, 2.0, 0.0),
            LeptonCommon::with_charge(-1),
        ));
        store.push(Muon::new(
            Particle::from_pt_eta_phi_m(40.0, -1.0, 1.0, 0.105),
            LeptonCommon::with_charge(1),
        ));
        store.push(Tau::new(
            Particle::from_pt_eta_phi_m(80.0, 0.5, -2.0, 1.7),
            LeptonCommon::with_charge(-1),
        ));
    }

    #[test]
    fn merged_collection_is_pt_ordered() {
        let mut store = EventStore::new();
        fill(&mut store);
        let leptons = build_leptons(&store.electrons(), &store.muons());
        let pts: Vec<f64> = leptons.iter().map(|l| l.pt().round()).collect();
        assert_eq!(pts, vec![60.0, 40.0, 25.0]);
        assert!(leptons[0].is_ele());
        assert!(leptons[1].is_mu());
        assert_eq!(leptons[1].charge(), 1);
        assert_eq!(leptons[0].index(), 1);
    }

    #[test]
    fn taus_merge_when_requested() {
        let mut store = EventStore::new();
        fill(&mut store);
        let leptons = build_leptons_with_taus(&store.electrons(), &store.muons(), &store.taus());
        assert_eq!(leptons.len(), 4);
        assert!(leptons[0].is_tau());
        assert!(leptons[0].as_tau().is_some());
        assert!(leptons[0].as_muon().is_none());
    }

    #[test]
    fn concrete_record_recoverable() {
        let mut store = EventStore::new();
        fill(&mut store);
        let leptons = build_leptons(&store.electrons(), &store.muons());
        let mu = leptons.iter().find_map(|l| l.as_muon());
        assert!(mu.is_some_and(|m| m.is_combined));
    }
}
