//! Benchmark profiles for the hepsel selection framework.
//!
//! Provides pre-filled [`EventStore`] profiles for benchmarking:
//!
//! - [`reference_profile`]: a busy multilepton event (6e, 6μ, 12 jets)
//! - [`stress_profile`]: an unrealistically crowded event (24e, 24μ, 48 jets)
//! - [`crowded_event`]: the generator behind both
//!
//! Objects are placed around a handful of seed directions so that every
//! overlap stage has work to do.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::f64::consts::PI;

use hepsel_core::{
    DatasetId, Electron, EventInfo, EventNumber, Jet, LeptonCommon, Met, Muon, Particle,
    SystematicVariant, VariantShifts,
};
use hepsel_store::{EventStore, StoreConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of η–φ cluster centres objects are scattered around.
const CLUSTERS: usize = 4;

/// Reference profile: 6 electrons, 6 muons, 12 jets.
pub fn reference_profile(seed: u64) -> EventStore {
    crowded_event(seed, 6, 6, 12)
}

/// Stress profile: 24 electrons, 24 muons, 48 jets.
pub fn stress_profile(seed: u64) -> EventStore {
    crowded_event(seed, 24, 24, 48)
}

/// Build a deterministic crowded event.
///
/// Each object is drawn within ΔR ≈ 0.5 of one of a few cluster centres,
/// with pT between 10 and 150 GeV. Jets carry a JES-up shift and MET is
/// stored for the nominal and JES-up variants.
pub fn crowded_event(seed: u64, n_electrons: usize, n_muons: usize, n_jets: usize) -> EventStore {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let centres: Vec<(f64, f64)> = (0..CLUSTERS)
        .map(|_| (rng.gen_range(-2.0..2.0), rng.gen_range(-PI..PI)))
        .collect();

    let config = StoreConfig {
        lepton_capacity: n_electrons.max(n_muons),
        ..StoreConfig::new()
    }
    .with_jet_capacity(n_jets);
    let mut store = EventStore::with_config(&config);
    let mut info = EventInfo::simulation(DatasetId(410_000), EventNumber(seed));
    info.n_vtx = rng.gen_range(5..30);
    store.begin_event(info);

    for _ in 0..n_electrons {
        let (particle, charge) = scattered(&mut rng, &centres, 0.000_511);
        let mut e = Electron::new(particle, LeptonCommon::with_charge(charge));
        e.tight_llh = rng.gen_bool(0.8);
        e.lepton.ptcone30 = rng.gen_range(0.0..0.2) * e.particle.p4().pt();
        store.push(e);
    }
    for _ in 0..n_muons {
        let (particle, charge) = scattered(&mut rng, &centres, 0.105_658);
        let mut m = Muon::new(particle, LeptonCommon::with_charge(charge));
        m.lepton.ptcone30 = rng.gen_range(0.0..0.15) * m.particle.p4().pt();
        store.push(m);
    }
    for _ in 0..n_jets {
        let (particle, _) = scattered(&mut rng, &centres, 5.0);
        let mut j = Jet::new(particle.with_shifts(
            VariantShifts::new().with(SystematicVariant::JesUp, rng.gen_range(1.0..1.1)),
        ));
        j.jvf = rng.gen_range(0.5..1.0);
        j.mv1 = rng.gen_range(0.0..1.0);
        store.push(j);
    }

    let et = rng.gen_range(20.0..200.0);
    let phi = rng.gen_range(-PI..PI);
    store.insert_met(Met::new(et, phi));
    store.insert_met(Met::new(et * 1.05, phi).with_variant(SystematicVariant::JesUp));
    store
}

fn scattered(rng: &mut ChaCha8Rng, centres: &[(f64, f64)], mass: f64) -> (Particle, i32) {
    let (eta0, phi0) = centres[rng.gen_range(0..centres.len())];
    let pt = rng.gen_range(10.0..150.0);
    let eta = eta0 + rng.gen_range(-0.35..0.35);
    let phi = phi0 + rng.gen_range(-0.35..0.35);
    let charge = if rng.gen_bool(0.5) { 1 } else { -1 };
    (Particle::from_pt_eta_phi_m(pt, eta, phi, mass), charge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hepsel_core::Kinematic;
    use hepsel_select::Selector;

    #[test]
    fn profiles_have_requested_sizes() {
        let store = reference_profile(42);
        assert_eq!(store.electrons().len(), 6);
        assert_eq!(store.muons().len(), 6);
        assert_eq!(store.jets().len(), 12);
        let store = stress_profile(42);
        assert_eq!(store.jets().len(), 48);
    }

    #[test]
    fn crowded_event_is_deterministic() {
        let a = crowded_event(7, 3, 3, 6);
        let b = crowded_event(7, 3, 3, 6);
        let pts = |s: &EventStore| s.jets().iter().map(|j| j.pt()).collect::<Vec<_>>();
        assert_eq!(pts(&a), pts(&b));
    }

    #[test]
    fn overlap_removal_has_work_to_do() {
        let store = stress_profile(1);
        let baseline = Selector::default().baseline_objects(&store);
        assert!(baseline.jets().len() < store.jets().len());
        assert!(baseline.n_light_leptons() < 48);
    }
}
