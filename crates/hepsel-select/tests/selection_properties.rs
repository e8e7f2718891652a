//! Property tests for overlap removal and the selection pipeline.

use hepsel_core::{
    Electron, Jet, Kinematic, LeptonCommon, LorentzVector, Muon, Particle, SystematicVariant,
};
use hepsel_select::kinematics::{mct, mll};
use hepsel_select::pairing::is_sfos;
use hepsel_select::{remove_sfos_pairs, OverlapConfig, OverlapRemover, Selector};
use hepsel_test_utils::fixtures::random_event;
use proptest::prelude::*;

fn electron((pt, eta, phi): (f64, f64, f64)) -> Electron {
    Electron::new(
        Particle::from_pt_eta_phi_m(pt, eta, phi, 0.0),
        LeptonCommon::with_charge(1),
    )
}

fn muon((pt, eta, phi, q): (f64, f64, f64, bool)) -> Muon {
    Muon::new(
        Particle::from_pt_eta_phi_m(pt, eta, phi, 0.105),
        LeptonCommon::with_charge(if q { 1 } else { -1 }),
    )
}

// Objects crowded into a small η–φ patch so that overlaps are common.
fn crowded() -> impl Strategy<Value = (f64, f64, f64)> {
    (10.0f64..100.0, -0.1f64..0.1, -0.1f64..0.1)
}

proptest! {
    #[test]
    fn electron_overlap_leaves_no_close_pair(
        kin in prop::collection::vec(crowded(), 0..8),
    ) {
        let electrons: Vec<Electron> = kin.into_iter().map(electron).collect();
        let hardest = electrons.iter().map(|e| e.pt()).fold(0.0, f64::max);
        let mut survivors: Vec<&Electron> = electrons.iter().collect();
        let remover = OverlapRemover::default();
        remover.e_e(&mut survivors);

        let min_dr = OverlapConfig::DEFAULT_E_E;
        for (i, a) in survivors.iter().enumerate() {
            for b in &survivors[i + 1..] {
                prop_assert!(a.delta_r(b) > min_dr);
            }
        }
        if !electrons.is_empty() {
            prop_assert!(survivors.iter().any(|e| e.pt() == hardest));
        }
    }

    #[test]
    fn full_overlap_leaves_no_close_electron_muon_pair(
        ekin in prop::collection::vec(crowded(), 0..5),
        mkin in prop::collection::vec((10.0f64..100.0, -0.1f64..0.1, -0.1f64..0.1, any::<bool>()), 0..5),
    ) {
        let electrons: Vec<Electron> = ekin.into_iter().map(electron).collect();
        let muons: Vec<Muon> = mkin.into_iter().map(muon).collect();
        let mut es: Vec<&Electron> = electrons.iter().collect();
        let mut ms: Vec<&Muon> = muons.iter().collect();
        let mut js: Vec<&Jet> = Vec::new();
        let remover = OverlapRemover::default();
        remover.perform_overlap(&mut es, &mut ms, &mut js);

        let min_dr = remover.config().e_m;
        for e in &es {
            for m in &ms {
                prop_assert!(e.delta_r(m) > min_dr);
            }
        }
    }

    #[test]
    fn sfos_veto_is_a_no_op_without_low_mass_pairs(
        mkin in prop::collection::vec((10.0f64..100.0, -2.5f64..2.5, -3.1f64..3.1, any::<bool>()), 0..6),
    ) {
        let muons: Vec<Muon> = mkin.into_iter().map(muon).collect();
        let low_mass = muons.iter().enumerate().any(|(i, a)| {
            muons[i + 1..].iter().any(|b| is_sfos(a, b) && mll(a, b) < 12.0)
        });
        prop_assume!(!low_mass);
        let mut vetoed: Vec<&Muon> = muons.iter().collect();
        remove_sfos_pairs(&mut vetoed, 12.0);
        prop_assert_eq!(vetoed.len(), muons.len());
    }

    #[test]
    fn mct_is_symmetric(
        a in (5.0f64..200.0, -2.5f64..2.5, -3.1f64..3.1, 0.0f64..20.0),
        b in (5.0f64..200.0, -2.5f64..2.5, -3.1f64..3.1, 0.0f64..20.0),
    ) {
        let va = LorentzVector::from_pt_eta_phi_m(a.0, a.1, a.2, a.3);
        let vb = LorentzVector::from_pt_eta_phi_m(b.0, b.1, b.2, b.3);
        let ab = mct(&va, &vb);
        prop_assert!((ab - mct(&vb, &va)).abs() <= 1e-9 * (1.0 + ab));
    }

    #[test]
    fn signal_from_baseline_matches_signal_from_store(seed in any::<u64>()) {
        let store = random_event(seed).to_store();
        let selector = Selector::default();
        let baseline = selector.baseline_objects(&store);
        let from_baseline = selector.signal_objects(&baseline, store.info()).unwrap();
        let from_store = selector.signal_objects_from_store(&store);
        prop_assert_eq!(from_baseline.electrons(), from_store.electrons());
        prop_assert_eq!(from_baseline.muons(), from_store.muons());
        prop_assert_eq!(from_baseline.jets(), from_store.jets());
    }

    #[test]
    fn variant_switch_is_idempotent(seed in any::<u64>()) {
        let mut store = random_event(seed).to_store();
        let scalars: Vec<f64> = store.electrons().iter().map(|e| e.lepton.ptcone30).collect();

        store.set_state(SystematicVariant::JesUp);
        let once: Vec<f64> = store.jets().iter().map(|j| j.pt()).collect();
        store.set_state(SystematicVariant::JesUp);
        let twice: Vec<f64> = store.jets().iter().map(|j| j.pt()).collect();
        prop_assert_eq!(once, twice);

        store.set_state(SystematicVariant::Nominal);
        let nominal: Vec<f64> = store.jets().iter().map(|j| j.particle.nominal().pt()).collect();
        let current: Vec<f64> = store.jets().iter().map(|j| j.pt()).collect();
        prop_assert_eq!(nominal, current);

        let after: Vec<f64> = store.electrons().iter().map(|e| e.lepton.ptcone30).collect();
        prop_assert_eq!(scalars, after);
    }
}
