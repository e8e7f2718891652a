//! Per-object quality requirements.
//!
//! Baseline cuts are pT thresholds applied while reading the store. Signal
//! cuts add identification, pileup-corrected isolation and impact-parameter
//! requirements. Every upper bound is exclusive: a value passes when it is
//! strictly below the cut.

use hepsel_core::{AnalysisType, Electron, Jet, Kinematic, Lepton, Muon, Tau};

use crate::config::ObjectCuts;
use crate::leptons::LeptonRef;

// ── Isolation corrections ──────────────────────────────────────────

/// Topological calorimeter isolation with the per-vertex pileup slope
/// subtracted.
pub fn electron_topo_etcone_corr(e: &Electron, n_vtx: u32, is_mc: bool, cuts: &ObjectCuts) -> f64 {
    let c = &cuts.electron;
    let slope = if is_mc { c.topo_slope_mc } else { c.topo_slope_data };
    e.lepton.etconetopo30 - slope * f64::from(n_vtx)
}

/// Track isolation with the per-vertex pileup slope subtracted.
pub fn muon_ptcone_corr(m: &Muon, n_vtx: u32, is_mc: bool, cuts: &ObjectCuts) -> f64 {
    let c = &cuts.muon;
    let slope = if is_mc { c.ptcone_slope_mc } else { c.ptcone_slope_data };
    m.lepton.ptcone30 - slope * f64::from(n_vtx)
}

/// Calorimeter isolation with a quadratic pileup correction.
pub fn muon_etcone_corr(m: &Muon, n_vtx: u32, is_mc: bool, cuts: &ObjectCuts) -> f64 {
    let c = &cuts.muon;
    let (k1, k2) = if is_mc {
        (c.etcone_k1_mc, c.etcone_k2_mc)
    } else {
        (c.etcone_k1_data, c.etcone_k2_data)
    };
    let n = f64::from(n_vtx);
    m.etcone30 - k1 * n - k2 * n * n
}

// ── Baseline ───────────────────────────────────────────────────────

/// Baseline electron: pT threshold.
pub fn is_baseline_electron(e: &Electron, cuts: &ObjectCuts) -> bool {
    e.pt() >= cuts.baseline.electron_pt
}

/// Baseline muon: pT threshold.
pub fn is_baseline_muon(m: &Muon, cuts: &ObjectCuts) -> bool {
    m.pt() >= cuts.baseline.muon_pt
}

/// Baseline tau: pT threshold and loose identification.
pub fn is_baseline_tau(t: &Tau, cuts: &ObjectCuts) -> bool {
    t.pt() >= cuts.baseline.tau_pt && t.loose_bdt
}

/// Baseline jet: pT threshold.
pub fn is_baseline_jet(j: &Jet, cuts: &ObjectCuts) -> bool {
    j.pt() >= cuts.baseline.jet_pt
}

// ── Signal ─────────────────────────────────────────────────────────

/// Signal electron: tight identification, relative track and sliding
/// calorimeter isolation, and impact parameters.
pub fn is_signal_electron(e: &Electron, n_vtx: u32, is_mc: bool, cuts: &ObjectCuts) -> bool {
    let c = &cuts.electron;
    let pt = e.pt();
    e.tight_llh
        && e.lepton.ptcone30 / pt < c.ptcone30_rel
        && electron_topo_etcone_corr(e, n_vtx, is_mc, cuts) / pt < c.topo_etcone30_rel
        && e.d0_sig().abs() < c.d0_sig
        && e.z0_sin_theta().abs() < c.z0_sin_theta
}

/// Signal muon: sliding track isolation and impact parameters.
pub fn is_signal_muon(m: &Muon, n_vtx: u32, is_mc: bool, cuts: &ObjectCuts) -> bool {
    let c = &cuts.muon;
    muon_ptcone_corr(m, n_vtx, is_mc, cuts) / m.pt() < c.ptcone30_rel
        && m.d0_sig().abs() < c.d0_sig
        && m.z0_sin_theta().abs() < c.z0_sin_theta
}

/// Signal tau: medium identification, one or three tracks.
pub fn is_signal_tau(t: &Tau) -> bool {
    t.medium_bdt && matches!(t.n_track, 1 | 3)
}

/// Dispatch on lepton flavour.
pub fn is_signal_lepton(l: &LeptonRef<'_>, n_vtx: u32, is_mc: bool, cuts: &ObjectCuts) -> bool {
    match l {
        LeptonRef::Electron(e) => is_signal_electron(e, n_vtx, is_mc, cuts),
        LeptonRef::Muon(m) => is_signal_muon(m, n_vtx, is_mc, cuts),
        LeptonRef::Tau(t) => is_signal_tau(t),
    }
}

/// Signal jet: the analysis pT preset, central, and pileup-suppressed.
pub fn is_signal_jet(j: &Jet, analysis: AnalysisType, cuts: &ObjectCuts) -> bool {
    let c = &cuts.jet;
    j.pt() >= c.pt_for(analysis) && j.eta().abs() <= c.max_abs_eta && j.jvf >= c.min_jvf
}

#[cfg(test)]
mod tests {
    use super::*;
    use hepsel_core::{LeptonCommon, Particle};

    fn cuts() -> ObjectCuts {
        ObjectCuts::new()
    }

    fn signal_electron(pt: f64) -> Electron {
        let mut e = Electron::new(
            Particle::from_pt_eta_phi_m(pt, 0.5, 0.0, 0.0),
            LeptonCommon::with_charge(-1),
        );
        e.tight_llh = true;
        e
    }

    fn signal_muon(pt: f64) -> Muon {
        Muon::new(
            Particle::from_pt_eta_phi_m(pt, -0.5, 1.0, 0.105),
            LeptonCommon::with_charge(1),
        )
    }

    #[test]
    fn clean_electron_is_signal() {
        assert!(is_signal_electron(&signal_electron(30.0), 10, true, &cuts()));
    }

    #[test]
    fn electron_needs_tight_id() {
        let mut e = signal_electron(30.0);
        e.tight_llh = false;
        assert!(!is_signal_electron(&e, 10, true, &cuts()));
    }

    #[test]
    fn electron_track_isolation_is_exclusive() {
        let mut e = signal_electron(50.0);
        e.lepton.ptcone30 = 0.1601 * e.pt();
        assert!(!is_signal_electron(&e, 0, false, &cuts()));
        e.lepton.ptcone30 = 0.159 * e.pt();
        assert!(is_signal_electron(&e, 0, false, &cuts()));
    }

    #[test]
    fn sliding_topo_isolation_depends_on_sample() {
        let mut e = signal_electron(20.0);
        // 0.18 · 20 = 3.6. With 20 vertices the correction is ~0.36 (MC)
        // or ~0.40 (data).
        e.lepton.etconetopo30 = 3.6 + 0.38;
        assert!(!is_signal_electron(&e, 20, true, &cuts()));
        assert!(is_signal_electron(&e, 20, false, &cuts()));
        let corr = electron_topo_etcone_corr(&e, 20, true, &cuts());
        assert!((corr - (3.98 - 0.01794 * 20.0)).abs() < 1e-12);
    }

    #[test]
    fn impact_parameters_use_absolute_values() {
        let mut e = signal_electron(30.0);
        e.lepton.d0 = -0.06;
        e.lepton.err_d0 = 0.01;
        assert!(!is_signal_electron(&e, 0, true, &cuts()));
        let mut m = signal_muon(30.0);
        m.lepton.z0 = -1.5;
        assert!(!is_signal_muon(&m, 0, true, &cuts()));
        m.lepton.z0 = -0.5;
        assert!(is_signal_muon(&m, 0, true, &cuts()));
    }

    #[test]
    fn muon_sliding_isolation() {
        let mut m = signal_muon(25.0);
        // 0.12 · 25 = 3.0
        m.lepton.ptcone30 = 3.05;
        assert!(!is_signal_muon(&m, 0, true, &cuts()));
        // 20 vertices of MC correction: 3.05 - 0.1254 < 3.0
        assert!(is_signal_muon(&m, 20, true, &cuts()));
    }

    #[test]
    fn muon_etcone_correction() {
        let mut m = signal_muon(25.0);
        m.etcone30 = 5.0;
        let data = muon_etcone_corr(&m, 10, false, &cuts());
        assert!((data - (5.0 - 0.648 - 0.098)).abs() < 1e-12);
        let mc = muon_etcone_corr(&m, 10, true, &cuts());
        assert!((mc - (5.0 - 0.692 - 0.076)).abs() < 1e-12);
    }

    #[test]
    fn jet_preset_and_quality() {
        let mut j = Jet::new(Particle::from_pt_eta_phi_m(25.0, 1.0, 0.0, 4.0));
        assert!(is_signal_jet(&j, AnalysisType::ThreeLep, &cuts()));
        assert!(!is_signal_jet(&j, AnalysisType::TwoLep, &cuts()));
        j.jvf = 0.5;
        assert!(!is_signal_jet(&j, AnalysisType::ThreeLep, &cuts()));
        let forward = Jet::new(Particle::from_pt_eta_phi_m(60.0, 2.8, 0.0, 4.0));
        assert!(!is_signal_jet(&forward, AnalysisType::ThreeLep, &cuts()));
    }

    #[test]
    fn baseline_thresholds() {
        let c = cuts();
        assert!(is_baseline_electron(&signal_electron(10.0), &c));
        assert!(!is_baseline_electron(&signal_electron(9.9), &c));
        assert!(is_baseline_muon(&signal_muon(10.5), &c));
        let mut t = Tau::new(
            Particle::from_pt_eta_phi_m(25.0, 0.0, 0.0, 1.7),
            LeptonCommon::with_charge(1),
        );
        assert!(!is_baseline_tau(&t, &c));
        t.loose_bdt = true;
        assert!(is_baseline_tau(&t, &c));
        assert!(!is_signal_tau(&t));
        t.medium_bdt = true;
        assert!(is_signal_tau(&t));
        t.n_track = 2;
        assert!(!is_signal_tau(&t));
    }

    #[test]
    fn signal_lepton_dispatches_on_flavour() {
        use crate::leptons::build_leptons_with_taus;
        use hepsel_core::{EventInfo, Flavor};
        use hepsel_store::EventStore;

        let mut store = EventStore::new();
        store.begin_event(EventInfo::default());
        let mut loose = signal_electron(40.0);
        loose.tight_llh = false;
        store.push(loose);
        store.push(signal_muon(35.0));
        let tau = |pt: f64, n_track: u32| {
            let mut t = Tau::new(
                Particle::from_pt_eta_phi_m(pt, 1.5, -2.0, 1.777),
                LeptonCommon::with_charge(-1),
            );
            t.loose_bdt = true;
            t.medium_bdt = true;
            t.n_track = n_track;
            t
        };
        store.push(tau(30.0, 3));
        store.push(tau(25.0, 2));

        let leptons = build_leptons_with_taus(&store.electrons(), &store.muons(), &store.taus());
        assert_eq!(leptons.len(), 4);
        let signal: Vec<Flavor> = leptons
            .iter()
            .filter(|l| is_signal_lepton(l, 0, true, &cuts()))
            .map(|l| l.flavor())
            .collect();
        assert_eq!(signal, vec![Flavor::Muon, Flavor::Tau]);
    }
}
