//! Reusable object fixtures.
//!
//! The `signal_*` builders produce objects that pass every default signal
//! requirement, so a test only has to spoil the one attribute it cares
//! about. [`random_event`] produces reproducible busy events for property
//! tests.

use std::f64::consts::PI;

use hepsel_core::{
    DatasetId, Electron, EventInfo, EventNumber, Jet, LeptonCommon, Met, Muon, Particle,
    SystematicVariant, Tau, VariantShifts,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::EventFixture;

pub const ELECTRON_MASS: f64 = 0.000_511;
pub const MUON_MASS: f64 = 0.105_658;
pub const TAU_MASS: f64 = 1.776_86;

/// Tight, isolated, prompt electron.
pub fn signal_electron(pt: f64, eta: f64, phi: f64, charge: i32) -> Electron {
    let mut e = Electron::new(
        Particle::from_pt_eta_phi_m(pt, eta, phi, ELECTRON_MASS),
        LeptonCommon::with_charge(charge),
    );
    e.medium_llh = true;
    e.tight_llh = true;
    e
}

/// Isolated, prompt combined muon.
pub fn signal_muon(pt: f64, eta: f64, phi: f64, charge: i32) -> Muon {
    Muon::new(
        Particle::from_pt_eta_phi_m(pt, eta, phi, MUON_MASS),
        LeptonCommon::with_charge(charge),
    )
}

/// One-prong tau with loose and medium identification.
pub fn signal_tau(pt: f64, eta: f64, phi: f64, charge: i32) -> Tau {
    let mut t = Tau::new(
        Particle::from_pt_eta_phi_m(pt, eta, phi, TAU_MASS),
        LeptonCommon::with_charge(charge),
    );
    t.loose_bdt = true;
    t.medium_bdt = true;
    t
}

/// Central light jet with full vertex fraction.
pub fn signal_jet(pt: f64, eta: f64, phi: f64) -> Jet {
    Jet::new(Particle::from_pt_eta_phi_m(pt, eta, phi, 5.0))
}

/// Like [`signal_jet`], tagged well above the 80% working point.
pub fn b_jet(pt: f64, eta: f64, phi: f64) -> Jet {
    let mut j = signal_jet(pt, eta, phi);
    j.mv1 = 0.95;
    j.truth_label = 5;
    j
}

/// Nominal missing energy.
pub fn met(et: f64, phi: f64) -> Met {
    Met::new(et, phi)
}

/// A reproducible random event.
///
/// Up to four electrons and four muons, up to two taus, up to seven jets,
/// with randomised isolation, impact parameters and identification so that
/// every selection stage rejects something. Electrons and jets carry scale
/// shifts for [`SystematicVariant::EgScaleUp`] and
/// [`SystematicVariant::JesUp`]; missing energy is stored for the nominal
/// and JES-up variants.
pub fn random_event(seed: u64) -> EventFixture {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut info = EventInfo::simulation(DatasetId(410_000), EventNumber(seed));
    info.is_mc = rng.gen_bool(0.5);
    info.n_vtx = rng.gen_range(1..40);

    let mut builder = EventFixture::builder(info);
    for _ in 0..rng.gen_range(0..5) {
        let (pt, eta, phi, q) = random_kinematics(&mut rng, 2.47);
        let mut e = signal_electron(pt, eta, phi, q);
        e.tight_llh = rng.gen_bool(0.8);
        randomise_lepton(&mut rng, &mut e.lepton, pt);
        e.particle = e.particle.with_shifts(
            VariantShifts::new().with(SystematicVariant::EgScaleUp, rng.gen_range(1.0..1.05)),
        );
        builder = builder.electron(e);
    }
    for _ in 0..rng.gen_range(0..5) {
        let (pt, eta, phi, q) = random_kinematics(&mut rng, 2.5);
        let mut m = signal_muon(pt, eta, phi, q);
        randomise_lepton(&mut rng, &mut m.lepton, pt);
        m.etcone30 = rng.gen_range(0.0..0.2) * pt;
        builder = builder.muon(m);
    }
    for _ in 0..rng.gen_range(0..3) {
        let (pt, eta, phi, q) = random_kinematics(&mut rng, 2.5);
        let mut t = signal_tau(pt, eta, phi, q);
        t.loose_bdt = rng.gen_bool(0.8);
        t.medium_bdt = t.loose_bdt && rng.gen_bool(0.7);
        t.n_track = rng.gen_range(1..4);
        builder = builder.tau(t);
    }
    for _ in 0..rng.gen_range(0..8) {
        let (pt, eta, phi, _) = random_kinematics(&mut rng, 4.5);
        let mut j = signal_jet(pt, eta, phi);
        j.jvf = rng.gen_range(0.0..1.0);
        j.mv1 = rng.gen_range(0.0..1.0);
        j.particle = j.particle.with_shifts(
            VariantShifts::new().with(SystematicVariant::JesUp, rng.gen_range(1.0..1.1)),
        );
        builder = builder.jet(j);
    }
    let et = rng.gen_range(0.0..150.0);
    let phi = rng.gen_range(-PI..PI);
    builder
        .met(met(et, phi))
        .met(met(et * 1.05, phi).with_variant(SystematicVariant::JesUp))
        .build()
}

fn random_kinematics(rng: &mut ChaCha8Rng, max_eta: f64) -> (f64, f64, f64, i32) {
    let pt = rng.gen_range(5.0..120.0);
    let eta = rng.gen_range(-max_eta..max_eta);
    let phi = rng.gen_range(-PI..PI);
    let charge = if rng.gen_bool(0.5) { 1 } else { -1 };
    (pt, eta, phi, charge)
}

fn randomise_lepton(rng: &mut ChaCha8Rng, lepton: &mut LeptonCommon, pt: f64) {
    lepton.ptcone30 = rng.gen_range(0.0..0.2) * pt;
    lepton.etconetopo30 = rng.gen_range(0.0..0.25) * pt;
    lepton.d0 = rng.gen_range(-0.1..0.1);
    lepton.err_d0 = 0.015;
    lepton.z0 = rng.gen_range(-1.5..1.5);
}
