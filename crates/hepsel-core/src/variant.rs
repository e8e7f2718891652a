//! Systematic variants and the per-object scale table.

use std::fmt;

use smallvec::SmallVec;

/// An energy/momentum-scale hypothesis applied to the same reconstructed
/// object.
///
/// `Nominal` is the default calibration. Every other variant names one
/// up/down shift of a detector calibration; an object only reacts to the
/// variants it carries a scale factor for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SystematicVariant {
    /// Nominal calibration.
    #[default]
    Nominal,
    /// Electron energy scale, up.
    EgScaleUp,
    /// Electron energy scale, down.
    EgScaleDown,
    /// Electron energy resolution, up.
    EgResUp,
    /// Electron energy resolution, down.
    EgResDown,
    /// Muon inner-detector momentum, up.
    MuonIdUp,
    /// Muon inner-detector momentum, down.
    MuonIdDown,
    /// Muon spectrometer momentum, up.
    MuonMsUp,
    /// Muon spectrometer momentum, down.
    MuonMsDown,
    /// Muon momentum scale, up.
    MuonScaleUp,
    /// Muon momentum scale, down.
    MuonScaleDown,
    /// Jet energy scale, up.
    JesUp,
    /// Jet energy scale, down.
    JesDown,
    /// Jet energy resolution.
    Jer,
    /// Tau energy scale, up.
    TesUp,
    /// Tau energy scale, down.
    TesDown,
    /// Missing-energy soft term, resolution parallel to the hard term.
    MetSoftResoPara,
    /// Missing-energy soft term, resolution perpendicular to the hard term.
    MetSoftResoPerp,
    /// Missing-energy soft-term scale, up.
    MetSoftScaleUp,
    /// Missing-energy soft-term scale, down.
    MetSoftScaleDown,
}

impl SystematicVariant {
    /// Every variant, nominal first.
    pub const ALL: [SystematicVariant; 20] = [
        Self::Nominal,
        Self::EgScaleUp,
        Self::EgScaleDown,
        Self::EgResUp,
        Self::EgResDown,
        Self::MuonIdUp,
        Self::MuonIdDown,
        Self::MuonMsUp,
        Self::MuonMsDown,
        Self::MuonScaleUp,
        Self::MuonScaleDown,
        Self::JesUp,
        Self::JesDown,
        Self::Jer,
        Self::TesUp,
        Self::TesDown,
        Self::MetSoftResoPara,
        Self::MetSoftResoPerp,
        Self::MetSoftScaleUp,
        Self::MetSoftScaleDown,
    ];

    /// Stable lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nominal => "nominal",
            Self::EgScaleUp => "eg_scale_up",
            Self::EgScaleDown => "eg_scale_down",
            Self::EgResUp => "eg_res_up",
            Self::EgResDown => "eg_res_down",
            Self::MuonIdUp => "muon_id_up",
            Self::MuonIdDown => "muon_id_down",
            Self::MuonMsUp => "muon_ms_up",
            Self::MuonMsDown => "muon_ms_down",
            Self::MuonScaleUp => "muon_scale_up",
            Self::MuonScaleDown => "muon_scale_down",
            Self::JesUp => "jes_up",
            Self::JesDown => "jes_down",
            Self::Jer => "jer",
            Self::TesUp => "tes_up",
            Self::TesDown => "tes_down",
            Self::MetSoftResoPara => "met_soft_reso_para",
            Self::MetSoftResoPerp => "met_soft_reso_perp",
            Self::MetSoftScaleUp => "met_soft_scale_up",
            Self::MetSoftScaleDown => "met_soft_scale_down",
        }
    }

    /// Whether this is the nominal calibration.
    pub fn is_nominal(&self) -> bool {
        matches!(self, Self::Nominal)
    }
}

impl fmt::Display for SystematicVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Relative four-momentum scale factors keyed by variant.
///
/// Objects usually carry two to four shifts (up/down of one or two
/// calibrations), so the table lives inline in a `SmallVec`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VariantShifts {
    entries: SmallVec<[(SystematicVariant, f64); 4]>,
}

impl VariantShifts {
    /// An empty table: every variant resolves to the nominal scale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the scale factor for `variant`, replacing any previous value.
    ///
    /// Setting a factor for `Nominal` is ignored; the nominal scale is 1 by
    /// definition.
    pub fn set(&mut self, variant: SystematicVariant, factor: f64) {
        if variant.is_nominal() {
            return;
        }
        match self.entries.iter_mut().find(|(v, _)| *v == variant) {
            Some(entry) => entry.1 = factor,
            None => self.entries.push((variant, factor)),
        }
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, variant: SystematicVariant, factor: f64) -> Self {
        self.set(variant, factor);
        self
    }

    /// Scale factor for `variant`; 1 when none is stored.
    pub fn factor(&self, variant: SystematicVariant) -> f64 {
        self.entries
            .iter()
            .find(|(v, _)| *v == variant)
            .map(|(_, f)| *f)
            .unwrap_or(1.0)
    }

    /// Whether a factor is stored for `variant`.
    pub fn contains(&self, variant: SystematicVariant) -> bool {
        self.entries.iter().any(|(v, _)| *v == variant)
    }

    /// Number of stored shifts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no shifts are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variant_is_unit_scale() {
        let shifts = VariantShifts::new().with(SystematicVariant::EgScaleUp, 1.01);
        assert_eq!(shifts.factor(SystematicVariant::EgScaleUp), 1.01);
        assert_eq!(shifts.factor(SystematicVariant::JesUp), 1.0);
        assert_eq!(shifts.factor(SystematicVariant::Nominal), 1.0);
    }

    #[test]
    fn set_replaces_existing_entry() {
        let mut shifts = VariantShifts::new();
        shifts.set(SystematicVariant::JesUp, 1.05);
        shifts.set(SystematicVariant::JesUp, 1.03);
        assert_eq!(shifts.len(), 1);
        assert_eq!(shifts.factor(SystematicVariant::JesUp), 1.03);
    }

    #[test]
    fn nominal_factor_cannot_be_overridden() {
        let shifts = VariantShifts::new().with(SystematicVariant::Nominal, 2.0);
        assert!(shifts.is_empty());
        assert_eq!(shifts.factor(SystematicVariant::Nominal), 1.0);
    }

    #[test]
    fn names_are_unique() {
        let names: std::collections::HashSet<_> =
            SystematicVariant::ALL.iter().map(|v| v.name()).collect();
        assert_eq!(names.len(), SystematicVariant::ALL.len());
    }
}
