//! Kaplan-Meier estimation of the hazard function
//!
//! Lifetimes come in two groups: `complete`, where the event was observed,
//! and `ongoing`, which were still running at the last observation. At each
//! distinct time the hazard is the number of events at that time over the
//! number still at risk; both events and censorings then leave the risk set.

use crate::hazard::HazardFunction;
use crate::survival::SurvivalFunction;
use empirical_core::{reals, Error, Result};
use empirical_mass::Hist;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, instrument, trace};

/// One step of the estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KaplanMeierRow {
    pub time: f64,
    /// Lifetimes not yet ended or censored just before `time`
    pub at_risk: usize,
    /// Events observed at `time`
    pub ended: usize,
    /// Lifetimes censored at `time`
    pub censored: usize,
    pub hazard: f64,
}

/// Hazard estimate together with the risk table it came from
#[derive(Debug, Clone, PartialEq)]
pub struct KaplanMeier {
    hazard: HazardFunction,
    table: Vec<KaplanMeierRow>,
    complete: usize,
    ongoing: usize,
}

impl KaplanMeier {
    /// Estimate the hazard function from complete and ongoing lifetimes
    ///
    /// Fails with a data error if either group contains NaN.
    #[instrument(level = "debug", skip(complete, ongoing), fields(complete = complete.len(), ongoing = ongoing.len()))]
    pub fn estimate(complete: &[f64], ongoing: &[f64]) -> Result<Self> {
        if complete.iter().any(|t| t.is_nan()) {
            return Err(Error::Data("complete lifetimes contain NaN".to_string()));
        }
        if ongoing.iter().any(|t| t.is_nan()) {
            return Err(Error::Data("ongoing lifetimes contain NaN".to_string()));
        }

        let ended_at = Hist::from_values(reals(complete));
        let censored_at = Hist::from_values(reals(ongoing));
        let times: BTreeSet<_> = ended_at.keys().chain(censored_at.keys()).copied().collect();

        let mut at_risk = complete.len() + ongoing.len();
        let mut hazard = HazardFunction::new();
        let mut table = Vec::with_capacity(times.len());
        for t in times {
            let ended = ended_at.freq(&t) as usize;
            let censored = censored_at.freq(&t) as usize;
            let lam = ended as f64 / at_risk as f64;
            trace!(time = t.into_inner(), at_risk, ended, censored, hazard = lam);

            hazard.insert(t.into_inner(), lam);
            table.push(KaplanMeierRow {
                time: t.into_inner(),
                at_risk,
                ended,
                censored,
                hazard: lam,
            });
            at_risk -= ended + censored;
        }
        debug!(steps = table.len(), "hazard estimated");

        Ok(Self {
            hazard,
            table,
            complete: complete.len(),
            ongoing: ongoing.len(),
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.hazard = self.hazard.with_label(label);
        self
    }

    pub fn hazard(&self) -> &HazardFunction {
        &self.hazard
    }

    pub fn into_hazard(self) -> HazardFunction {
        self.hazard
    }

    /// Risk table, one row per distinct time, ascending
    pub fn table(&self) -> &[KaplanMeierRow] {
        &self.table
    }

    /// Number of lifetimes whose end was observed
    pub fn complete_count(&self) -> usize {
        self.complete
    }

    /// Number of lifetimes still running when last observed
    pub fn ongoing_count(&self) -> usize {
        self.ongoing
    }

    /// Survival curve implied by the estimated hazard
    pub fn survival(&self) -> SurvivalFunction {
        self.hazard.make_survival()
    }
}
