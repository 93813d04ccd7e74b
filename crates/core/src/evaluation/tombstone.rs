//! Cost lines a user has hidden from one pricing scope.
//!
//! Older evaluations persisted a bare array meaning "hidden from the default
//! scope"; newer ones persist an object keyed by scope. Both decode into
//! [`TombstoneStore`], every read goes through [`TombstoneStore::for_scope`],
//! and the first write migrates legacy data to the keyed form.

use std::collections::{BTreeMap, BTreeSet};

use costplan_shared::types::{CostLineId, EvaluationPriceId};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::EvaluationError;
use super::types::{Evaluation, EvaluationRow, RowSource};

/// Persisted key of the default (legacy) pricing scope.
pub const DEFAULT_SCOPE_KEY: &str = "null";

static NO_TOMBSTONES: BTreeSet<CostLineId> = BTreeSet::new();

/// Identifies one pricing scope of an evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopeKey(pub Option<EvaluationPriceId>);

impl ScopeKey {
    /// The default pricing scope.
    pub const DEFAULT: Self = Self(None);

    /// True for the default pricing scope.
    #[must_use]
    pub const fn is_default(self) -> bool {
        self.0.is_none()
    }
}

impl From<Option<EvaluationPriceId>> for ScopeKey {
    fn from(price_id: Option<EvaluationPriceId>) -> Self {
        Self(price_id)
    }
}

impl std::fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(price_id) => write!(f, "{price_id}"),
            None => f.write_str(DEFAULT_SCOPE_KEY),
        }
    }
}

/// Hidden cost line ids, in either persisted format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TombstoneStore {
    /// Legacy bare array; applies to the default scope only.
    Legacy(BTreeSet<CostLineId>),
    /// Scope key to hidden ids.
    Keyed(BTreeMap<String, BTreeSet<CostLineId>>),
}

impl Default for TombstoneStore {
    fn default() -> Self {
        Self::Keyed(BTreeMap::new())
    }
}

impl TombstoneStore {
    /// Hidden ids for `scope`; empty when none were recorded.
    #[must_use]
    pub fn for_scope(&self, scope: ScopeKey) -> &BTreeSet<CostLineId> {
        match self {
            Self::Legacy(ids) if scope.is_default() => ids,
            Self::Legacy(_) => &NO_TOMBSTONES,
            Self::Keyed(scopes) => scopes.get(&scope.to_string()).unwrap_or(&NO_TOMBSTONES),
        }
    }

    /// Whether `cost_line_id` is hidden from `scope`.
    #[must_use]
    pub fn is_hidden(&self, scope: ScopeKey, cost_line_id: CostLineId) -> bool {
        self.for_scope(scope).contains(&cost_line_id)
    }

    /// True while the store still holds the legacy array.
    #[must_use]
    pub const fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy(_))
    }

    /// Converts to the keyed form, moving legacy ids under the default scope.
    #[must_use]
    pub fn migrate(self) -> Self {
        Self::Keyed(self.into_scopes())
    }

    /// Hides `cost_line_id` from `scope`, migrating legacy data first.
    ///
    /// Returns false if it was already hidden.
    pub fn hide(&mut self, scope: ScopeKey, cost_line_id: CostLineId) -> bool {
        let mut scopes = std::mem::take(self).into_scopes();
        let inserted = scopes
            .entry(scope.to_string())
            .or_default()
            .insert(cost_line_id);
        *self = Self::Keyed(scopes);
        inserted
    }

    fn into_scopes(self) -> BTreeMap<String, BTreeSet<CostLineId>> {
        match self {
            Self::Legacy(ids) if ids.is_empty() => BTreeMap::new(),
            Self::Legacy(ids) => BTreeMap::from([(DEFAULT_SCOPE_KEY.to_string(), ids)]),
            Self::Keyed(scopes) => scopes,
        }
    }

    /// Decodes the persisted JSON column. Missing, blank or `null` is empty.
    pub fn decode(json: Option<&str>) -> Result<Self, EvaluationError> {
        match json.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(text) => Ok(serde_json::from_str::<Option<Self>>(text)?.unwrap_or_default()),
        }
    }

    /// Encodes for persistence, always in the keyed form.
    pub fn encode(&self) -> Result<String, EvaluationError> {
        Ok(serde_json::to_string(&self.clone().migrate())?)
    }
}

/// Reads an embedded tombstone field, treating `null` as empty.
pub(crate) fn deserialize_nullable<'de, D>(deserializer: D) -> Result<TombstoneStore, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<TombstoneStore>::deserialize(deserializer)?.unwrap_or_default())
}

/// Result of recording an explicit row deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TombstoneOutcome {
    /// The tombstone store changed; persist the evaluation.
    Recorded,
    /// The cost line was already hidden from this scope.
    AlreadyHidden,
    /// The row does not mirror a cost line; nothing to hide.
    NotApplicable,
}

/// Records that a user deleted `row`, hiding its cost line from the row's scope.
///
/// Other pricing scopes of the same evaluation are unaffected.
pub fn record_row_deletion(
    evaluation: &mut Evaluation,
    row: &EvaluationRow,
) -> Result<TombstoneOutcome, EvaluationError> {
    if row.evaluation_id != evaluation.id {
        return Err(EvaluationError::RowNotInEvaluation {
            row_id: row.id,
            evaluation_id: evaluation.id,
        });
    }

    let Some(cost_line_id) = row.cost_line_id.filter(|_| row.source == RowSource::CostPlan)
    else {
        return Ok(TombstoneOutcome::NotApplicable);
    };

    let scope = ScopeKey::from(row.evaluation_price_id);
    let was_legacy = evaluation.deleted_cost_line_ids.is_legacy();
    let inserted = evaluation.deleted_cost_line_ids.hide(scope, cost_line_id);

    if inserted {
        info!(
            evaluation_id = %evaluation.id,
            scope = %scope,
            cost_line_id = %cost_line_id,
            "Cost line hidden from evaluation scope"
        );
    }

    Ok(if inserted || was_legacy {
        TombstoneOutcome::Recorded
    } else {
        TombstoneOutcome::AlreadyHidden
    })
}
