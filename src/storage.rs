use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

use crate::state::PlanState;

/// Storage key of the current persisted shape. Bump the suffix whenever the shape of
/// `PlanState` changes incompatibly; records under another key are not read.
pub const STORAGE_KEY: &str = "fit_plan_v2";
pub const DEFAULT_STATE_FILE: &str = "fit_plan_v2.json";

#[derive(Debug, Serialize, Deserialize)]
struct StoredPlan {
    storage_key: String,
    state: PlanState,
}

/// Loads the plan state. A missing file gives the default state; so does an unreadable
/// record or one saved under another storage key, after a warning.
pub async fn load_state(path: &Path) -> Result<PlanState> {
    if !fs::try_exists(path)
        .await
        .with_context(|| format!("Failed to check state file at {:?}", path))?
    {
        debug!(?path, "no state file yet, starting fresh");
        return Ok(PlanState::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read state file at {:?}", path))?;
    match serde_json::from_str::<StoredPlan>(&raw) {
        Ok(stored) if stored.storage_key == STORAGE_KEY => Ok(stored.state),
        Ok(stored) => {
            warn!(found = %stored.storage_key, expected = STORAGE_KEY, "state file has another storage key, ignoring it");
            Ok(PlanState::default())
        }
        Err(e) => {
            warn!(error = %e, ?path, "state file is not a readable plan, ignoring it");
            Ok(PlanState::default())
        }
    }
}

pub async fn save_state(path: &Path, state: &PlanState) -> Result<()> {
    let stored = StoredPlan {
        storage_key: STORAGE_KEY.to_string(),
        state: state.clone(),
    };
    let json = serde_json::to_string_pretty(&stored).context("Failed to serialize plan state")?;
    fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write state file at {:?}", path))?;
    debug!(?path, "saved plan state");
    Ok(())
}
