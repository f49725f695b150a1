//! Simulation snapshot record.
//!
//! The portal stores every simulation a logged-in client runs so the
//! accountant can review it later. The engine never talks to that
//! persistence collaborator itself; it only packages a record the
//! caller can forward.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// Which simulator produced a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationKind {
    /// Annual income tax (IRPF) regime comparison.
    IncomeTax,
    /// Social-security (INSS) contribution.
    Contribution,
    /// Pro-labore withholding.
    Withholding,
}

/// A persistable record of one simulation run.
///
/// Inputs and results are stored as JSON values so the persistence
/// layer can keep them schema-free.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSnapshot {
    /// Unique id for this snapshot.
    pub id: Uuid,
    /// Identity of the user who ran the simulation.
    pub user_id: String,
    /// When the simulation ran.
    pub created_at: DateTime<Utc>,
    /// Which simulator produced it.
    pub kind: SimulationKind,
    /// The reference-table year the computation used.
    pub table_year: i32,
    /// The input record, as JSON.
    pub input: serde_json::Value,
    /// The computed result, as JSON.
    pub result: serde_json::Value,
}

impl SimulationSnapshot {
    /// Packages a simulation run into a snapshot the caller can forward
    /// to its persistence collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SnapshotEncode`] if the input or result
    /// cannot be encoded as JSON.
    pub fn new<I, R>(
        user_id: impl Into<String>,
        kind: SimulationKind,
        table_year: i32,
        input: &I,
        result: &R,
    ) -> EngineResult<Self>
    where
        I: Serialize,
        R: Serialize,
    {
        let encode = |e: serde_json::Error| EngineError::SnapshotEncode {
            message: e.to_string(),
        };

        Ok(Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            created_at: Utc::now(),
            kind,
            table_year,
            input: serde_json::to_value(input).map_err(encode)?,
            result: serde_json::to_value(result).map_err(encode)?,
        })
    }
}
