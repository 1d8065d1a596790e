//! Report output model for headless book runs.

use anyhow::Result;
use folio_theme::ThemeMode;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// Book state at the end of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalState {
    pub page: Option<usize>,
    pub total_pages: usize,
    pub transitioning: bool,
    pub menu_open: bool,
    pub theme: ThemeMode,
    pub sound_enabled: bool,
    pub page_numbers: (u32, u32),
    pub navigated: Vec<String>,
}

/// Machine-readable result of a headless run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessReport {
    pub status: ReportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    pub failed_step_index: Option<usize>,
    pub assertion: Option<String>,
    pub message: Option<String>,
    pub elapsed_ms: u64,
    pub state: FinalState,
}

impl HeadlessReport {
    pub fn passed(scenario: Option<String>, elapsed_ms: u64, state: FinalState) -> Self {
        Self {
            status: ReportStatus::Passed,
            scenario,
            failed_step_index: None,
            assertion: None,
            message: None,
            elapsed_ms,
            state,
        }
    }

    pub fn failed(
        scenario: Option<String>,
        assertion: &str,
        failed_step_index: usize,
        message: String,
        elapsed_ms: u64,
        state: FinalState,
    ) -> Self {
        Self {
            status: ReportStatus::Failed,
            scenario,
            failed_step_index: Some(failed_step_index),
            assertion: Some(assertion.to_string()),
            message: Some(message),
            elapsed_ms,
            state,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == ReportStatus::Failed
    }

    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        writer.write_all(payload.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
