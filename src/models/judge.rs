use serde::{Deserialize, Deserializer, Serialize};

/// Payload accepted by the judge's `POST /submissions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub source_code: String,
    pub language_id: u32,
    pub stdin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
    pub cpu_time_limit: f64,
    /// Kilobytes.
    pub memory_limit: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionToken {
    pub token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JudgeStatus {
    InQueue,
    Processing,
    Accepted,
    WrongAnswer,
    TimeLimitExceeded,
    CompilationError,
    RuntimeSigsegv,
    RuntimeSigxfsz,
    RuntimeSigfpe,
    RuntimeSigabrt,
    RuntimeNzec,
    RuntimeOther,
    InternalError,
    ExecFormatError,
    Unknown(u32),
}

impl JudgeStatus {
    pub fn from_id(id: u32) -> Self {
        match id {
            1 => Self::InQueue,
            2 => Self::Processing,
            3 => Self::Accepted,
            4 => Self::WrongAnswer,
            5 => Self::TimeLimitExceeded,
            6 => Self::CompilationError,
            7 => Self::RuntimeSigsegv,
            8 => Self::RuntimeSigxfsz,
            9 => Self::RuntimeSigfpe,
            10 => Self::RuntimeSigabrt,
            11 => Self::RuntimeNzec,
            12 => Self::RuntimeOther,
            13 => Self::InternalError,
            14 => Self::ExecFormatError,
            other => Self::Unknown(other),
        }
    }

    pub fn is_pending(self) -> bool {
        matches!(self, Self::InQueue | Self::Processing)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusInfo {
    pub id: u32,
    #[serde(default)]
    pub description: Option<String>,
}

impl StatusInfo {
    pub fn status(&self) -> JudgeStatus {
        JudgeStatus::from_id(self.id)
    }
}

/// Body of `GET /submissions/{token}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub status: StatusInfo,
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub compile_output: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Judge0 reports CPU time as a decimal string, e.g. `"0.012"`.
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub time: Option<f64>,
    /// Kilobytes.
    #[serde(default)]
    pub memory: Option<f64>,
}

fn lenient_seconds<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        _ => None,
    })
}
