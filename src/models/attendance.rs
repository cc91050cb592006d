use serde::{Deserialize, Serialize};

/// One subject's attended/total count pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub subject: String,
    pub attended: u32,
    pub total: u32,
}

/// Normalized attendance summary for one student.
///
/// Wire field names match the upstream-facing JSON the original service
/// produced, casing quirks included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub name: String,
    #[serde(rename = "Uni_Reg_No")]
    pub uni_reg_no: String,
    #[serde(rename = "Roll_no")]
    pub roll_no: String,
    pub duty_leave: String,
    pub attendance_data: Vec<AttendanceEntry>,
}
