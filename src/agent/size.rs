//! SizeValidationAgent: ISO compliance review of a sock size. No model call.

use super::runner::{Outcome, run_agent};
use super::{AgentKind, AgentReport, Clients, Vote};
use crate::error::Result;
use crate::input::SockInput;
use chrono::{DateTime, Utc};
use serde::Serialize;

const COST: f64 = 0.0001;

/// One entry of the size standards table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeStandard {
    pub designation: &'static str,
    pub iso_code: &'static str,
    pub foot_length_mm: (u16, u16),
    pub eu_size: (u8, u8),
    pub us_size: (u8, u8),
    pub classification: &'static str,
}

pub const SIZE_STANDARDS: [SizeStandard; 4] = [
    SizeStandard {
        designation: "small",
        iso_code: "ISO-3635-S",
        foot_length_mm: (220, 245),
        eu_size: (35, 38),
        us_size: (5, 7),
        classification: "Category A - Compact Foot Coverage",
    },
    SizeStandard {
        designation: "medium",
        iso_code: "ISO-3635-M",
        foot_length_mm: (245, 270),
        eu_size: (39, 42),
        us_size: (7, 10),
        classification: "Category B - Standard Foot Coverage",
    },
    SizeStandard {
        designation: "large",
        iso_code: "ISO-3635-L",
        foot_length_mm: (270, 295),
        eu_size: (43, 46),
        us_size: (10, 13),
        classification: "Category C - Extended Foot Coverage",
    },
    SizeStandard {
        designation: "extra-large",
        iso_code: "ISO-3635-XL",
        foot_length_mm: (295, 320),
        eu_size: (47, 50),
        us_size: (13, 16),
        classification: "Category D - Maximum Foot Coverage",
    },
];

/// Find the standard for a size designation, ignoring case and padding.
pub fn lookup_standard(size: &str) -> Option<&'static SizeStandard> {
    let wanted = size.trim().to_lowercase();
    SIZE_STANDARDS.iter().find(|s| s.designation == wanted)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeValidation {
    pub is_valid: bool,
    pub iso_compliance: String,
    pub size_category: String,
    pub compliance_report: String,
}

impl SizeValidation {
    pub fn assess(size: &str, at: DateTime<Utc>) -> Self {
        match lookup_standard(size) {
            Some(standard) => Self {
                is_valid: true,
                iso_compliance: standard.iso_code.to_string(),
                size_category: standard.classification.to_string(),
                compliance_report: compliant_report(size, standard, at),
            },
            None => Self {
                is_valid: false,
                iso_compliance: "NON-COMPLIANT".to_string(),
                size_category: "Unclassified".to_string(),
                compliance_report: non_compliant_report(size, at),
            },
        }
    }
}

fn compliant_report(size: &str, standard: &SizeStandard, at: DateTime<Utc>) -> String {
    format!(
        "SIZE VALIDATION REPORT
=======================
Subject: \"{size}\"
Standard: ISO 3635:1981 (Clothing sizes - Definitions and body measurement procedures)
Status: FULLY COMPLIANT

ISO CLASSIFICATION:
- Code: {code}
- Category: {category}
- Foot Length Range: {fl_min}mm - {fl_max}mm
- EU Size Equivalent: {eu_min} - {eu_max}
- US Size Equivalent: {us_min} - {us_max}

CERTIFICATION:
This sock size has been validated against international standards and is
approved for cross-border sock matching operations. The size designation
meets all requirements specified in ISO 3635:1981, Annex B, Section 4.2.1
(Hosiery and Foot Coverings).

COMPLIANCE SCORE: 100/100

Report generated: {generated}
Validation Authority: Sock Matcher ISO Compliance Division
Certificate ID: SM-ISO-{certificate}",
        code = standard.iso_code,
        category = standard.classification,
        fl_min = standard.foot_length_mm.0,
        fl_max = standard.foot_length_mm.1,
        eu_min = standard.eu_size.0,
        eu_max = standard.eu_size.1,
        us_min = standard.us_size.0,
        us_max = standard.us_size.1,
        generated = at.to_rfc3339(),
        certificate = at.timestamp_millis(),
    )
}

fn non_compliant_report(size: &str, at: DateTime<Utc>) -> String {
    let accepted: Vec<String> = SIZE_STANDARDS
        .iter()
        .map(|s| format!("- {} ({})", s.designation, s.iso_code))
        .collect();

    format!(
        "SIZE VALIDATION REPORT
=======================
Subject: \"{size}\"
Standard: ISO 3635:1981 (Clothing sizes - Definitions and body measurement procedures)
Status: NON-COMPLIANT

FINDINGS:
The submitted size designation \"{size}\" does not conform to any recognized
ISO standard size category. This sock cannot be certified for international
matching compatibility.

RECOMMENDATION:
Please resubmit with a valid ISO-compliant size designation:
{accepted}

Report generated: {generated}
Validation Authority: Sock Matcher ISO Compliance Division",
        accepted = accepted.join("\n"),
        generated = at.to_rfc3339(),
    )
}

/// Check the sock's size against the standards table.
pub fn validate(clients: &Clients<'_>, input: &SockInput) -> Result<AgentReport<SizeValidation>> {
    run_agent(AgentKind::Size, clients.bus, input, || {
        let validation = SizeValidation::assess(&input.size, Utc::now());
        let (vote, confidence) = if validation.is_valid {
            (Vote::For, 100)
        } else {
            (Vote::Against, 0)
        };
        Ok(Outcome::fixed_cost(vote, confidence, COST, validation))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::events::DetailType;
    use crate::test_support::{MemoryEventSink, ScriptedModel};

    #[test]
    fn lookup_ignores_case_and_padding() {
        assert_eq!(lookup_standard(" LARGE ").unwrap().iso_code, "ISO-3635-L");
        assert_eq!(lookup_standard("Extra-Large").unwrap().iso_code, "ISO-3635-XL");
        assert!(lookup_standard("xxl").is_none());
        assert!(lookup_standard("").is_none());
    }

    #[test]
    fn compliant_report_lists_ranges() {
        let validation = SizeValidation::assess("Medium", Utc::now());
        assert!(validation.is_valid);
        assert_eq!(validation.iso_compliance, "ISO-3635-M");
        assert_eq!(validation.size_category, "Category B - Standard Foot Coverage");
        assert!(validation.compliance_report.contains("Subject: \"Medium\""));
        assert!(validation.compliance_report.contains("245mm - 270mm"));
        assert!(validation.compliance_report.contains("EU Size Equivalent: 39 - 42"));
        assert!(validation.compliance_report.contains("FULLY COMPLIANT"));
    }

    #[test]
    fn unknown_size_is_non_compliant() {
        let validation = SizeValidation::assess("gigantic", Utc::now());
        assert!(!validation.is_valid);
        assert_eq!(validation.iso_compliance, "NON-COMPLIANT");
        assert_eq!(validation.size_category, "Unclassified");
        assert!(validation.compliance_report.contains("Status: NON-COMPLIANT"));
        assert!(validation.compliance_report.contains("- extra-large (ISO-3635-XL)"));
    }

    #[test]
    fn validate_never_calls_the_model() {
        let model = ScriptedModel::failing("should not be called");
        let (bus, sink) = MemoryEventSink::bus();
        let config = Config::default();
        let clients = Clients::new(&model, &bus, &config);

        let report = validate(&clients, &SockInput::new("s1", "red", "small")).unwrap();

        assert_eq!(model.call_count(), 0);
        assert_eq!(report.vote, Vote::For);
        assert_eq!(report.confidence, 100);
        assert_eq!(report.cost, 0.0001);
        assert_eq!(
            sink.detail_types(),
            vec![DetailType::SizeAgentStarted, DetailType::SizeAgentCompleted]
        );
    }

    #[test]
    fn unknown_size_votes_against() {
        let model = ScriptedModel::failing("unused");
        let (bus, _sink) = MemoryEventSink::bus();
        let config = Config::default();
        let clients = Clients::new(&model, &bus, &config);

        let report = validate(&clients, &SockInput::new("s1", "red", "unknown")).unwrap();
        assert_eq!(report.vote, Vote::Against);
        assert_eq!(report.confidence, 0);
    }
}
