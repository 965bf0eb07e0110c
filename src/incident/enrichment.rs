//! Enrichment sub-objects -- structured impact and technique data derived
//! upstream from raw incident text. All fields are optional: unenriched
//! incidents carry none of this.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimelineEvent {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub date_precision: Option<String>,
    #[serde(default)]
    pub event_description: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub actor_attribution: Option<String>,
    #[serde(default)]
    pub indicators: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MitreTechnique {
    #[serde(default)]
    pub technique_id: Option<String>,
    #[serde(default)]
    pub technique_name: Option<String>,
    #[serde(default)]
    pub tactic: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sub_techniques: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttackDynamics {
    #[serde(default)]
    pub attack_vector: Option<String>,
    #[serde(default)]
    pub attack_chain: Vec<String>,
    #[serde(default)]
    pub ransomware_family: Option<String>,
    #[serde(default)]
    pub data_exfiltration: Option<bool>,
    #[serde(default)]
    pub encryption_impact: Option<String>,
    #[serde(default)]
    pub ransom_demanded: Option<bool>,
    #[serde(default)]
    pub ransom_amount: Option<f64>,
    #[serde(default)]
    pub ransom_paid: Option<bool>,
    #[serde(default)]
    pub recovery_timeframe_days: Option<u32>,
    #[serde(default)]
    pub business_impact: Option<String>,
    #[serde(default)]
    pub operational_impact: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataImpact {
    #[serde(default)]
    pub data_breached: Option<bool>,
    #[serde(default)]
    pub data_exfiltrated: Option<bool>,
    #[serde(default)]
    pub data_categories: Vec<String>,
    #[serde(default)]
    pub records_affected_exact: Option<u64>,
    #[serde(default)]
    pub records_affected_min: Option<u64>,
    #[serde(default)]
    pub records_affected_max: Option<u64>,
    #[serde(default)]
    pub pii_records_leaked: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemImpact {
    #[serde(default)]
    pub systems_affected: Vec<String>,
    #[serde(default)]
    pub critical_systems_affected: Option<bool>,
    #[serde(default)]
    pub network_compromised: Option<bool>,
    #[serde(default)]
    pub email_system_affected: Option<bool>,
    #[serde(default)]
    pub student_portal_affected: Option<bool>,
    #[serde(default)]
    pub research_systems_affected: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserImpact {
    #[serde(default)]
    pub students_affected: Option<u64>,
    #[serde(default)]
    pub staff_affected: Option<u64>,
    #[serde(default)]
    pub faculty_affected: Option<u64>,
    #[serde(default)]
    pub alumni_affected: Option<u64>,
    #[serde(default)]
    pub total_individuals_affected: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialImpact {
    #[serde(default)]
    pub estimated_total_cost_usd: Option<f64>,
    #[serde(default)]
    pub ransom_cost_usd: Option<f64>,
    #[serde(default)]
    pub recovery_cost_usd: Option<f64>,
    #[serde(default)]
    pub legal_cost_usd: Option<f64>,
    #[serde(default)]
    pub insurance_claim: Option<bool>,
    #[serde(default)]
    pub insurance_payout_usd: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegulatoryImpact {
    #[serde(default)]
    pub applicable_regulations: Vec<String>,
    #[serde(default)]
    pub breach_notification_required: Option<bool>,
    #[serde(default)]
    pub notification_sent: Option<bool>,
    #[serde(default)]
    pub fine_imposed: Option<bool>,
    #[serde(default)]
    pub fine_amount_usd: Option<f64>,
    #[serde(default)]
    pub lawsuits_filed: Option<bool>,
    #[serde(default)]
    pub class_action_filed: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecoveryMetrics {
    #[serde(default)]
    pub recovery_method: Option<String>,
    #[serde(default)]
    pub recovery_duration_days: Option<u32>,
    #[serde(default)]
    pub law_enforcement_involved: Option<bool>,
    #[serde(default)]
    pub ir_firm_engaged: Option<String>,
    #[serde(default)]
    pub security_improvements: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransparencyMetrics {
    #[serde(default)]
    pub public_disclosure: Option<bool>,
    #[serde(default)]
    pub public_disclosure_date: Option<String>,
    #[serde(default)]
    pub disclosure_delay_days: Option<u32>,
    #[serde(default)]
    pub transparency_level: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EducationRelevance {
    #[serde(default)]
    pub is_education_related: Option<bool>,
    #[serde(default)]
    pub education_confidence: Option<f64>,
}
