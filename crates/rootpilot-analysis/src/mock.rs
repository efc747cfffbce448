//! Templated stand-in for a real analysis engine.
//!
//! The shape of every result is fixed; which templates are used is
//! picked from keywords in the incident text, and the numbers
//! (probabilities, confidence, chart values) are drawn from fixed
//! ranges. Nothing here is an analytical method.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rootpilot_core::models::action_item::Priority;
use rootpilot_core::models::incident::Incident;
use rootpilot_core::models::project::AnalysisProject;
use rootpilot_core::models::rca_result::{
    CausalChain, ConfidenceLevel, RecommendedAction, RiskInsights, RootCause, SimilarIncident,
    SupportingDocument, TimelineEvent, TimelineEventKind,
};
use serde_json::json;

use crate::engine::{
    AnalysisEngine, AnalysisSummary, CategoryCount, ChartData, IncidentAnalysis, ProjectAnalysis,
    ProjectRootCause, TimeSeriesPoint,
};

struct CauseTemplate {
    category: &'static str,
    keywords: &'static [&'static str],
    description: &'static str,
    evidence: &'static [&'static str],
    action: &'static str,
    action_detail: &'static str,
    team: &'static str,
}

const CAUSES: &[CauseTemplate] = &[
    CauseTemplate {
        category: "Mechanical",
        keywords: &["pump", "bearing", "vibration", "seal", "valve", "leak"],
        description: "Mechanical degradation of rotating equipment (bearing or seal wear)",
        evidence: &[
            "Vibration readings above alarm threshold before the event",
            "Maintenance interval exceeded for affected asset",
        ],
        action: "Inspect and overhaul affected rotating equipment",
        action_detail: "Replace worn bearings/seals and re-baseline vibration monitoring.",
        team: "Maintenance",
    },
    CauseTemplate {
        category: "Electrical",
        keywords: &["trip", "motor", "breaker", "power", "voltage", "electrical"],
        description: "Electrical protection trip caused by supply disturbance or overload",
        evidence: &[
            "Protection relay event logged at time of incident",
            "Motor current above nameplate rating in preceding interval",
        ],
        action: "Review protection settings and motor loading",
        action_detail: "Verify relay coordination and check motor winding insulation.",
        team: "Electrical Engineering",
    },
    CauseTemplate {
        category: "Process",
        keywords: &["temperature", "pressure", "flow", "level", "overheat", "process"],
        description: "Process parameter excursion outside the safe operating envelope",
        evidence: &[
            "Process variable trend shows excursion before the event",
            "Recent change to operating setpoints",
        ],
        action: "Tighten process alarm limits and review operating envelope",
        action_detail: "Add early-warning alarms and document safe operating limits.",
        team: "Process Engineering",
    },
    CauseTemplate {
        category: "Human Factors",
        keywords: &["operator", "procedure", "shift", "training", "manual", "human"],
        description: "Procedural deviation during operation or changeover",
        evidence: &[
            "Operator actions not aligned with written procedure",
            "Shift handover notes incomplete",
        ],
        action: "Update operating procedure and retrain affected crews",
        action_detail: "Revise procedure with lessons learned and run refresher training.",
        team: "Operations",
    },
    CauseTemplate {
        category: "Environmental",
        keywords: &["weather", "rain", "heat", "cold", "storm", "humidity"],
        description: "External environmental conditions stressing equipment",
        evidence: &[
            "Ambient conditions outside design range at time of event",
            "Similar events correlated with weather in site history",
        ],
        action: "Assess weather protection for exposed equipment",
        action_detail: "Evaluate enclosures, heat tracing or cooling for exposed assets.",
        team: "Reliability Engineering",
    },
];

/// Probability band for the cause at each rank.
const RANK_BANDS: [(f64, f64); 3] = [(0.72, 0.95), (0.48, 0.68), (0.22, 0.45)];
const DEADLINE_DAYS: [i64; 3] = [7, 14, 30];
const PRIORITIES: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

pub struct MockAnalysisEngine {
    rng: Mutex<StdRng>,
}

impl Default for MockAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAnalysisEngine {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Reproducible output for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Templates ordered by how many of their keywords appear in the
    /// text; ties keep declaration order.
    fn rank_templates(text: &str) -> Vec<&'static CauseTemplate> {
        let text = text.to_lowercase();
        let mut scored: Vec<(usize, usize, &CauseTemplate)> = CAUSES
            .iter()
            .enumerate()
            .map(|(idx, t)| {
                let hits = t.keywords.iter().filter(|k| text.contains(*k)).count();
                (hits, idx, t)
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        scored.into_iter().map(|(_, _, t)| t).collect()
    }
}

/// `at` moved by `delta`, or `at` itself if that leaves chrono's range.
fn shift(at: DateTime<Utc>, delta: Duration) -> DateTime<Utc> {
    at.checked_add_signed(delta).unwrap_or(at)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn supporting_documents(incident: &Incident) -> Vec<SupportingDocument> {
    let mut docs = vec![SupportingDocument {
        name: "Incident report".into(),
        doc_type: "report".into(),
    }];
    let sections = [
        (incident.system_data.is_some(), "System sensor logs", "data"),
        (incident.maintenance_history.is_some(), "Maintenance history", "record"),
        (incident.operator_factors.is_some(), "Operator statements", "interview"),
        (incident.environmental_factors.is_some(), "Environmental conditions", "data"),
        (incident.process_context.is_some(), "Process context", "diagram"),
        (incident.risk_compliance.is_some(), "Compliance register", "record"),
    ];
    docs.extend(
        sections
            .into_iter()
            .filter(|(present, _, _)| *present)
            .map(|(_, name, kind)| SupportingDocument {
                name: name.into(),
                doc_type: kind.into(),
            }),
    );
    docs
}

impl AnalysisEngine for MockAnalysisEngine {
    fn name(&self) -> &str {
        "mock-template"
    }

    fn analyze_incident(&self, incident: &Incident) -> IncidentAnalysis {
        let mut rng = self.rng.lock();
        let text = format!("{} {}", incident.title, incident.description);
        let templates = Self::rank_templates(&text);

        let root_causes: Vec<RootCause> = templates
            .iter()
            .zip(RANK_BANDS)
            .enumerate()
            .map(|(rank, (t, (lo, hi)))| {
                let probability = round2(rng.random_range(lo..hi));
                RootCause {
                    id: format!("rc-{}", rank + 1),
                    description: t.description.into(),
                    category: t.category.into(),
                    probability,
                    confidence: ConfidenceLevel::from_probability(probability),
                    evidence_indicators: t.evidence.iter().map(|e| (*e).into()).collect(),
                }
            })
            .collect();

        let at = incident.incident_date;
        let primary = templates[0];
        let causal_chain = CausalChain {
            timeline: vec![
                TimelineEvent {
                    time: shift(at, Duration::minutes(-30)),
                    event: format!("Early {} warning signs", primary.category.to_lowercase()),
                    kind: TimelineEventKind::Trigger,
                },
                TimelineEvent {
                    time: at,
                    event: incident.title.clone(),
                    kind: TimelineEventKind::Failure,
                },
                TimelineEvent {
                    time: shift(at, Duration::minutes(5)),
                    event: "Downstream equipment affected".into(),
                    kind: TimelineEventKind::Cascade,
                },
                TimelineEvent {
                    time: shift(at, Duration::minutes(20)),
                    event: "Unit stabilised and investigation opened".into(),
                    kind: TimelineEventKind::Outcome,
                },
            ],
            pathway: root_causes
                .iter()
                .map(|c| c.category.as_str())
                .chain(std::iter::once("incident"))
                .collect::<Vec<_>>()
                .join(" -> "),
        };

        let mut recommended_actions: Vec<RecommendedAction> = templates
            .iter()
            .take(RANK_BANDS.len())
            .enumerate()
            .map(|(rank, t)| RecommendedAction {
                title: t.action.into(),
                description: t.action_detail.into(),
                priority: PRIORITIES[rank],
                responsible_team: t.team.into(),
                suggested_deadline: Some(
                    shift(at, Duration::days(DEADLINE_DAYS[rank]))
                        .format("%Y-%m-%d")
                        .to_string(),
                ),
                category: t.category.into(),
            })
            .collect();
        recommended_actions.push(RecommendedAction {
            title: "Share lessons learned across sites".into(),
            description: "Publish a one-page summary of this analysis to peer units.".into(),
            priority: Priority::Low,
            responsible_team: "HSE".into(),
            suggested_deadline: None,
            category: "Preventive".into(),
        });

        let similar = rng.random_range(0..=2);
        let risk_insights = RiskInsights {
            similar_incidents: (0..similar)
                .map(|i| SimilarIncident {
                    date: shift(at, Duration::days(-rng.random_range(30..365i64)))
                        .format("%Y-%m-%d")
                        .to_string(),
                    description: format!("Prior {} event #{}", primary.category, i + 1),
                    correlation: round2(rng.random_range(0.5..0.9)),
                })
                .collect(),
            trends: vec![
                format!("{} issues trending upward this quarter", primary.category),
                "Most events cluster around shift changeover".into(),
            ],
        };

        let confidence_rating = rng.random_range(60..=95u8);

        IncidentAnalysis {
            root_causes,
            causal_chain,
            recommended_actions,
            supporting_documents: supporting_documents(incident),
            risk_insights,
            confidence_rating,
            metadata: json!({
                "engine": self.name(),
                "generatedAt": Utc::now(),
                "matchedCategory": primary.category,
            }),
        }
    }

    fn analyze_project(&self, _project: &AnalysisProject, analysis_type: &str) -> ProjectAnalysis {
        let mut rng = self.rng.lock();
        let now = Utc::now();
        let today = now.date_naive();

        let time_series_data = (0..30)
            .map(|i| TimeSeriesPoint {
                date: (today - Duration::days(29 - i)).format("%Y-%m-%d").to_string(),
                value: rng.random_range(50.0..150.0),
                anomaly: rng.random_bool(0.2),
            })
            .collect();

        ProjectAnalysis {
            analysis_type: analysis_type.to_string(),
            timestamp: now,
            summary: AnalysisSummary {
                total_data_points: rng.random_range(100..1100),
                identified_issues: rng.random_range(1..=10),
                confidence_score: round2(rng.random_range(0.70..=1.0)),
            },
            root_causes: vec![
                ProjectRootCause {
                    id: "1".into(),
                    description: "Equipment vibration exceeding normal parameters".into(),
                    probability: 0.85,
                    impact: "High".into(),
                    category: "Mechanical".into(),
                },
                ProjectRootCause {
                    id: "2".into(),
                    description: "Temperature fluctuations in Process Unit A".into(),
                    probability: 0.72,
                    impact: "Medium".into(),
                    category: "Process".into(),
                },
                ProjectRootCause {
                    id: "3".into(),
                    description: "Inconsistent raw material quality".into(),
                    probability: 0.68,
                    impact: "Medium".into(),
                    category: "Material".into(),
                },
            ],
            recommendations: vec![
                "Schedule immediate equipment inspection and calibration".into(),
                "Implement enhanced temperature monitoring system".into(),
                "Review supplier quality standards and contracts".into(),
            ],
            chart_data: ChartData {
                time_series_data,
                category_data: vec![
                    CategoryCount {
                        category: "Mechanical".into(),
                        count: 3,
                        severity: "High".into(),
                    },
                    CategoryCount {
                        category: "Process".into(),
                        count: 2,
                        severity: "Medium".into(),
                    },
                    CategoryCount {
                        category: "Material".into(),
                        count: 1,
                        severity: "Low".into(),
                    },
                    CategoryCount {
                        category: "Environmental".into(),
                        count: 1,
                        severity: "Low".into(),
                    },
                ],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rootpilot_core::models::incident::IncidentStatus;
    use rootpilot_core::models::project::ProjectStatus;
    use uuid::Uuid;

    fn incident(title: &str, description: &str) -> Incident {
        let now = Utc::now();
        Incident {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            incident_date: Utc.with_ymd_and_hms(2024, 1, 15, 14, 2, 0).unwrap(),
            location: None,
            affected_assets: None,
            system_data: None,
            maintenance_history: Some(json!({"overdueForMaintenance": true})),
            operator_factors: None,
            environmental_factors: None,
            process_context: None,
            risk_compliance: None,
            attachments: None,
            status: IncidentStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn keywords_pick_the_primary_category() {
        let engine = MockAnalysisEngine::with_seed(7);
        let out = engine.analyze_incident(&incident(
            "Pump Trip",
            "Pump bearing vibration alarm before the seal failed",
        ));
        assert_eq!(out.root_causes[0].category, "Mechanical");

        let out = engine.analyze_incident(&incident(
            "Reactor excursion",
            "Temperature and pressure rose past the high alarm",
        ));
        assert_eq!(out.root_causes[0].category, "Process");
    }

    #[test]
    fn incident_result_has_fixed_shape() {
        let engine = MockAnalysisEngine::new();
        let inc = incident("Pump Trip", "Unexpected pump trip at 14:02");
        let out = engine.analyze_incident(&inc);

        assert_eq!(out.root_causes.len(), 3);
        assert!(out.confidence_rating <= 100);
        assert!((60..=95).contains(&out.confidence_rating));
        assert_eq!(out.recommended_actions.len(), 4);
        assert_eq!(out.recommended_actions[0].priority, Priority::High);

        // Probabilities descend by rank.
        let p: Vec<f64> = out.root_causes.iter().map(|c| c.probability).collect();
        assert!(p[0] > p[1] && p[1] > p[2], "{p:?}");

        // Timeline is chronological and pivots on the incident time.
        let times: Vec<_> = out.causal_chain.timeline.iter().map(|e| e.time).collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(out.causal_chain.timeline[1].time, inc.incident_date);

        // Only provided context sections show up as documents.
        let names: Vec<_> = out.supporting_documents.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Incident report", "Maintenance history"]);
        assert_eq!(out.metadata["engine"], "mock-template");
    }

    #[test]
    fn dates_at_the_edge_of_the_calendar_are_clamped() {
        let engine = MockAnalysisEngine::with_seed(3);
        for edge in [DateTime::<Utc>::MAX_UTC, DateTime::<Utc>::MIN_UTC] {
            let mut inc = incident("Pump Trip", "Unexpected pump trip at 14:02");
            inc.incident_date = edge;
            let out = engine.analyze_incident(&inc);

            let times: Vec<_> = out.causal_chain.timeline.iter().map(|e| e.time).collect();
            assert!(times.windows(2).all(|w| w[0] <= w[1]));
            assert_eq!(out.causal_chain.timeline[1].time, edge);
            assert!(out.recommended_actions[0].suggested_deadline.is_some());
        }
    }

    #[test]
    fn same_seed_same_numbers() {
        let inc = incident("Pump Trip", "Unexpected pump trip at 14:02");
        let a = MockAnalysisEngine::with_seed(42).analyze_incident(&inc);
        let b = MockAnalysisEngine::with_seed(42).analyze_incident(&inc);
        assert_eq!(a.confidence_rating, b.confidence_rating);
        assert_eq!(a.root_causes, b.root_causes);
    }

    #[test]
    fn project_analysis_ranges() {
        let now = Utc::now();
        let project = AnalysisProject {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Line 2 downtime".into(),
            description: None,
            status: ProjectStatus::Active,
            data_file_url: None,
            analysis_results: None,
            created_at: now,
            updated_at: now,
        };
        let out = MockAnalysisEngine::new().analyze_project(&project, "root_cause");

        assert_eq!(out.analysis_type, "root_cause");
        assert!((100..1100).contains(&out.summary.total_data_points));
        assert!((1..=10).contains(&out.summary.identified_issues));
        assert!((0.70..=1.0).contains(&out.summary.confidence_score));
        assert_eq!(out.root_causes.len(), 3);
        assert_eq!(out.recommendations.len(), 3);
        assert_eq!(out.chart_data.time_series_data.len(), 30);
        assert_eq!(out.chart_data.category_data.len(), 4);
        assert!(
            out.chart_data
                .time_series_data
                .iter()
                .all(|p| (50.0..150.0).contains(&p.value))
        );
        assert_eq!(
            out.chart_data.time_series_data[29].date,
            now.date_naive().format("%Y-%m-%d").to_string()
        );
    }
}
