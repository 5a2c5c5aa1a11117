use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use super::adjustment::{self, AdjustmentSignal};
use super::components::{self, clamp_score, ComponentScores};
use super::config::{Confidence, ScoringConfig};
use super::explain::{explain, ExplanationInput};
use super::extract::extract_number;
use super::industry::{classify, search_text};
use super::record::{EntityRecord, Field};
use super::rules::CompiledRules;
use super::validation::validate_scoring;
use crate::error::{ConfigError, ScoreError};

/// Name recorded for batch entries that arrive without one.
pub const UNKNOWN_ENTITY: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Target,
    NonTarget,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Target => "target",
            Priority::NonTarget => "non_target",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub entity_name: String,
    pub components: ComponentScores,
    pub base_score: f64,
    pub detected_industry: String,
    pub industry_confidence: Confidence,
    pub industry_multiplier: f64,
    pub industry_explanation: String,
    pub industry_adjusted_score: f64,
    pub adjustment: f64,
    pub adjustment_signals: Vec<AdjustmentSignal>,
    pub final_score: f64,
    pub priority: Priority,
    pub reasoning: String,
    #[serde(rename = "processing_time_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

impl ScoreResult {
    pub fn is_target(&self) -> bool {
        self.priority == Priority::Target
    }
}

fn serialize_millis<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64() * 1000.0)
}

/// One entity handed to batch scoring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityInput {
    pub name: String,
    pub attributes: Map<String, Value>,
}

impl EntityInput {
    pub fn new(name: impl Into<String>, attributes: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }
}

/// Per-entity batch result. Failures carry the entity name (or
/// [`UNKNOWN_ENTITY`]) so the batch can continue.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    Scored(ScoreResult),
    Failed { entity_name: String, error: String },
}

impl BatchOutcome {
    pub fn entity_name(&self) -> &str {
        match self {
            BatchOutcome::Scored(result) => &result.entity_name,
            BatchOutcome::Failed { entity_name, .. } => entity_name,
        }
    }

    pub fn result(&self) -> Option<&ScoreResult> {
        match self {
            BatchOutcome::Scored(result) => Some(result),
            BatchOutcome::Failed { .. } => None,
        }
    }
}

/// Immutable scoring engine. Build once at startup and share by reference;
/// it holds no mutable state, so concurrent calls need no locking.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    rules: CompiledRules,
}

impl ScoringEngine {
    /// Validate and compile `config`.
    pub fn new(config: ScoringConfig) -> Result<Self, ConfigError> {
        validate_scoring(&config).map_err(ConfigError::new)?;
        let rules = CompiledRules::compile(config)
            .map_err(|e| ConfigError::new(vec![format!("{:#}", e)]))?;
        Ok(Self { rules })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.rules.config
    }

    pub fn reference_year(&self) -> i32 {
        self.rules.reference_year
    }

    /// Score one entity. Malformed or missing attributes never fail; only an
    /// empty name does.
    pub fn score(&self, name: &str, attributes: &Map<String, Value>) -> Result<ScoreResult, ScoreError> {
        self.score_record(name, &EntityRecord::from_map(attributes))
    }

    pub fn score_record(&self, name: &str, record: &EntityRecord) -> Result<ScoreResult, ScoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ScoreError::EmptyName);
        }

        let start = Instant::now();
        let rules = &self.rules;
        let config = &rules.config;

        // Layer 1: weighted base components
        let components = components::evaluate_all(name, record, rules);
        let base_score = clamp_score(components::weighted_sum(
            &components,
            &config.weights.as_array(),
        ));

        // Layer 2: industry multiplier
        let text = search_text(
            name,
            &record.text(Field::Industry),
            &record.text(Field::Description),
        );
        let industry = classify(&config.industries, &text);
        let industry_adjusted_score = clamp_score(base_score * industry.multiplier);

        // Layer 3: bounded heuristic adjustment
        let adjustment = adjustment::evaluate(record, rules);
        let final_score = clamp_score(industry_adjusted_score + adjustment.value);

        let priority = if final_score >= config.target_threshold {
            Priority::Target
        } else {
            Priority::NonTarget
        };

        let employees = record.get(Field::Employees).map(extract_number).unwrap_or(0);
        let geo_tier = rules
            .geography
            .locate(&record.lowercase_text(Field::City));
        let reasoning = explain(
            &ExplanationInput {
                final_score,
                industry: &industry,
                employees,
                geo_tier,
            },
            rules,
        );

        tracing::debug!(
            entity = name,
            base_score,
            industry = %industry.tag,
            multiplier = industry.multiplier,
            adjustment = adjustment.value,
            final_score,
            priority = %priority,
            "scored entity"
        );

        Ok(ScoreResult {
            entity_name: name.to_string(),
            components,
            base_score,
            industry_explanation: industry.explanation(),
            detected_industry: industry.tag,
            industry_confidence: industry.confidence,
            industry_multiplier: industry.multiplier,
            industry_adjusted_score,
            adjustment: adjustment.value,
            adjustment_signals: adjustment.signals,
            final_score,
            priority,
            reasoning,
            elapsed: start.elapsed(),
        })
    }

    /// Score entities in input order. A failure (empty name, or a panic
    /// inside scoring) becomes a [`BatchOutcome::Failed`] entry and the
    /// remaining entities are still scored.
    pub fn score_all<I>(&self, entities: I) -> Vec<BatchOutcome>
    where
        I: IntoIterator<Item = EntityInput>,
    {
        entities
            .into_iter()
            .enumerate()
            .map(|(index, entity)| {
                isolate(index, &entity.name, || {
                    self.score(&entity.name, &entity.attributes)
                })
            })
            .collect()
    }
}

/// Run one batch entry's scorer, turning an error or a panic into
/// [`BatchOutcome::Failed`] so the rest of the batch can continue.
fn isolate<F>(index: usize, name: &str, score: F) -> BatchOutcome
where
    F: FnOnce() -> Result<ScoreResult, ScoreError>,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(score))
        .unwrap_or_else(|payload| Err(ScoreError::Internal(panic_message(payload.as_ref()))));

    match outcome {
        Ok(result) => BatchOutcome::Scored(result),
        Err(error) => {
            let entity_name = match name.trim() {
                "" => UNKNOWN_ENTITY.to_string(),
                name => name.to_string(),
            };
            tracing::warn!(index, entity = %entity_name, %error, "failed to score entity");
            BatchOutcome::Failed {
                entity_name,
                error: error.to_string(),
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn engine() -> ScoringEngine {
        ScoringEngine::new(ScoringConfig {
            reference_year: Some(2025),
            ..ScoringConfig::default()
        })
        .unwrap()
    }

    fn attrs(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_empty_record_floor() {
        let result = engine().score("Unknown Co", &Map::new()).unwrap();
        // 0.35*30 + 0.25*40 + 0.20*30 + 0.10*40 + 0.10*30
        assert!((result.base_score - 33.5).abs() < 1e-9);
        assert_eq!(result.detected_industry, "other");
        assert_eq!(result.industry_multiplier, 1.0);
        assert_eq!(result.industry_confidence, Confidence::Low);
        assert_eq!(result.adjustment, 0.0);
        assert!((result.final_score - 33.5).abs() < 1e-9);
        assert_eq!(result.priority, Priority::NonTarget);
        assert_eq!(result.reasoning, "Below target threshold • Industry: other (×1.00)");
    }

    #[test]
    fn test_empty_name_rejected() {
        assert_eq!(
            engine().score("   ", &Map::new()).unwrap_err(),
            ScoreError::EmptyName
        );
    }

    #[test]
    fn test_name_is_trimmed() {
        let result = engine().score("  Acme  ", &Map::new()).unwrap();
        assert_eq!(result.entity_name, "Acme");
    }

    #[test]
    fn test_three_layer_composition() {
        let result = engine()
            .score(
                "Anadolu Enerji",
                &attrs(json!({
                    "industry": "Utilities",
                    "employees": 1200,
                    "city": "Bursa",
                    "description": "Regional power distribution company",
                })),
            )
            .unwrap();

        assert_eq!(result.components.company_size, 55.0);
        assert_eq!(result.components.industry_propensity, 85.0);
        assert_eq!(result.detected_industry, "utilities");
        let expected_adjusted = (result.base_score * 1.15).min(100.0);
        assert!((result.industry_adjusted_score - expected_adjusted).abs() < 1e-9);
        assert!(
            (result.final_score - (result.industry_adjusted_score + result.adjustment)).abs()
                < 1e-9
        );
    }

    #[test]
    fn test_scores_stay_in_bounds() {
        let result = engine()
            .score(
                "Mega Lojistik A.Ş.",
                &attrs(json!({
                    "employees": "50k",
                    "annual_revenue": "90,000,000,000",
                    "industry": "logistics renewable energy",
                    "city": "Istanbul",
                    "year_founded": 1950,
                    "company_domain_name": "mega.com.tr",
                    "phone_number": "444",
                    "linkedin": "mega",
                    "description": "Leading global logistics group with innovation, expansion and partnership programs worldwide across 60 countries and growing",
                })),
            )
            .unwrap();
        for score in result.components.as_array() {
            assert!((0.0..=100.0).contains(&score));
        }
        assert!(result.industry_adjusted_score <= 100.0);
        assert!(result.adjustment <= 25.0 && result.adjustment >= -25.0);
        assert_eq!(result.final_score, 100.0);
        assert!(result.is_target());
    }

    #[test]
    fn test_crisis_signal_lowers_final_score() {
        let engine = engine();
        let base = attrs(json!({ "industry": "retail", "description": "Regional store chain" }));
        let crisis = attrs(json!({
            "industry": "retail",
            "description": "Regional store chain in restructuring",
        }));
        let a = engine.score("Market A", &base).unwrap();
        let b = engine.score("Market A", &crisis).unwrap();
        assert_eq!(b.adjustment, -15.0);
        assert!(b.final_score < a.final_score);
    }

    #[test]
    fn test_target_threshold_is_configurable() {
        let engine = ScoringEngine::new(ScoringConfig {
            target_threshold: 30.0,
            reference_year: Some(2025),
            ..ScoringConfig::default()
        })
        .unwrap();
        let result = engine.score("Unknown Co", &Map::new()).unwrap();
        assert_eq!(result.priority, Priority::Target);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ScoringConfig::default();
        config.weights.geographic_presence = 0.3;
        let err = ScoringEngine::new(config).unwrap_err();
        assert_eq!(err.errors.len(), 1);
    }

    #[test]
    fn test_score_all_preserves_order_and_isolates_failures() {
        let entities = vec![
            EntityInput::new("First", attrs(json!({ "employees": 10 }))),
            EntityInput::new("", attrs(json!({ "employees": 5000 }))),
            EntityInput::new("Third", Map::new()),
        ];
        let outcomes = engine().score_all(entities);
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].entity_name(), "First");
        assert!(outcomes[0].result().is_some());
        match &outcomes[1] {
            BatchOutcome::Failed { entity_name, error } => {
                assert_eq!(entity_name, UNKNOWN_ENTITY);
                assert!(error.contains("empty"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
        assert_eq!(outcomes[2].entity_name(), "Third");
    }

    #[test]
    fn test_panicking_entity_does_not_abort_batch() {
        let engine = engine();
        let entities = [("Alpha", false), ("Beta Lojistik", true), ("Gamma", false), ("", true)];

        let outcomes: Vec<BatchOutcome> = entities
            .iter()
            .enumerate()
            .map(|(index, (name, panics))| {
                isolate(index, name, || {
                    if *panics {
                        panic!("corrupt record at {}", index);
                    }
                    engine.score(name, &Map::new())
                })
            })
            .collect();

        assert_eq!(outcomes.len(), 4);
        assert!(matches!(&outcomes[0], BatchOutcome::Scored(r) if r.entity_name == "Alpha"));
        match &outcomes[1] {
            BatchOutcome::Failed { entity_name, error } => {
                assert_eq!(entity_name, "Beta Lojistik");
                assert_eq!(error, "internal scoring fault: corrupt record at 1");
            }
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(matches!(&outcomes[2], BatchOutcome::Scored(r) if r.entity_name == "Gamma"));
        assert_eq!(outcomes[3].entity_name(), UNKNOWN_ENTITY);
        assert!(outcomes[3].result().is_none());
    }

    #[test]
    fn test_panic_message_extraction() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
        let payload: Box<dyn std::any::Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ScoringEngine>();
    }

    #[test]
    fn test_concurrent_scoring_matches_sequential() {
        let engine = engine();
        let data = attrs(json!({ "employees": 700, "city": "Izmir", "industry": "food" }));
        let expected = engine.score("Ege Gıda", &data).unwrap();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| engine.score("Ege Gıda", &data).unwrap()))
                .collect();
            for handle in handles {
                let result = handle.join().unwrap();
                assert_eq!(result.final_score, expected.final_score);
                assert_eq!(result.reasoning, expected.reasoning);
            }
        });
    }

    #[test]
    fn test_result_serializes_priority_snake_case() {
        let result = engine().score("Unknown Co", &Map::new()).unwrap();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["priority"], "non_target");
        assert_eq!(value["industry_confidence"], "low");
        assert!(value["processing_time_ms"].is_number());
    }
}
