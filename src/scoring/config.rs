use serde::{Deserialize, Serialize};

use super::record::Field;

/// Main scoring configuration.
///
/// Holds every tunable table the engine reads: weights, brackets, keyword
/// lists, city tiers, adjustment signals. The defaults are the canonical
/// tables of one deployment; a YAML file may override any subset.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   target_threshold: 65
///   weights:
///     company_size: 0.40
///     industry_propensity: 0.20
///     financial_capacity: 0.20
///     geographic_presence: 0.10
///     additional_indicators: 0.10
///   company_size:
///     employee_brackets:
///       - { range: ">=5000", bonus: 30 }
///       - { range: ">=1", bonus: 5 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    /// Final score at or above which an entity is a target (default: 60)
    pub target_threshold: f64,

    /// Largest absolute heuristic adjustment (default: 25)
    pub adjustment_bound: f64,

    /// Year used to compute company age. Current year when unset.
    pub reference_year: Option<i32>,

    pub weights: ScoringWeights,
    pub company_size: CompanySizeConfig,
    pub propensity: PropensityConfig,
    pub financial: FinancialConfig,
    pub geography: GeographyConfig,
    pub additional: AdditionalConfig,

    /// Industry profiles in match priority order (ties keep the earlier one)
    pub industries: Vec<IndustryProfile>,

    pub adjustment: AdjustmentConfig,
    pub explanation: ExplanationConfig,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            target_threshold: 60.0,
            adjustment_bound: 25.0,
            reference_year: None,
            weights: ScoringWeights::default(),
            company_size: CompanySizeConfig::default(),
            propensity: PropensityConfig::default(),
            financial: FinancialConfig::default(),
            geography: GeographyConfig::default(),
            additional: AdditionalConfig::default(),
            industries: default_industries(),
            adjustment: AdjustmentConfig::default(),
            explanation: ExplanationConfig::default(),
        }
    }
}

/// Weights of the five base components. Must sum to 1.0.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringWeights {
    pub company_size: f64,
    pub industry_propensity: f64,
    pub financial_capacity: f64,
    pub geographic_presence: f64,
    pub additional_indicators: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            company_size: 0.35,
            industry_propensity: 0.25,
            financial_capacity: 0.20,
            geographic_presence: 0.10,
            additional_indicators: 0.10,
        }
    }
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.company_size
            + self.industry_propensity
            + self.financial_capacity
            + self.geographic_presence
            + self.additional_indicators
    }

    pub fn as_array(&self) -> [f64; 5] {
        [
            self.company_size,
            self.industry_propensity,
            self.financial_capacity,
            self.geographic_presence,
            self.additional_indicators,
        ]
    }
}

/// Score bonus bracket.
///
/// Range format: "<N", "<=N", ">N", ">=N", "N-M" (inclusive), or "N".
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Bracket {
    /// Range expression (e.g., ">=5000", ">0", "10-50")
    pub range: String,

    /// Points added when the range matches
    pub bonus: f64,
}

impl Bracket {
    pub fn new(range: &str, bonus: f64) -> Self {
        Self {
            range: range.to_string(),
            bonus,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CompanySizeConfig {
    pub base: f64,
    pub employee_brackets: Vec<Bracket>,
    /// Local currency (TL), "up to 1B" scale
    pub revenue_brackets: Vec<Bracket>,
}

impl Default for CompanySizeConfig {
    fn default() -> Self {
        Self {
            base: 30.0,
            employee_brackets: vec![
                Bracket::new(">=5000", 30.0),
                Bracket::new(">=1000", 25.0),
                Bracket::new(">=200", 15.0),
                Bracket::new(">=50", 10.0),
                Bracket::new(">=1", 5.0),
            ],
            revenue_brackets: vec![
                Bracket::new(">=1_000_000_000", 25.0),
                Bracket::new(">=200_000_000", 20.0),
                Bracket::new(">=100_000_000", 15.0),
                Bracket::new(">=20_000_000", 10.0),
                Bracket::new(">0", 3.0),
            ],
        }
    }
}

/// Industry text term group. Groups are tested in order; first hit wins.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PropensityGroup {
    pub name: String,
    pub score: f64,
    pub terms: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PropensityConfig {
    pub groups: Vec<PropensityGroup>,
    pub default_score: f64,
}

impl Default for PropensityConfig {
    fn default() -> Self {
        Self {
            groups: vec![
                PropensityGroup {
                    name: "high".to_string(),
                    score: 85.0,
                    terms: strings(&[
                        "renewable",
                        "logistics",
                        "utilities",
                        "manufacturing",
                        "energy",
                        "chemical",
                        "industrial",
                        "engineering",
                        "construction materials",
                    ]),
                },
                PropensityGroup {
                    name: "medium".to_string(),
                    score: 60.0,
                    terms: strings(&[
                        "food",
                        "pharmaceutical",
                        "building",
                        "automotive",
                        "mining",
                        "metals",
                        "machinery",
                        "equipment",
                    ]),
                },
                PropensityGroup {
                    name: "low".to_string(),
                    score: 25.0,
                    terms: strings(&[
                        "retail",
                        "consumer",
                        "software",
                        "it",
                        "healthcare",
                        "hospital",
                        "transportation",
                        "trucking",
                    ]),
                },
            ],
            default_score: 40.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FinancialConfig {
    pub base: f64,
    /// Keyed on company age in years
    pub age_brackets: Vec<Bracket>,
    /// Substrings of the lower-cased entity name marking a formal legal form
    pub legal_suffixes: Vec<String>,
    pub legal_suffix_bonus: f64,
    pub domain_bonus: f64,
}

impl Default for FinancialConfig {
    fn default() -> Self {
        Self {
            base: 30.0,
            age_brackets: vec![
                Bracket::new(">=20", 25.0),
                Bracket::new(">=10", 20.0),
                Bracket::new(">=5", 15.0),
                Bracket::new("<5", 5.0),
            ],
            legal_suffixes: strings(&[
                "a.ş.",
                "anonim şirket",
                "limited şirket",
                "ltd.",
                "şti.",
            ]),
            legal_suffix_bonus: 20.0,
            domain_bonus: 15.0,
        }
    }
}

/// Geographic tier. A tier with no cities is a catch-all for any non-empty
/// city that no earlier tier matched.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GeoTier {
    pub name: String,
    pub bonus: f64,
    #[serde(default)]
    pub cities: Vec<String>,
    /// Phrase added to the reasoning string for entities in this tier
    #[serde(default)]
    pub descriptor: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GeographyConfig {
    pub base: f64,
    /// Tiers in lookup priority order
    pub tiers: Vec<GeoTier>,
    pub international_terms: Vec<String>,
    pub international_bonus: f64,
}

impl Default for GeographyConfig {
    fn default() -> Self {
        Self {
            base: 40.0,
            tiers: vec![
                GeoTier {
                    name: "tier_1".to_string(),
                    bonus: 30.0,
                    // "İ" lower-cases to "i" plus a combining dot above
                    cities: strings(&[
                        "istanbul",
                        "ankara",
                        "izmir",
                        "i\u{307}stanbul",
                        "i\u{307}zmir",
                    ]),
                    descriptor: Some("Prime market location".to_string()),
                },
                GeoTier {
                    name: "tier_2".to_string(),
                    bonus: 25.0,
                    cities: strings(&[
                        "bursa",
                        "antalya",
                        "gaziantep",
                        "konya",
                        "adana",
                        "mersin",
                        "diyarbakır",
                        "kayseri",
                    ]),
                    descriptor: None,
                },
                GeoTier {
                    name: "tier_3".to_string(),
                    bonus: 20.0,
                    cities: strings(&[
                        "eskişehir",
                        "denizli",
                        "samsun",
                        "malatya",
                        "erzurum",
                        "van",
                        "batman",
                        "şanlıurfa",
                    ]),
                    descriptor: None,
                },
                GeoTier {
                    name: "industrial".to_string(),
                    bonus: 22.0,
                    cities: strings(&[
                        "kocaeli",
                        "tekirdağ",
                        "gebze",
                        "sakarya",
                        "çorlu",
                        "manisa",
                    ]),
                    descriptor: None,
                },
                GeoTier {
                    name: "other".to_string(),
                    bonus: 10.0,
                    cities: Vec::new(),
                    descriptor: None,
                },
            ],
            international_terms: strings(&["international", "global", "export", "worldwide"]),
            international_bonus: 15.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AdditionalConfig {
    pub base: f64,
    pub contact_fields: Vec<Field>,
    /// Points per present contact field
    pub contact_bonus: f64,
    /// Keyed on description length in characters
    pub description_brackets: Vec<Bracket>,
    pub social_fields: Vec<Field>,
    /// Points per present social-media field
    pub social_bonus: f64,
    pub growth_terms: Vec<String>,
    pub growth_bonus: f64,
}

impl Default for AdditionalConfig {
    fn default() -> Self {
        Self {
            base: 30.0,
            contact_fields: vec![Field::Domain, Field::Phone],
            contact_bonus: 15.0,
            description_brackets: vec![
                Bracket::new(">100", 25.0),
                Bracket::new(">50", 15.0),
                Bracket::new(">0", 10.0),
            ],
            social_fields: vec![Field::Linkedin, Field::Facebook],
            social_bonus: 5.0,
            growth_terms: strings(&["growing", "expanding", "leading"]),
            growth_bonus: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct IndustryProfile {
    pub tag: String,
    pub multiplier: f64,
    pub confidence: Confidence,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub reasoning: String,
}

impl IndustryProfile {
    fn new(
        tag: &str,
        multiplier: f64,
        confidence: Confidence,
        keywords: &[&str],
        reasoning: &str,
    ) -> Self {
        Self {
            tag: tag.to_string(),
            multiplier,
            confidence,
            keywords: strings(keywords),
            reasoning: reasoning.to_string(),
        }
    }
}

fn default_industries() -> Vec<IndustryProfile> {
    use Confidence::*;

    vec![
        IndustryProfile::new(
            "renewables_environment",
            1.20,
            High,
            &["renewable", "environment", "solar", "wind", "green energy", "sustainability", "çevre", "yenilenebilir"],
            "60% target rate, growing sector with significant B2B investment",
        ),
        IndustryProfile::new(
            "logistics_supply_chain",
            1.17,
            High,
            &["logistics", "supply chain", "transportation", "shipping", "distribution", "freight", "lojistik", "taşımacılık"],
            "58.8% target rate, complex operational B2B needs",
        ),
        IndustryProfile::new(
            "utilities",
            1.15,
            High,
            &["utilities", "electric", "power", "gas", "water", "energy distribution", "elektrik", "enerji"],
            "54.5% target rate, infrastructure-heavy B2B requirements",
        ),
        IndustryProfile::new(
            "food_beverages",
            1.10,
            Medium,
            &["food", "beverage", "dairy", "agriculture", "nutrition", "farming", "gıda", "içecek", "tarım"],
            "50% target rate, moderate B2B service requirements",
        ),
        IndustryProfile::new(
            "chemicals",
            1.05,
            Medium,
            &["chemical", "pharmaceutical", "biotech", "laboratory", "manufacturing chemical", "kimya", "ilaç"],
            "45.8% target rate, specialized technical services needed",
        ),
        IndustryProfile::new(
            "building_materials",
            1.02,
            Medium,
            &["building materials", "construction materials", "cement", "steel", "concrete", "yapı malzemesi", "çimento"],
            "44.4% target rate, construction-related B2B services",
        ),
        IndustryProfile::new(
            "mechanical_industrial",
            1.00,
            Medium,
            &["mechanical", "industrial engineering", "machinery", "equipment", "manufacturing", "makine", "mühendislik"],
            "42% target rate, baseline engineering service needs",
        ),
        IndustryProfile::new(
            "mining_metals",
            0.98,
            Medium,
            &["mining", "metals", "metallurgy", "extraction", "ore processing", "maden", "metal"],
            "41.2% target rate, specialized but limited service scope",
        ),
        IndustryProfile::new(
            "pharmaceuticals",
            0.97,
            Medium,
            &["pharmaceuticals", "pharma", "medicine", "drugs", "healthcare", "ilaç", "sağlık"],
            "40% target rate, highly regulated sector",
        ),
        IndustryProfile::new(
            "retail",
            0.90,
            Low,
            &["retail", "consumer", "shopping", "store", "commerce", "sales", "perakende", "mağaza"],
            "37.5% target rate, consumer-focused with limited B2B needs",
        ),
        IndustryProfile::new(
            "construction",
            0.88,
            Low,
            &["construction", "building", "architecture", "contractor", "infrastructure", "inşaat", "yapı"],
            "35.3% target rate, project-based service requirements",
        ),
        IndustryProfile::new(
            "automotive",
            0.85,
            Low,
            &["automotive", "automobile", "vehicle", "car", "transportation equipment", "otomotiv", "araç"],
            "34.1% target rate, manufacturing-focused operations",
        ),
        IndustryProfile::new(
            "computer_software",
            0.80,
            Low,
            &["computer software", "technology", "software", "it", "digital", "programming", "yazılım", "teknoloji"],
            "29.6% target rate, self-service digital solutions preferred",
        ),
        IndustryProfile::new(
            "hospital_healthcare",
            0.75,
            Low,
            &["hospital", "health care", "medical", "healthcare", "clinic", "pharmaceutical", "hastane", "sağlık"],
            "30% target rate, specialized service requirements outside typical B2B",
        ),
        IndustryProfile::new(
            "transportation_trucking",
            0.70,
            Low,
            &["transportation", "trucking", "freight", "delivery", "shipping", "nakliye", "kargo"],
            "23.1% target rate, operational focus over service procurement",
        ),
    ]
}

/// Signed points awarded once when any phrase appears in the description.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SignalSet {
    pub name: String,
    pub points: f64,
    pub phrases: Vec<String>,
}

impl SignalSet {
    fn new(name: &str, points: f64, phrases: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            points,
            phrases: strings(phrases),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AdjustmentConfig {
    pub signals: Vec<SignalSet>,
    pub completeness_fields: Vec<Field>,
    /// Keyed on the number of present completeness fields
    pub completeness_brackets: Vec<Bracket>,
}

impl Default for AdjustmentConfig {
    fn default() -> Self {
        Self {
            signals: vec![
                SignalSet::new(
                    "growth",
                    10.0,
                    &["expansion", "expanding", "new facilities", "new facility", "growing", "büyüme"],
                ),
                SignalSet::new(
                    "innovation",
                    8.0,
                    &["innovation", "innovative", "r&d", "patent", "inovasyon", "ar-ge"],
                ),
                SignalSet::new(
                    "market_leadership",
                    12.0,
                    &["market leader", "leading", "market share", "pazar lideri", "sektör lideri"],
                ),
                SignalSet::new(
                    "partnerships",
                    6.0,
                    &["partnership", "strategic alliance", "joint venture", "ortaklık"],
                ),
                SignalSet::new(
                    "crisis",
                    -15.0,
                    &["bankruptcy", "downsizing", "layoff", "restructuring", "crisis", "iflas", "konkordato", "kriz"],
                ),
            ],
            completeness_fields: vec![
                Field::Domain,
                Field::Description,
                Field::YearFounded,
                Field::Linkedin,
            ],
            completeness_brackets: vec![Bracket::new(">=3", 8.0), Bracket::new(">=2", 4.0)],
        }
    }
}

/// Reasoning label for final scores at or above `min_score`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoreTier {
    pub min_score: f64,
    pub label: String,
}

/// Label keyed on a range expression.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RangeLabel {
    pub range: String,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ExplanationConfig {
    /// Strictly descending `min_score`s
    pub score_tiers: Vec<ScoreTier>,
    /// Used when no score tier matches
    pub fallback_label: String,
    /// Keyed on employee count; first match wins
    pub size_descriptors: Vec<RangeLabel>,
    pub separator: String,
}

impl Default for ExplanationConfig {
    fn default() -> Self {
        Self {
            score_tiers: vec![
                ScoreTier {
                    min_score: 85.0,
                    label: "High-confidence target".to_string(),
                },
                ScoreTier {
                    min_score: 70.0,
                    label: "Strong target".to_string(),
                },
                ScoreTier {
                    min_score: 60.0,
                    label: "Qualified target candidate".to_string(),
                },
            ],
            fallback_label: "Below target threshold".to_string(),
            size_descriptors: vec![
                RangeLabel {
                    range: ">=1000".to_string(),
                    label: "Large enterprise".to_string(),
                },
                RangeLabel {
                    range: ">=200".to_string(),
                    label: "Medium-large company".to_string(),
                },
                RangeLabel {
                    range: ">=50".to_string(),
                    label: "Medium company".to_string(),
                },
            ],
            separator: " • ".to_string(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
