//! Categorized report types and the run summary.
//!
//! The report is the single structure handed to every renderer and to the
//! presentation layer. Sections are vectors, not maps, so serialization is
//! byte-stable across identical runs.

use serde::{Deserialize, Serialize};
use tahlil_core::types::{AnalysisResult, Bilingual, Category, RatingBand, Status};

/// All results for one category, in stable unit-id order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySection {
    /// The category.
    pub category: Category,
    /// Results sorted by unit id.
    pub results: Vec<AnalysisResult>,
}

/// Coarse health classification derived from the rated results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HealthStatus {
    /// Most rated units at or above their benchmarks.
    Excellent,
    /// A solid majority at or above benchmark.
    Good,
    /// Mixed picture.
    Fair,
    /// Most rated units behind their benchmarks.
    Weak,
    /// Too little computable data to judge.
    Unknown,
}

impl HealthStatus {
    /// Bilingual display label.
    #[must_use]
    pub fn label(&self) -> Bilingual {
        match self {
            HealthStatus::Excellent => Bilingual::new("Excellent", "ممتاز"),
            HealthStatus::Good => Bilingual::new("Good", "جيد"),
            HealthStatus::Fair => Bilingual::new("Fair", "متوسط"),
            HealthStatus::Weak => Bilingual::new("Weak", "ضعيف"),
            HealthStatus::Unknown => Bilingual::new("Insufficient data", "بيانات غير كافية"),
        }
    }
}

/// Composite investment grade letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvestmentGrade {
    /// Strong across the board.
    A,
    /// Sound with reservations.
    B,
    /// Notable weaknesses.
    C,
    /// Broad underperformance.
    D,
}

/// Counts of computed results per rating band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandCounts {
    /// Units rated excellent.
    pub excellent: usize,
    /// Units rated good.
    pub good: usize,
    /// Units rated acceptable.
    pub acceptable: usize,
    /// Units rated weak.
    pub weak: usize,
    /// Units flagged needs-review.
    pub needs_review: usize,
}

impl BandCounts {
    fn record(&mut self, band: RatingBand) {
        match band {
            RatingBand::Excellent => self.excellent += 1,
            RatingBand::Good => self.good += 1,
            RatingBand::Acceptable => self.acceptable += 1,
            RatingBand::Weak => self.weak += 1,
            RatingBand::NeedsReview => self.needs_review += 1,
        }
    }

    fn rated(&self) -> usize {
        self.excellent + self.good + self.acceptable + self.weak + self.needs_review
    }
}

/// Aggregate view over one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Units that computed a value.
    pub computed: usize,
    /// Units unavailable from the data at hand.
    pub unavailable: usize,
    /// Units that faulted.
    pub failed: usize,
    /// Computed results per band.
    pub bands: BandCounts,
    /// Coarse health classification.
    pub health: HealthStatus,
    /// Up to three standout strengths (distinct categories).
    pub strengths: Vec<Bilingual>,
    /// Up to three standout weaknesses (distinct categories).
    pub weaknesses: Vec<Bilingual>,
    /// Composite grade letter.
    pub investment_grade: InvestmentGrade,
}

impl ReportSummary {
    /// Derives the summary from categorized sections.
    #[must_use]
    pub fn from_sections(sections: &[CategorySection]) -> Self {
        let mut computed = 0;
        let mut unavailable = 0;
        let mut failed = 0;
        let mut bands = BandCounts::default();
        let mut strengths = Vec::new();
        let mut weaknesses = Vec::new();

        for section in sections {
            let mut strength_taken = false;
            let mut weakness_taken = false;
            for result in &section.results {
                match result.status {
                    Status::Computed => computed += 1,
                    Status::Unavailable => unavailable += 1,
                    Status::Failed => failed += 1,
                }
                if let Some(band) = result.rating {
                    bands.record(band);
                    if band == RatingBand::Excellent && !strength_taken && strengths.len() < 3 {
                        strengths.push(result.name.clone());
                        strength_taken = true;
                    }
                    if matches!(band, RatingBand::Weak | RatingBand::NeedsReview)
                        && !weakness_taken
                        && weaknesses.len() < 3
                    {
                        weaknesses.push(result.name.clone());
                        weakness_taken = true;
                    }
                }
            }
        }

        let rated = bands.rated();
        let favorable = bands.excellent + bands.good;
        let (health, grade) = if rated == 0 {
            (HealthStatus::Unknown, InvestmentGrade::D)
        } else {
            let share = favorable as f64 / rated as f64;
            let health = if share >= 0.75 {
                HealthStatus::Excellent
            } else if share >= 0.5 {
                HealthStatus::Good
            } else if share >= 0.25 {
                HealthStatus::Fair
            } else {
                HealthStatus::Weak
            };
            let grade = if share >= 0.8 {
                InvestmentGrade::A
            } else if share >= 0.6 {
                InvestmentGrade::B
            } else if share >= 0.4 {
                InvestmentGrade::C
            } else {
                InvestmentGrade::D
            };
            (health, grade)
        };

        Self {
            computed,
            unavailable,
            failed,
            bands,
            health,
            strengths,
            weaknesses,
            investment_grade: grade,
        }
    }
}

/// The complete output of one orchestrator run.
///
/// Renderers and the presentation layer receive this same structure through
/// a single query call; results are never mutated after the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizedReport {
    /// Sections in category declaration order.
    pub sections: Vec<CategorySection>,
    /// Aggregate summary.
    pub summary: ReportSummary,
}

impl CategorizedReport {
    /// Results for one category, if any unit of it was selected.
    #[must_use]
    pub fn results_for(&self, category: Category) -> Option<&[AnalysisResult]> {
        self.sections
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.results.as_slice())
    }

    /// Iterates every result across sections.
    pub fn all_results(&self) -> impl Iterator<Item = &AnalysisResult> {
        self.sections.iter().flat_map(|s| s.results.iter())
    }

    /// Total result count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.results.len()).sum()
    }

    /// True when no unit matched the selection.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
