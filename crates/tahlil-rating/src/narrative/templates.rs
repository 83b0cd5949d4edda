//! Narrative template tables.
//!
//! `{name}` and `{value}` are interpolated by the generator. Recommendation
//! lists for excellent ratings are intentionally empty or affirming-only.

use tahlil_core::types::{Category, RatingBand};

/// One narrative template: bilingual interpretation plus recommendations.
pub(crate) struct Template {
    pub interpretation: (&'static str, &'static str),
    pub recommendations: &'static [(&'static str, &'static str)],
}

const NO_RECOMMENDATIONS: &[(&str, &str)] = &[];

/// Per-unit overrides for flagship analyses.
pub(crate) fn unit_override(id: &str, band: RatingBand) -> Option<Template> {
    use RatingBand::*;
    let template = match (id, band) {
        ("current_ratio", Excellent) => Template {
            interpretation: (
                "At {value}, current assets cover short-term obligations with a wide buffer",
                "عند {value}، تغطي الأصول المتداولة الالتزامات قصيرة الأجل بهامش واسع",
            ),
            recommendations: &[(
                "Consider deploying surplus liquidity into higher-return uses",
                "النظر في توجيه فائض السيولة نحو استخدامات أعلى عائداً",
            )],
        },
        ("current_ratio", Weak) => Template {
            interpretation: (
                "At {value}, current liabilities exceed the liquid cover available; near-term payment pressure is likely",
                "عند {value}، تتجاوز الالتزامات المتداولة الغطاء السائل المتاح مما ينذر بضغط سداد قريب",
            ),
            recommendations: &[
                (
                    "Accelerate receivables collection and renegotiate supplier terms",
                    "تسريع تحصيل الذمم المدينة وإعادة التفاوض على شروط الموردين",
                ),
                (
                    "Arrange standby credit lines before obligations fall due",
                    "ترتيب تسهيلات ائتمانية احتياطية قبل استحقاق الالتزامات",
                ),
            ],
        },
        ("return_on_equity", Excellent) => Template {
            interpretation: (
                "Return on equity of {value} places shareholder returns well above the benchmark",
                "عائد على حقوق الملكية قدره {value} يضع عوائد المساهمين فوق المعيار بوضوح",
            ),
            recommendations: NO_RECOMMENDATIONS,
        },
        ("return_on_equity", Weak) => Template {
            interpretation: (
                "Return on equity of {value} is well below the benchmark; capital is not earning its keep",
                "عائد على حقوق الملكية قدره {value} أدنى من المعيار بوضوح؛ رأس المال لا يحقق عائده المطلوب",
            ),
            recommendations: &[
                (
                    "Review pricing and cost structure to restore net margin",
                    "مراجعة التسعير وهيكل التكاليف لاستعادة الهامش الصافي",
                ),
                (
                    "Reassess low-yield assets tying up equity",
                    "إعادة تقييم الأصول منخفضة العائد التي تقيد حقوق الملكية",
                ),
            ],
        },
        ("debt_to_equity_ratio", Excellent) => Template {
            interpretation: (
                "Leverage of {value} leaves ample headroom against the benchmark",
                "رافعة مالية عند {value} تترك مجالاً واسعاً دون المعيار",
            ),
            recommendations: NO_RECOMMENDATIONS,
        },
        ("debt_to_equity_ratio", Weak) => Template {
            interpretation: (
                "Leverage of {value} is heavy relative to equity; financing risk is elevated",
                "رافعة مالية عند {value} مرتفعة نسبة إلى حقوق الملكية؛ مخاطر التمويل متصاعدة",
            ),
            recommendations: &[
                (
                    "Prioritize debt reduction from operating cash flow",
                    "إعطاء الأولوية لخفض الدين من التدفق النقدي التشغيلي",
                ),
                (
                    "Defer leveraged expansion until the ratio normalizes",
                    "تأجيل التوسع الممول بالدين حتى تعود النسبة لمستواها الطبيعي",
                ),
            ],
        },
        ("altman_z_score", Excellent) | ("altman_z_score", Good) => Template {
            interpretation: (
                "Z-Score of {value} sits in the safe zone; distress risk is low",
                "مؤشر ألتمان عند {value} يقع في المنطقة الآمنة؛ مخاطر التعثر منخفضة",
            ),
            recommendations: NO_RECOMMENDATIONS,
        },
        ("altman_z_score", Acceptable) => Template {
            interpretation: (
                "Z-Score of {value} falls in the grey zone; the position merits monitoring",
                "مؤشر ألتمان عند {value} يقع في المنطقة الرمادية؛ الوضع يستدعي المتابعة",
            ),
            recommendations: &[(
                "Monitor working capital and retained earnings trends quarterly",
                "متابعة اتجاهات رأس المال العامل والأرباح المحتجزة بشكل ربع سنوي",
            )],
        },
        ("altman_z_score", Weak) => Template {
            interpretation: (
                "Z-Score of {value} is in the distress zone; bankruptcy indicators are flashing",
                "مؤشر ألتمان عند {value} يقع في منطقة الخطر؛ مؤشرات التعثر قائمة",
            ),
            recommendations: &[
                (
                    "Engage restructuring planning early while options remain",
                    "البدء المبكر في خطط إعادة الهيكلة بينما الخيارات متاحة",
                ),
                (
                    "Preserve cash and halt non-essential outflows",
                    "الحفاظ على النقد وإيقاف التدفقات الخارجة غير الضرورية",
                ),
            ],
        },
        _ => return None,
    };
    Some(template)
}

/// Category-level fallback templates.
pub(crate) fn category_template(category: Category, band: RatingBand) -> Template {
    use Category::*;
    use RatingBand::*;
    match (category, band) {
        (Liquidity, Excellent) => Template {
            interpretation: (
                "{name} of {value} shows liquidity comfortably ahead of the benchmark",
                "{name} عند {value} تُظهر سيولة متقدمة على المعيار بارتياح",
            ),
            recommendations: NO_RECOMMENDATIONS,
        },
        (Liquidity, Good) => Template {
            interpretation: (
                "{name} of {value} indicates adequate capacity to meet short-term obligations",
                "{name} عند {value} تشير إلى قدرة كافية على الوفاء بالالتزامات قصيرة الأجل",
            ),
            recommendations: NO_RECOMMENDATIONS,
        },
        (Liquidity, Acceptable) => Template {
            interpretation: (
                "{name} of {value} sits slightly below the benchmark; liquidity is workable but thin",
                "{name} عند {value} دون المعيار قليلاً؛ السيولة مقبولة لكنها محدودة",
            ),
            recommendations: &[(
                "Tighten working capital management to rebuild the buffer",
                "إحكام إدارة رأس المال العامل لإعادة بناء الهامش",
            )],
        },
        (Liquidity, Weak) => Template {
            interpretation: (
                "{name} of {value} signals strained liquidity against near-term obligations",
                "{name} عند {value} تشير إلى سيولة مضغوطة أمام الالتزامات القريبة",
            ),
            recommendations: &[
                (
                    "Accelerate collections and slow discretionary payments",
                    "تسريع التحصيل وإبطاء المدفوعات غير الأساسية",
                ),
                (
                    "Line up short-term financing before the gap widens",
                    "تأمين تمويل قصير الأجل قبل اتساع الفجوة",
                ),
            ],
        },
        (Liquidity, NeedsReview) => Template {
            interpretation: (
                "{name} of {value} is far from its expected range; the liquidity position needs review",
                "{name} عند {value} بعيدة عن نطاقها المتوقع؛ وضع السيولة يحتاج إلى مراجعة",
            ),
            recommendations: &[(
                "Verify the underlying balances and investigate the deviation",
                "التحقق من الأرصدة الأساسية وتقصي أسباب الانحراف",
            )],
        },
        (Activity, Excellent) => Template {
            interpretation: (
                "{name} of {value} reflects asset utilization well ahead of the benchmark",
                "{name} عند {value} تعكس استغلالاً للأصول متقدماً على المعيار",
            ),
            recommendations: NO_RECOMMENDATIONS,
        },
        (Activity, Good) => Template {
            interpretation: (
                "{name} of {value} shows efficient conversion of resources into revenue",
                "{name} عند {value} تُظهر كفاءة في تحويل الموارد إلى إيرادات",
            ),
            recommendations: NO_RECOMMENDATIONS,
        },
        (Activity, Acceptable) => Template {
            interpretation: (
                "{name} of {value} trails the benchmark modestly; utilization has slack",
                "{name} عند {value} خلف المعيار بقدر محدود؛ هناك طاقة غير مستغلة",
            ),
            recommendations: &[(
                "Target the slowest-turning assets for process improvement",
                "استهداف الأصول الأبطأ دوراناً بتحسينات تشغيلية",
            )],
        },
        (Activity, Weak) => Template {
            interpretation: (
                "{name} of {value} points to sluggish turnover and idle capacity",
                "{name} عند {value} تشير إلى بطء في الدوران وطاقة معطلة",
            ),
            recommendations: &[
                (
                    "Review inventory and credit policies driving the lag",
                    "مراجعة سياسات المخزون والائتمان المسببة للتباطؤ",
                ),
                (
                    "Dispose of or redeploy persistently under-used assets",
                    "التخلص من الأصول ضعيفة الاستخدام أو إعادة توظيفها",
                ),
            ],
        },
        (Activity, NeedsReview) => Template {
            interpretation: (
                "{name} of {value} deviates sharply from its expected range and needs review",
                "{name} عند {value} تنحرف بحدة عن نطاقها المتوقع وتحتاج إلى مراجعة",
            ),
            recommendations: &[(
                "Confirm the inputs and examine period-specific distortions",
                "تأكيد المدخلات وفحص التشوهات الخاصة بالفترة",
            )],
        },
        (Profitability, Excellent) => Template {
            interpretation: (
                "{name} of {value} delivers returns well above the benchmark",
                "{name} عند {value} تحقق عوائد أعلى من المعيار بوضوح",
            ),
            recommendations: &[(
                "Protect the drivers of this margin as volumes grow",
                "حماية محركات هذا الهامش مع نمو الأحجام",
            )],
        },
        (Profitability, Good) => Template {
            interpretation: (
                "{name} of {value} meets the benchmark for healthy profitability",
                "{name} عند {value} توافق معيار الربحية الصحية",
            ),
            recommendations: NO_RECOMMENDATIONS,
        },
        (Profitability, Acceptable) => Template {
            interpretation: (
                "{name} of {value} earns below the benchmark; margins are compressing",
                "{name} عند {value} دون المعيار؛ الهوامش تتعرض للضغط",
            ),
            recommendations: &[(
                "Decompose the margin gap between pricing, mix and cost",
                "تفكيك فجوة الهامش بين التسعير والمزيج والتكلفة",
            )],
        },
        (Profitability, Weak) => Template {
            interpretation: (
                "{name} of {value} shows weak earning power against the benchmark",
                "{name} عند {value} تُظهر قدرة ربحية ضعيفة مقارنة بالمعيار",
            ),
            recommendations: &[
                (
                    "Rebase the cost structure against best-in-class peers",
                    "إعادة ضبط هيكل التكاليف قياساً على أفضل النظراء",
                ),
                (
                    "Exit or reprice persistently loss-making lines",
                    "الخروج من الخطوط الخاسرة باستمرار أو إعادة تسعيرها",
                ),
            ],
        },
        (Profitability, NeedsReview) => Template {
            interpretation: (
                "{name} of {value} is far outside its expected range; earnings quality needs review",
                "{name} عند {value} خارج النطاق المتوقع بكثير؛ جودة الأرباح تحتاج إلى مراجعة",
            ),
            recommendations: &[(
                "Audit one-off items and accounting estimates behind the figure",
                "تدقيق البنود غير المتكررة والتقديرات المحاسبية خلف الرقم",
            )],
        },
        (Leverage, Excellent) => Template {
            interpretation: (
                "{name} of {value} keeps financing risk well inside the benchmark",
                "{name} عند {value} تُبقي مخاطر التمويل داخل المعيار بوضوح",
            ),
            recommendations: NO_RECOMMENDATIONS,
        },
        (Leverage, Good) => Template {
            interpretation: (
                "{name} of {value} shows a balanced capital structure",
                "{name} عند {value} تُظهر هيكل رأس مال متوازناً",
            ),
            recommendations: NO_RECOMMENDATIONS,
        },
        (Leverage, Acceptable) => Template {
            interpretation: (
                "{name} of {value} carries somewhat more debt burden than the benchmark",
                "{name} عند {value} تحمل عبء دين أعلى قليلاً من المعيار",
            ),
            recommendations: &[(
                "Hold new borrowing steady until coverage improves",
                "تثبيت الاقتراض الجديد حتى تتحسن التغطية",
            )],
        },
        (Leverage, Weak) => Template {
            interpretation: (
                "{name} of {value} signals elevated leverage and financing risk",
                "{name} عند {value} تشير إلى رافعة مرتفعة ومخاطر تمويلية",
            ),
            recommendations: &[
                (
                    "Deleverage from free cash flow before refinancing walls",
                    "خفض المديونية من التدفق النقدي الحر قبل استحقاقات إعادة التمويل",
                ),
                (
                    "Extend maturities to reduce near-term service pressure",
                    "إطالة آجال الاستحقاق لتخفيف ضغط الخدمة القريب",
                ),
            ],
        },
        (Leverage, NeedsReview) => Template {
            interpretation: (
                "{name} of {value} is far from its expected level; the debt profile needs review",
                "{name} عند {value} بعيدة عن مستواها المتوقع؛ هيكل الدين يحتاج إلى مراجعة",
            ),
            recommendations: &[(
                "Reconcile debt balances and off-balance commitments",
                "مطابقة أرصدة الدين والالتزامات خارج الميزانية",
            )],
        },
        (Market, Excellent) => Template {
            interpretation: (
                "{name} of {value} stands out favorably against market benchmarks",
                "{name} عند {value} تبرز إيجابياً مقابل معايير السوق",
            ),
            recommendations: NO_RECOMMENDATIONS,
        },
        (Market, Good) => Template {
            interpretation: (
                "{name} of {value} is in line with market expectations",
                "{name} عند {value} متوافقة مع توقعات السوق",
            ),
            recommendations: NO_RECOMMENDATIONS,
        },
        (Market, Acceptable) => Template {
            interpretation: (
                "{name} of {value} trails market benchmarks modestly",
                "{name} عند {value} خلف معايير السوق بقدر محدود",
            ),
            recommendations: &[(
                "Strengthen disclosure so results are fully priced in",
                "تعزيز الإفصاح ليُسعَّر الأداء بشكل كامل",
            )],
        },
        (Market, Weak) => Template {
            interpretation: (
                "{name} of {value} reflects an unfavorable market standing",
                "{name} عند {value} تعكس موقفاً سوقياً غير مواتٍ",
            ),
            recommendations: &[(
                "Address the fundamentals the market is discounting",
                "معالجة العوامل الأساسية التي يخصمها السوق",
            )],
        },
        (Market, NeedsReview) => Template {
            interpretation: (
                "{name} of {value} departs sharply from typical market levels and needs review",
                "{name} عند {value} تبتعد بحدة عن المستويات السوقية المعتادة وتحتاج إلى مراجعة",
            ),
            recommendations: &[(
                "Check for stale market data or extraordinary items",
                "التحقق من قِدم بيانات السوق أو وجود بنود استثنائية",
            )],
        },
        (Structural, Excellent) | (Structural, Good) => Template {
            interpretation: (
                "{name} with a lead share of {value} is close to the expected composition",
                "{name} بحصة رئيسية قدرها {value} قريبة من التكوين المتوقع",
            ),
            recommendations: NO_RECOMMENDATIONS,
        },
        (Structural, Acceptable) => Template {
            interpretation: (
                "{name} with a lead share of {value} drifts from the expected composition",
                "{name} بحصة رئيسية قدرها {value} تنحرف عن التكوين المتوقع",
            ),
            recommendations: &[(
                "Rebalance gradually toward the sector's typical structure",
                "إعادة التوازن تدريجياً نحو الهيكل المعتاد للقطاع",
            )],
        },
        (Structural, Weak) | (Structural, NeedsReview) => Template {
            interpretation: (
                "{name} with a lead share of {value} shows a concentration outside the expected range",
                "{name} بحصة رئيسية قدرها {value} تُظهر تركّزاً خارج النطاق المتوقع",
            ),
            recommendations: &[(
                "Examine the concentration's drivers and its funding implications",
                "فحص مسببات التركّز وتداعياته التمويلية",
            )],
        },
        (Flow, Excellent) => Template {
            interpretation: (
                "{name} of {value} shows cash generation well ahead of the benchmark",
                "{name} عند {value} تُظهر توليداً نقدياً متقدماً على المعيار",
            ),
            recommendations: NO_RECOMMENDATIONS,
        },
        (Flow, Good) => Template {
            interpretation: (
                "{name} of {value} confirms earnings are backed by cash",
                "{name} عند {value} تؤكد أن الأرباح مدعومة بالنقد",
            ),
            recommendations: NO_RECOMMENDATIONS,
        },
        (Flow, Acceptable) => Template {
            interpretation: (
                "{name} of {value} runs below the benchmark; cash backing of earnings is thinning",
                "{name} عند {value} دون المعيار؛ الغطاء النقدي للأرباح يتراجع",
            ),
            recommendations: &[(
                "Investigate the accrual build-up between earnings and cash",
                "تقصي تراكم الاستحقاقات بين الأرباح والنقد",
            )],
        },
        (Flow, Weak) => Template {
            interpretation: (
                "{name} of {value} signals weak cash conversion against the benchmark",
                "{name} عند {value} تشير إلى تحويل نقدي ضعيف مقابل المعيار",
            ),
            recommendations: &[
                (
                    "Tighten receivables, inventory and payment cycles",
                    "إحكام دورات الذمم والمخزون والمدفوعات",
                ),
                (
                    "Match capex pace to internally generated cash",
                    "مواءمة وتيرة الإنفاق الرأسمالي مع النقد المولّد داخلياً",
                ),
            ],
        },
        (Flow, NeedsReview) => Template {
            interpretation: (
                "{name} of {value} departs sharply from its expected level; flow quality needs review",
                "{name} عند {value} تبتعد بحدة عن مستواها المتوقع؛ جودة التدفق تحتاج إلى مراجعة",
            ),
            recommendations: &[(
                "Trace large swings to their specific cash flow lines",
                "تتبع التقلبات الكبيرة إلى بنود التدفق المسببة لها",
            )],
        },
        (Comparative, Excellent) => Template {
            interpretation: (
                "{name} of {value} outpaces the benchmark trajectory",
                "{name} عند {value} تتجاوز المسار المعياري",
            ),
            recommendations: NO_RECOMMENDATIONS,
        },
        (Comparative, Good) => Template {
            interpretation: (
                "{name} of {value} keeps pace with the expected trajectory",
                "{name} عند {value} تواكب المسار المتوقع",
            ),
            recommendations: NO_RECOMMENDATIONS,
        },
        (Comparative, Acceptable) => Template {
            interpretation: (
                "{name} of {value} lags the expected trajectory modestly",
                "{name} عند {value} تتأخر عن المسار المتوقع بقدر محدود",
            ),
            recommendations: &[(
                "Identify where peers are compounding faster and close the gap",
                "تحديد مواضع تفوق النظراء في النمو وسد الفجوة",
            )],
        },
        (Comparative, Weak) => Template {
            interpretation: (
                "{name} of {value} falls well behind the comparison base",
                "{name} عند {value} متأخرة بوضوح عن أساس المقارنة",
            ),
            recommendations: &[(
                "Diagnose whether the shortfall is cyclical or structural",
                "تشخيص ما إذا كان القصور دورياً أم هيكلياً",
            )],
        },
        (Comparative, NeedsReview) => Template {
            interpretation: (
                "{name} of {value} moves against its expected direction and needs review",
                "{name} عند {value} تتحرك عكس اتجاهها المتوقع وتحتاج إلى مراجعة",
            ),
            recommendations: &[(
                "Re-express the comparison on a like-for-like basis",
                "إعادة صياغة المقارنة على أساس متماثل",
            )],
        },
        (Modeling, Excellent) => Template {
            interpretation: (
                "{name} of {value} indicates strong model-implied fundamentals",
                "{name} عند {value} تدل على أساسيات قوية وفق النموذج",
            ),
            recommendations: NO_RECOMMENDATIONS,
        },
        (Modeling, Good) => Template {
            interpretation: (
                "{name} of {value} is consistent with sound fundamentals",
                "{name} عند {value} متسقة مع أساسيات سليمة",
            ),
            recommendations: NO_RECOMMENDATIONS,
        },
        (Modeling, Acceptable) => Template {
            interpretation: (
                "{name} of {value} runs below the modeled benchmark",
                "{name} عند {value} دون المعيار النموذجي",
            ),
            recommendations: &[(
                "Revisit the weakest model inputs before drawing conclusions",
                "مراجعة أضعف مدخلات النموذج قبل الخروج باستنتاجات",
            )],
        },
        (Modeling, Weak) => Template {
            interpretation: (
                "{name} of {value} flags deteriorating model-implied health",
                "{name} عند {value} تنذر بتدهور الوضع وفق النموذج",
            ),
            recommendations: &[(
                "Act on the underlying ratios driving the composite down",
                "معالجة النسب الأساسية التي تخفض المؤشر المركب",
            )],
        },
        (Modeling, NeedsReview) => Template {
            interpretation: (
                "{name} of {value} sits outside the model's calibrated range and needs review",
                "{name} عند {value} خارج النطاق المعاير للنموذج وتحتاج إلى مراجعة",
            ),
            recommendations: &[(
                "Validate model assumptions against the company's situation",
                "التحقق من افتراضات النموذج مقابل وضع الشركة",
            )],
        },
    }
}
