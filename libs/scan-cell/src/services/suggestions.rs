// libs/scan-cell/src/services/suggestions.rs
//
// Closed table of treatment suggestions keyed by the classifier's condition
// labels ({Type}_{Severity}, 18 classes). Content is informational only;
// anything prescription-strength points the user at a dermatologist.
use crate::models::{SuggestionCategory, TreatmentSuggestion};

use SuggestionCategory::{Lifestyle, Skincare};

fn entry(
    title: &'static str,
    category: SuggestionCategory,
    description: &'static str,
) -> TreatmentSuggestion {
    TreatmentSuggestion {
        title,
        category,
        description,
    }
}

/// Suggestions for a condition label, or `None` for labels the table does
/// not track.
pub fn suggestions_for(condition: &str) -> Option<Vec<TreatmentSuggestion>> {
    let suggestions = match condition {
        "Blackheads_Mild" => vec![
            entry("Gentle Cleansing Routine", Skincare, "Cleanse twice daily with a gentle, foaming, non-comedogenic cleanser to remove excess oil without stripping moisture."),
            entry("Exfoliation and Topicals", Skincare, "Use a low-strength salicylic acid (0.5-2%) or glycolic acid toner 2-3 times per week to prevent pore blockage."),
            entry("Lifestyle Adjustments", Lifestyle, "Avoid heavy makeup or occlusive products that can clog pores. Maintain a balanced diet and stay hydrated."),
        ],
        "Blackheads_Moderate" => vec![
            entry("Cleansing and Exfoliation", Skincare, "Use a salicylic acid or glycolic acid cleanser once daily to dissolve excess oil and debris in pores."),
            entry("Retinoid Use", Skincare, "Apply a retinoid (adapalene 0.1%) nightly to promote cell turnover and prevent comedone formation."),
            entry("Dietary Modifications", Lifestyle, "Reduce sugary foods and dairy; increase intake of fiber, lean protein, and antioxidants."),
        ],
        "Blackheads_Severe" => vec![
            entry("Advanced Topicals", Skincare, "Use prescription-strength retinoids (tretinoin or adapalene 0.3%) under dermatologist supervision."),
            entry("Professional Extraction or Chemical Peels", Skincare, "Dermatologist-performed extractions or light chemical peels can help clear deep-seated comedones."),
            entry("Lifestyle Support", Lifestyle, "Minimize stress and maintain consistent sleep and hydration patterns to support skin balance."),
        ],
        "Cystic_Mild" => vec![
            entry("Cleansing and Soothing Care", Skincare, "Cleanse gently with a hydrating, non-stripping cleanser. Avoid picking or squeezing cysts."),
            entry("Topical Anti-Inflammatories", Skincare, "Use benzoyl peroxide (2.5%) or sulfur-based spot treatments to reduce inflammation."),
            entry("Lifestyle and Hormone Awareness", Lifestyle, "Track hormonal cycles; consult a dermatologist if breakouts correlate with menstrual changes."),
        ],
        "Cystic_Moderate" => vec![
            entry("Targeted Topical Treatments", Skincare, "Combine benzoyl peroxide with a retinoid (adapalene 0.1%) to target deep inflammation and prevent new cysts."),
            entry("Professional Guidance", Skincare, "Dermatologists may prescribe oral antibiotics or hormonal therapy for persistent cystic breakouts."),
            entry("Anti-Inflammatory Diet", Lifestyle, "Incorporate foods rich in omega-3s, green tea, and zinc; reduce processed and high-glycemic foods."),
        ],
        "Cystic_Severe" => vec![
            entry("Medical Treatment Required", Skincare, "Oral isotretinoin is often the most effective option for severe cystic acne. Must be prescribed by a dermatologist."),
            entry("Supportive Skincare", Skincare, "Use gentle cleansers and non-comedogenic moisturizers to reduce dryness and irritation during treatment."),
            entry("Avoid Aggravation", Lifestyle, "Do not attempt extraction. Limit dairy, sugar, and processed foods that can worsen inflammation."),
        ],
        "Nodular_Mild" => vec![
            entry("Cleansing and Soothing", Skincare, "Cleanse gently and apply ice compresses to reduce swelling."),
            entry("Spot Treatments", Skincare, "Use benzoyl peroxide gel on affected areas to limit bacterial growth."),
            entry("Lifestyle Support", Lifestyle, "Manage stress and ensure proper hydration to support the skin barrier."),
        ],
        "Nodular_Moderate" => vec![
            entry("Topical and Oral Combination Therapy", Skincare, "Use retinoids alongside dermatologist-prescribed oral antibiotics to reduce inflammation."),
            entry("Anti-Inflammatory Skincare", Skincare, "Avoid harsh scrubs and fragranced products; use calming ingredients like niacinamide."),
            entry("Lifestyle Adjustments", Lifestyle, "Reduce dairy and high-glycemic foods; incorporate zinc and vitamin A-rich foods."),
        ],
        "Nodular_Severe" => vec![
            entry("Professional Intervention", Skincare, "Consult a dermatologist for oral isotretinoin or corticosteroid injections for large nodules."),
            entry("Supportive Care", Skincare, "Use gentle cleansers and avoid popping or applying pressure to lesions."),
            entry("Holistic Care", Lifestyle, "Maintain stress control, sleep, and balanced nutrition for long-term healing."),
        ],
        "Papules_Mild" => vec![
            entry("Cleansing and Spot Care", Skincare, "Use a mild cleanser and spot-treat with benzoyl peroxide or salicylic acid."),
            entry("Barrier Support", Skincare, "Moisturize daily to prevent dryness and irritation."),
            entry("Lifestyle Focus", Lifestyle, "Avoid touching your face and reduce dietary triggers like sugar and dairy."),
        ],
        "Papules_Moderate" => vec![
            entry("Targeted Topicals", Skincare, "Apply topical retinoids (e.g., adapalene 0.1%) nightly to promote cell turnover and reduce inflammation."),
            entry("Anti-Inflammatory Care", Skincare, "Incorporate niacinamide or azelaic acid to calm redness and swelling."),
            entry("Diet and Hydration", Lifestyle, "Focus on a low-glycemic diet, increase water intake, and reduce alcohol consumption."),
        ],
        "Papules_Severe" => vec![
            entry("Advanced Topicals and Oral Support", Skincare, "Combine prescription retinoids with oral antibiotics to reduce widespread inflammation."),
            entry("Moisturization and Repair", Skincare, "Use ceramide-based moisturizers and avoid exfoliating products during flare-ups."),
            entry("Lifestyle and Stress Control", Lifestyle, "Engage in stress management and consistent sleep routines to minimize hormonal triggers."),
        ],
        "Pustules_Mild" => vec![
            entry("Antibacterial Cleansing", Skincare, "Use a gentle cleanser with benzoyl peroxide (2.5%) to prevent bacterial growth."),
            entry("Targeted Spot Treatment", Skincare, "Apply sulfur or salicylic acid treatments only to affected areas."),
            entry("Healthy Lifestyle Habits", Lifestyle, "Avoid picking pustules and maintain a balanced diet with anti-inflammatory foods."),
        ],
        "Pustules_Moderate" => vec![
            entry("Dual Therapy Approach", Skincare, "Use a topical retinoid at night and benzoyl peroxide in the morning."),
            entry("Professional Consultation", Skincare, "If inflammation persists, consider dermatologist-prescribed antibiotics."),
            entry("Dietary and Sleep Care", Lifestyle, "Avoid processed foods, prioritize hydration, and get adequate rest."),
        ],
        "Pustules_Severe" => vec![
            entry("Medical Management", Skincare, "Combine oral antibiotics with topical retinoids and benzoyl peroxide. Avoid manual extraction."),
            entry("Barrier Recovery", Skincare, "Use gentle, non-irritating skincare to support healing and prevent scarring."),
            entry("Lifestyle Support", Lifestyle, "Adopt a low-inflammatory diet and ensure consistent sleep and stress management."),
        ],
        "Whiteheads_Mild" => vec![
            entry("Gentle Cleansing", Skincare, "Wash twice daily with a mild cleanser. Avoid pore-clogging products."),
            entry("Topical Exfoliation", Skincare, "Use a low-strength salicylic acid product to clear pores and prevent new whiteheads."),
            entry("Lifestyle", Lifestyle, "Keep pillowcases and phone screens clean to reduce bacteria transfer."),
        ],
        "Whiteheads_Moderate" => vec![
            entry("Active Exfoliation", Skincare, "Use salicylic acid and a topical retinoid (adapalene) to enhance skin turnover."),
            entry("Hydration and Repair", Skincare, "Use a lightweight, oil-free moisturizer to maintain hydration."),
            entry("Diet and Lifestyle", Lifestyle, "Limit dairy and sugar; manage stress through exercise or relaxation."),
        ],
        "Whiteheads_Severe" => vec![
            entry("Advanced Retinoid Regimen", Skincare, "Use dermatologist-prescribed retinoids or chemical peels for deep comedones."),
            entry("Medical Supervision", Skincare, "Oral retinoids may be prescribed for persistent or scarring whiteheads."),
            entry("Lifestyle Consistency", Lifestyle, "Maintain healthy sleep, hydration, and nutrition to regulate oil production."),
        ],
        _ => return None,
    };

    Some(suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONDITIONS: [&str; 18] = [
        "Blackheads_Mild", "Blackheads_Moderate", "Blackheads_Severe",
        "Cystic_Mild", "Cystic_Moderate", "Cystic_Severe",
        "Nodular_Mild", "Nodular_Moderate", "Nodular_Severe",
        "Papules_Mild", "Papules_Moderate", "Papules_Severe",
        "Pustules_Mild", "Pustules_Moderate", "Pustules_Severe",
        "Whiteheads_Mild", "Whiteheads_Moderate", "Whiteheads_Severe",
    ];

    #[test]
    fn every_classifier_label_has_suggestions() {
        for condition in CONDITIONS {
            let suggestions = suggestions_for(condition)
                .unwrap_or_else(|| panic!("no suggestions for {}", condition));
            assert!(!suggestions.is_empty());
            assert!(suggestions
                .iter()
                .any(|s| s.category == SuggestionCategory::Lifestyle));
            assert!(suggestions
                .iter()
                .any(|s| s.category == SuggestionCategory::Skincare));
        }
    }

    #[test]
    fn unknown_labels_resolve_to_none() {
        assert!(suggestions_for("Rosacea_Mild").is_none());
        assert!(suggestions_for("").is_none());
        assert!(suggestions_for("blackheads_mild").is_none());
    }
}
