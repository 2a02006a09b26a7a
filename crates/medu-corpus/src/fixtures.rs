//! Raw entries in both source shapes, modeled on real corpus content.

use serde_json::{json, Value};

fn numeric_level(n: u8, topic: &str) -> Value {
    json!({
        "level": n,
        "summary": format!("{topic} explained at level {n}. It follows a fixed order."),
        "titleEs": format!("Evaluación del paciente, nivel {n}"),
        "explanation": format!("At level {n}, {topic} is a structured assessment of the injured patient."),
        "explanationEs": format!("En el nivel {n}, es una evaluación ordenada del paciente lesionado."),
        "keyTerms": [
            {"term": "ATLS", "definition": "Advanced Trauma Life Support", "pronunciation": "A-T-L-S"},
            {"term": format!("{topic} step {n}"), "definition": "One step of the survey"}
        ],
        "analogies": ["Like a pilot's pre-flight checklist"],
        "examples": ["A cyclist struck by a car"],
        "patientCounselingPoints": ["The team checks the most dangerous problems first"],
    })
}

fn numeric_entry(id: &str, name: &str, name_es: &str, targets: &[&str]) -> Value {
    let references: Vec<Value> = targets
        .iter()
        .map(|t| {
            json!({
                "targetId": t,
                "targetType": "process",
                "relationship": "sibling",
                "label": "Related survey"
            })
        })
        .collect();
    json!({
        "id": id,
        "type": "process",
        "name": name,
        "nameEs": name_es,
        "alternateNames": ["ABCDE approach"],
        "levels": {
            "1": numeric_level(1, name),
            "2": numeric_level(2, name),
            "3": numeric_level(3, name),
            "4": numeric_level(4, name),
            "5": numeric_level(5, name)
        },
        "media": [
            {"id": "abcde-diagram", "type": "image", "filename": "abcde.svg",
             "title": "ABCDE", "description": "The survey sequence", "license": "CC-BY"}
        ],
        "citations": [
            {"id": "atls-10", "type": "guideline", "title": "ATLS Student Course Manual, 10th ed.",
             "authors": ["American College of Surgeons"], "source": "ACS", "year": 2018}
        ],
        "crossReferences": references,
        "tags": {
            "systems": ["all"],
            "topics": ["trauma", "emergency"],
            "keywords": ["ATLS", "ABCDE"],
            "clinicalRelevance": "critical",
            "examRelevance": {"usmle": true, "nbme": true, "shelf": ["surgery", "emergency"]}
        },
        "createdAt": "2025-01-15",
        "updatedAt": "2025-01-15",
        "version": 1,
        "status": "published"
    })
}

pub fn primary_survey() -> Value {
    numeric_entry(
        "emergency-trauma-primary-survey",
        "Primary Survey",
        "Evaluación primaria",
        &["emergency-trauma-secondary-survey"],
    )
}

pub fn secondary_survey() -> Value {
    numeric_entry(
        "emergency-trauma-secondary-survey",
        "Secondary Survey",
        "Evaluación secundaria",
        &["emergency-trauma-primary-survey"],
    )
}

fn string_level(n: u8) -> Value {
    json!({
        "title": format!("Traditional and Western care, part {n}"),
        "titleEs": format!("Medicina tradicional y occidental, parte {n}"),
        "readingLevel": if n <= 2 { "6th-grade" } else { "professional" },
        "content": format!("Many families combine remedios caseros with prescribed medicine (level {n})."),
        "contentEs": format!("Muchas familias combinan remedios caseros con medicinas recetadas (nivel {n})."),
        "keyTerms": [
            {"term": "Integrative care", "definition": "Using traditional and Western approaches together safely"}
        ],
        "clinicalNotes": ["Ask about herbal use without judgment"]
    })
}

pub fn combining_traditional_western() -> Value {
    json!({
        "id": "combining-traditional-western",
        "type": "topic",
        "name": "Combining Traditional and Western Medicine",
        "nameEs": "Combinando la medicina tradicional y occidental",
        "levels": {
            "level1": string_level(1),
            "level2": string_level(2),
            "level3": string_level(3),
            "level4": string_level(4),
            "level5": string_level(5)
        },
        "media": [],
        "citations": [],
        "crossReferences": [
            {"contentId": "topic-common-herbal-remedies-guide", "relationship": "prerequisite"}
        ],
        "tags": ["latino-health", "integrative-medicine", "patient-safety"],
        "createdAt": "2024-11-01T00:00:00Z",
        "updatedAt": "2025-02-10T12:30:00Z",
        "version": 1,
        "status": "published"
    })
}
