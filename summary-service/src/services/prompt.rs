//! Prompt template for the summary and nursing chart.
//!
//! The web client splits the model output on the bold labels below
//! (`**Summary:**`, `**Nursing Chart:**`, then one label per chart section),
//! so the label text and section order must stay stable.

/// Nursing chart subsections, in the order the model must emit them.
pub const CHART_SECTIONS: [&str; 5] = [
    "Assessment",
    "Diagnosis",
    "Plan",
    "Interventions",
    "Evaluation",
];

const PREAMBLE: &str = "You are a clinical assistant summarizing a medical interaction between a nurse and a patient.";

const INSTRUCTIONS: &str = "\
Instructions:
1. Identify symptoms, medications, actions taken, and any responses or concerns.
2. Focus on key medical terms such as pain, medication, blood pressure, vomiting, history and follow-up.
3. Write a concise, clinically useful summary paragraph describing the visit and its outcome.
4. Then write a structured nursing chart with exactly the five sections listed below, in that order.

Formatting rules:
- Start with the label **Summary:** followed by the summary paragraph on the next line.
- Then write the label **Nursing Chart:** on its own line.
- Under the chart, write each section label in bold with a trailing colon, followed by that section's content on the next lines.
- Each section appears exactly once. Never nest a section inside another section.
- Do not repeat content that already appears in another section.
- Do not add sections, headings or closing remarks beyond those listed.

Use an accurate, clear and professional tone.";

/// Embed an already-trimmed transcript in the fixed instruction template.
pub fn build_chart_prompt(transcript: &str) -> String {
    let sections = CHART_SECTIONS
        .iter()
        .map(|section| format!("**{}:**", section))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{PREAMBLE}\n\nConversation:\n---\n{transcript}\n---\n\n{INSTRUCTIONS}\n\nRequired output structure:\n**Summary:**\n**Nursing Chart:**\n{sections}\n"
    )
}
