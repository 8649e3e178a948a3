use serde::{Deserialize, Serialize};

/// Transcript submitted by the nursing client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryRequest {
    /// Raw conversation text; a missing field reads as empty.
    #[serde(default)]
    pub messages: String,
}

impl SummaryRequest {
    /// The transcript with surrounding whitespace removed, if anything remains.
    pub fn transcript(&self) -> Option<&str> {
        let trimmed = self.messages.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// Model output relayed verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryResponse {
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_messages_field_is_empty() {
        let request: SummaryRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.messages, "");
        assert_eq!(request.transcript(), None);
    }

    #[test]
    fn whitespace_only_transcript_is_rejected() {
        let request = SummaryRequest {
            messages: " \n\t ".to_string(),
        };
        assert_eq!(request.transcript(), None);
    }

    #[test]
    fn transcript_is_trimmed_but_inner_text_kept() {
        let request = SummaryRequest {
            messages: "\n Nurse: Any pain?\nPatient: Yes, 7/10.  ".to_string(),
        };
        assert_eq!(
            request.transcript(),
            Some("Nurse: Any pain?\nPatient: Yes, 7/10.")
        );
    }
}
