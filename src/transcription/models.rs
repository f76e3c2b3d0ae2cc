//! Data models for diarized transcripts.

use serde::{Deserialize, Serialize};

/// Placeholder used when the provider omits the speaker label.
const UNKNOWN_SPEAKER: &str = "Speaker?";

/// Sentinel line used when no diarization data is available.
const NO_DIARIZATION_SENTINEL: &str = "(No speaker diarization data available)";

/// One contiguous speaker turn with a start offset and text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Speaker label as assigned by the provider (e.g. "A", "B").
    pub speaker: String,
    /// Start offset in milliseconds.
    pub start_ms: u64,
    /// Transcribed text content.
    pub text: String,
}

impl TranscriptSegment {
    /// Create a new transcript segment.
    pub fn new(speaker: impl Into<String>, start_ms: u64, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            start_ms,
            text: text.into(),
        }
    }

    /// Format the start offset as `[MM:SS]`, floor-divided from milliseconds.
    pub fn timestamp(&self) -> String {
        let minutes = self.start_ms / 60_000;
        let seconds = (self.start_ms / 1_000) % 60;
        format!("[{:02}:{:02}]", minutes, seconds)
    }
}

/// A complete diarized transcript.
///
/// If `segments` is empty, only `full_text` is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    /// Full transcript text as returned by the provider.
    pub full_text: String,
    /// Speaker-labeled segments in chronological speaking order.
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    /// Create a transcript from a full text and segments.
    pub fn new(full_text: impl Into<String>, segments: Vec<TranscriptSegment>) -> Self {
        Self {
            full_text: full_text.into(),
            segments,
        }
    }

    /// Normalize a provider diarization response into a canonical transcript.
    ///
    /// The provider may call the speaker-turn list `utterances` or `segments`
    /// (same shape); `utterances` wins when both are present and non-empty.
    /// Missing fields never fail: speaker falls back to a placeholder, start
    /// to 0 and text to the empty string.
    pub fn from_response(response: &DiarizationResponse) -> Self {
        let raw = match (&response.utterances, &response.segments) {
            (Some(utts), _) if !utts.is_empty() => utts.as_slice(),
            (_, Some(segs)) if !segs.is_empty() => segs.as_slice(),
            _ => &[],
        };

        let segments = raw
            .iter()
            .map(|s| TranscriptSegment {
                speaker: s
                    .speaker
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_SPEAKER.to_string()),
                start_ms: s.start.unwrap_or(0),
                text: s.text.clone().unwrap_or_default(),
            })
            .collect();

        Self {
            full_text: response.text.clone().unwrap_or_default(),
            segments,
        }
    }

    /// Render the transcript as human-readable, speaker-labeled text.
    ///
    /// Each segment renders as `[MM:SS] Speaker <speaker>: <text>` in input
    /// order. Without segments, a sentinel line is followed by the raw text.
    pub fn format_with_speakers(&self) -> String {
        if self.segments.is_empty() {
            return format!("{}\n\n{}", NO_DIARIZATION_SENTINEL, self.full_text);
        }

        self.segments
            .iter()
            .map(|s| {
                format!(
                    "{} Speaker {}: {}",
                    s.timestamp(),
                    s.speaker,
                    s.text.trim()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Raw diarization response as returned by the provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiarizationResponse {
    /// Flat transcript text.
    pub text: Option<String>,
    /// Speaker turns, primary field name.
    pub utterances: Option<Vec<RawSegment>>,
    /// Speaker turns, alternative field name used by some provider versions.
    pub segments: Option<Vec<RawSegment>>,
}

/// One raw speaker turn in a provider response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSegment {
    pub speaker: Option<String>,
    /// Start offset in milliseconds.
    pub start: Option<u64>,
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(speaker: &str, start: u64, text: &str) -> RawSegment {
        RawSegment {
            speaker: Some(speaker.to_string()),
            start: Some(start),
            text: Some(text.to_string()),
        }
    }

    #[test]
    fn test_timestamp_formatting() {
        let segment = TranscriptSegment::new("A", 90_000, "ninety seconds in");
        assert_eq!(segment.timestamp(), "[01:30]");

        assert_eq!(TranscriptSegment::new("A", 0, "").timestamp(), "[00:00]");
        assert_eq!(TranscriptSegment::new("A", 59_999, "").timestamp(), "[00:59]");
        assert_eq!(TranscriptSegment::new("A", 3_600_000, "").timestamp(), "[60:00]");
    }

    #[test]
    fn test_utterances_take_priority_over_segments() {
        let response = DiarizationResponse {
            text: Some("hello world".to_string()),
            utterances: Some(vec![raw("A", 0, "hello")]),
            segments: Some(vec![raw("B", 0, "ignored")]),
        };

        let transcript = Transcript::from_response(&response);
        assert_eq!(transcript.segments.len(), 1);
        assert_eq!(transcript.segments[0].speaker, "A");
    }

    #[test]
    fn test_empty_utterances_fall_back_to_segments() {
        let response = DiarizationResponse {
            text: Some("hello".to_string()),
            utterances: Some(vec![]),
            segments: Some(vec![raw("B", 2_000, "hello")]),
        };

        let transcript = Transcript::from_response(&response);
        assert_eq!(transcript.segments.len(), 1);
        assert_eq!(transcript.segments[0].speaker, "B");
        assert_eq!(transcript.segments[0].start_ms, 2_000);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let response = DiarizationResponse {
            text: None,
            utterances: Some(vec![RawSegment::default()]),
            segments: None,
        };

        let transcript = Transcript::from_response(&response);
        assert_eq!(transcript.full_text, "");
        assert_eq!(transcript.segments[0].speaker, "Speaker?");
        assert_eq!(transcript.segments[0].start_ms, 0);
        assert_eq!(transcript.segments[0].text, "");
    }

    #[test]
    fn test_format_with_speakers() {
        let transcript = Transcript::new(
            "Morning. Morning, all set?",
            vec![
                TranscriptSegment::new("A", 0, "Morning. "),
                TranscriptSegment::new("B", 90_000, "Morning, all set?"),
            ],
        );

        let formatted = transcript.format_with_speakers();
        assert_eq!(
            formatted,
            "[00:00] Speaker A: Morning.\n[01:30] Speaker B: Morning, all set?"
        );
    }

    #[test]
    fn test_format_without_segments_uses_sentinel() {
        let transcript = Transcript::new("just a flat transcript", vec![]);
        let formatted = transcript.format_with_speakers();
        assert_eq!(
            formatted,
            "(No speaker diarization data available)\n\njust a flat transcript"
        );
    }
}
