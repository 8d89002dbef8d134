//! Conversation-level synthesis.
//!
//! All turns are dispatched at once and polled together on the calling task.
//! Each unit carries its turn index; results are collected in completion
//! order, sorted back into playback order and concatenated byte-for-byte.
//! There is no concurrency limit: a conversation with N turns has N provider
//! calls in flight.

use crate::error::VoiceError;
use crate::selector::VoiceMap;
use crate::tts::{validate_turn_text, TurnSynthesizer};
use bytes::{Bytes, BytesMut};
use futures_util::stream::{FuturesUnordered, StreamExt};
use podcast_types::{AudioFormat, ConversationTurn};
use std::time::Instant;
use tracing::{error, info};

/// Audio for one turn, tagged with the turn's position in the conversation.
#[derive(Debug)]
struct SynthesisResult {
    index: usize,
    audio: Bytes,
}

/// The concatenated conversation audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodcastAudio {
    pub data: Bytes,
    pub format: AudioFormat,
    /// Byte length of each segment, in playback order.
    pub segment_lengths: Vec<usize>,
}

impl PodcastAudio {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}

/// Joins segments in index order without touching their contents.
fn concatenate(mut segments: Vec<SynthesisResult>, format: AudioFormat) -> PodcastAudio {
    segments.sort_by_key(|segment| segment.index);

    let total: usize = segments.iter().map(|segment| segment.audio.len()).sum();
    let mut data = BytesMut::with_capacity(total);
    let mut segment_lengths = Vec::with_capacity(segments.len());
    for segment in segments {
        segment_lengths.push(segment.audio.len());
        data.extend_from_slice(&segment.audio);
    }

    PodcastAudio {
        data: data.freeze(),
        format,
        segment_lengths,
    }
}

/// Renders a whole conversation to a single audio buffer.
#[derive(Debug, Clone)]
pub struct Pipeline {
    synthesizer: TurnSynthesizer,
}

impl Pipeline {
    pub fn new(synthesizer: TurnSynthesizer) -> Self {
        Self { synthesizer }
    }

    pub fn synthesizer(&self) -> &TurnSynthesizer {
        &self.synthesizer
    }

    /// Synthesizes every turn concurrently and concatenates the results in
    /// turn order.
    ///
    /// All-or-nothing: text validation and voice resolution happen for every
    /// turn before any provider call, and the first turn that exhausts its
    /// fallback chain fails the run. Remaining in-flight calls are dropped.
    pub async fn synthesize_conversation(
        &self,
        turns: &[ConversationTurn],
        voices: &VoiceMap,
    ) -> Result<PodcastAudio, VoiceError> {
        if turns.is_empty() {
            return Err(VoiceError::InvalidRequest("conversation has no turns".to_string()));
        }

        let assignments = turns
            .iter()
            .enumerate()
            .map(|(index, turn)| {
                validate_turn_text(turn)?;
                let voice = voices.voice_for(&turn.person_id)?;
                Ok((index, turn, voice))
            })
            .collect::<Result<Vec<_>, VoiceError>>()?;

        let started = Instant::now();
        let synthesizer = &self.synthesizer;
        let mut pending: FuturesUnordered<_> = assignments
            .into_iter()
            .map(|(index, turn, voice)| async move {
                (index, synthesizer.synthesize_turn(turn, voice).await)
            })
            .collect();

        let mut segments = Vec::with_capacity(turns.len());
        while let Some((index, result)) = pending.next().await {
            match result {
                Ok(audio) => segments.push(SynthesisResult { index, audio }),
                Err(e) => {
                    error!(
                        turn_index = index,
                        turn_id = %turns[index].id,
                        error = %e,
                        "turn synthesis failed, aborting conversation"
                    );
                    return Err(e);
                }
            }
        }

        let audio = concatenate(segments, synthesizer.output_format());
        info!(
            turns = turns.len(),
            audio_bytes = audio.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "conversation synthesized"
        );
        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(index: usize, audio: &'static [u8]) -> SynthesisResult {
        SynthesisResult {
            index,
            audio: Bytes::from_static(audio),
        }
    }

    #[test]
    fn concatenate_restores_index_order() {
        let audio = concatenate(
            vec![segment(2, b"ccc"), segment(0, b"a"), segment(1, b"bb")],
            AudioFormat::Mp3,
        );
        assert_eq!(&audio.data[..], b"abbccc");
        assert_eq!(audio.segment_lengths, vec![1, 2, 3]);
    }

    #[test]
    fn concatenate_length_is_sum_of_segments() {
        let audio = concatenate(
            vec![segment(1, b"\x00\x01"), segment(0, b"\xff\xfb\x90")],
            AudioFormat::Mp3,
        );
        assert_eq!(audio.len(), 5);
        assert_eq!(audio.content_type(), "audio/mpeg");
    }
}
