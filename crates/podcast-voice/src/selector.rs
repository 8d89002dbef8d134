//! Persona → voice mapping.
//!
//! Voices come from a fixed table keyed by voice character and sex. Every
//! voice in the table supports both the neural and the standard Polly engine
//! for `en-US`, so all fallback tiers can reuse the same voice.

use crate::error::VoiceError;
use podcast_types::{Persona, Sex, VoiceCharacter, VoiceId};
use std::collections::HashMap;

/// Returns the provider voice name for a character/sex pair.
fn voice_name(character: VoiceCharacter, sex: Sex) -> &'static str {
    match (character, sex) {
        (VoiceCharacter::Energetic, Sex::Female) => "Kimberly",
        (VoiceCharacter::Energetic, Sex::Male) => "Joey",
        (VoiceCharacter::Calm, Sex::Female) => "Joanna",
        (VoiceCharacter::Calm, Sex::Male) => "Matthew",
        (VoiceCharacter::Sophisticated, Sex::Female) => "Kendra",
        (VoiceCharacter::Sophisticated, Sex::Male) => "Justin",
    }
}

/// Selects the synthesis voice for a persona.
///
/// Missing or unrecognized attributes are rejected rather than defaulted so a
/// mismatched voice never goes unnoticed.
pub fn select_voice(persona: &Persona) -> Result<VoiceId, VoiceError> {
    let sex = persona
        .sex
        .as_deref()
        .ok_or_else(|| {
            VoiceError::InvalidPersona(format!("persona {} has no sex attribute", persona.id))
        })?
        .parse::<Sex>()
        .map_err(|e| VoiceError::InvalidPersona(format!("persona {}: {}", persona.id, e)))?;

    let character = persona
        .voice_character
        .as_deref()
        .ok_or_else(|| {
            VoiceError::InvalidPersona(format!("persona {} has no voice character", persona.id))
        })?
        .parse::<VoiceCharacter>()
        .map_err(|e| VoiceError::InvalidPersona(format!("persona {}: {}", persona.id, e)))?;

    Ok(VoiceId::from(voice_name(character, sex)))
}

/// Voice assignments for every persona in one request.
#[derive(Debug, Clone, Default)]
pub struct VoiceMap {
    voices: HashMap<String, VoiceId>,
}

impl VoiceMap {
    /// Builds the map for all personas in a request.
    ///
    /// Fails with `InvalidRequest` on a duplicate persona id and with
    /// `InvalidPersona` on the first persona whose voice cannot be selected.
    pub fn from_personas(personas: &[Persona]) -> Result<Self, VoiceError> {
        let mut voices = HashMap::with_capacity(personas.len());
        for persona in personas {
            let voice = select_voice(persona)?;
            if voices.insert(persona.id.clone(), voice).is_some() {
                return Err(VoiceError::InvalidRequest(format!(
                    "duplicate persona id: {}",
                    persona.id
                )));
            }
        }
        Ok(Self { voices })
    }

    /// Looks up the voice for a turn's persona reference.
    pub fn voice_for(&self, persona_id: &str) -> Result<&VoiceId, VoiceError> {
        self.voices.get(persona_id).ok_or_else(|| {
            VoiceError::InvalidPersona(format!("unknown persona id: {}", persona_id))
        })
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}
