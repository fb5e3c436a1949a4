// src/persona/mod.rs
// Persona blocks that open every chat prompt.

pub mod alex;

pub use alex::ALEX_PERSONA_PROMPT;

/// Voices the chat service can speak in. Only Alex exists today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Persona {
    #[default]
    Alex,
}

impl Persona {
    /// Fixed instruction block for this persona; identical across requests.
    pub fn prompt(&self) -> &'static str {
        match self {
            Persona::Alex => ALEX_PERSONA_PROMPT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alex_prompt_sets_tone() {
        let prompt = Persona::default().prompt();
        assert!(prompt.contains("best friend named Alex"));
        assert!(prompt.contains("2-4 sentences"));
    }
}
