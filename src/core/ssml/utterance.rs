use super::{
    DEFAULT_LANGUAGE, DEFAULT_VOICE, EXPRESS_AS, ProsodyValue, wrap_document, write_element,
    write_end, write_start,
};

/// Single-voice utterance with prosody and an optional speaking style.
///
/// Without a style the voice contains one `prosody` element. With a style the
/// `prosody` element is wrapped in `mstts:express-as`, which carries the
/// style name, the optional intensity (`styledegree`) and the optional role.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub voice: String,
    pub volume: ProsodyValue,
    pub rate: ProsodyValue,
    pub pitch: ProsodyValue,
    pub style: Option<String>,
    pub style_degree: Option<f64>,
    pub role: Option<String>,
}

impl Utterance {
    /// Utterance with the default voice, full volume and neutral rate/pitch.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: DEFAULT_VOICE.to_string(),
            volume: ProsodyValue::Percent(100.0),
            rate: ProsodyValue::Percent(0.0),
            pitch: ProsodyValue::Percent(0.0),
            style: None,
            style_degree: None,
            role: None,
        }
    }

    pub fn voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    pub fn volume(mut self, volume: impl Into<ProsodyValue>) -> Self {
        self.volume = volume.into();
        self
    }

    pub fn rate(mut self, rate: impl Into<ProsodyValue>) -> Self {
        self.rate = rate.into();
        self
    }

    pub fn pitch(mut self, pitch: impl Into<ProsodyValue>) -> Self {
        self.pitch = pitch.into();
        self
    }

    /// Sets the speaking style. Empty names are ignored.
    pub fn style(mut self, style: impl Into<String>) -> Self {
        let style = style.into();
        self.style = (!style.is_empty()).then_some(style);
        self
    }

    pub fn style_degree(mut self, degree: f64) -> Self {
        self.style_degree = Some(degree);
        self
    }

    /// Sets the role-play persona. Empty roles are ignored.
    pub fn role(mut self, role: impl Into<String>) -> Self {
        let role = role.into();
        self.role = (!role.is_empty()).then_some(role);
        self
    }

    /// Renders the complete `<speak>` document.
    pub fn to_ssml(&self) -> String {
        let mut prosody = String::new();
        write_element(
            &mut prosody,
            "prosody",
            &[
                ("volume", self.volume.to_string()),
                ("rate", self.rate.to_string()),
                ("pitch", self.pitch.to_string()),
            ],
            Some(&self.text),
        );

        let content = match &self.style {
            None => prosody,
            Some(style) => {
                let mut attributes = vec![("style", style.clone())];
                if let Some(degree) = self.style_degree {
                    attributes.push(("styledegree", degree.to_string()));
                }
                if let Some(role) = &self.role {
                    attributes.push(("role", role.clone()));
                }

                let mut express = String::new();
                write_start(&mut express, EXPRESS_AS, &attributes);
                express.push_str(&prosody);
                write_end(&mut express, EXPRESS_AS);
                express
            }
        };

        wrap_document(DEFAULT_LANGUAGE, &self.voice, &content)
    }
}

/// Builds a single-voice utterance document in one call.
#[allow(clippy::too_many_arguments)]
pub fn build_utterance(
    voice: &str,
    volume: impl Into<ProsodyValue>,
    rate: impl Into<ProsodyValue>,
    pitch: impl Into<ProsodyValue>,
    style: Option<&str>,
    style_degree: Option<f64>,
    role: Option<&str>,
    text: &str,
) -> String {
    let mut utterance = Utterance::new(text)
        .voice(voice)
        .volume(volume)
        .rate(rate)
        .pitch(pitch);
    if let Some(style) = style {
        utterance = utterance.style(style);
    }
    if let Some(degree) = style_degree {
        utterance = utterance.style_degree(degree);
    }
    if let Some(role) = role {
        utterance = utterance.role(role);
    }
    utterance.to_ssml()
}
