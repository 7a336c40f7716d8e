use std::fmt;

use super::{
    DEFAULT_LANGUAGE, DEFAULT_VOICE, EXPRESS_AS, ProsodyValue, wrap_document, write_element,
};

/// Strength of an `emphasis` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmphasisLevel {
    Strong,
    #[default]
    Moderate,
    Reduced,
}

impl EmphasisLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmphasisLevel::Strong => "strong",
            EmphasisLevel::Moderate => "moderate",
            EmphasisLevel::Reduced => "reduced",
        }
    }
}

/// Phonetic alphabet of a `phoneme` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhoneticAlphabet {
    #[default]
    Ipa,
    Sapi,
}

impl PhoneticAlphabet {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhoneticAlphabet::Ipa => "ipa",
            PhoneticAlphabet::Sapi => "sapi",
        }
    }
}

/// Interpretation hint of a `say-as` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpretAs {
    Number,
    Ordinal,
    Digits,
    Date,
    Time,
    Telephone,
}

impl InterpretAs {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterpretAs::Number => "number",
            InterpretAs::Ordinal => "ordinal",
            InterpretAs::Digits => "digits",
            InterpretAs::Date => "date",
            InterpretAs::Time => "time",
            InterpretAs::Telephone => "telephone",
        }
    }
}

/// One piece of content under the `voice` element.
#[derive(Debug, Clone, PartialEq)]
pub enum SsmlNode {
    Text(String),
    Prosody {
        content: String,
        rate: Option<ProsodyValue>,
        pitch: Option<ProsodyValue>,
        volume: Option<ProsodyValue>,
    },
    ExpressAs {
        content: String,
        style: String,
        style_degree: Option<f64>,
        role: Option<String>,
    },
    Break {
        time: String,
    },
    Emphasis {
        content: String,
        level: EmphasisLevel,
    },
    Phoneme {
        content: String,
        ph: String,
        alphabet: PhoneticAlphabet,
    },
    SayAs {
        content: String,
        interpret_as: InterpretAs,
        format: Option<String>,
    },
}

impl SsmlNode {
    fn write_to(&self, out: &mut String) {
        match self {
            SsmlNode::Text(text) => out.push_str(&super::escape_xml(text)),
            SsmlNode::Prosody {
                content,
                rate,
                pitch,
                volume,
            } => {
                let attributes: Vec<_> = [("rate", rate), ("pitch", pitch), ("volume", volume)]
                    .into_iter()
                    .filter_map(|(key, value)| value.as_ref().map(|v| (key, v.to_string())))
                    .collect();
                write_element(out, "prosody", &attributes, Some(content));
            }
            SsmlNode::ExpressAs {
                content,
                style,
                style_degree,
                role,
            } => {
                let mut attributes = vec![("style", style.clone())];
                if let Some(degree) = style_degree {
                    attributes.push(("styledegree", degree.to_string()));
                }
                if let Some(role) = role {
                    attributes.push(("role", role.clone()));
                }
                write_element(out, EXPRESS_AS, &attributes, Some(content));
            }
            SsmlNode::Break { time } => {
                write_element(out, "break", &[("time", time.clone())], None);
            }
            SsmlNode::Emphasis { content, level } => {
                write_element(
                    out,
                    "emphasis",
                    &[("level", level.as_str().to_string())],
                    Some(content),
                );
            }
            SsmlNode::Phoneme {
                content,
                ph,
                alphabet,
            } => {
                write_element(
                    out,
                    "phoneme",
                    &[
                        ("alphabet", alphabet.as_str().to_string()),
                        ("ph", ph.clone()),
                    ],
                    Some(content),
                );
            }
            SsmlNode::SayAs {
                content,
                interpret_as,
                format,
            } => {
                let mut attributes = vec![("interpret-as", interpret_as.as_str().to_string())];
                if let Some(format) = format {
                    attributes.push(("format", format.clone()));
                }
                write_element(out, "say-as", &attributes, Some(content));
            }
        }
    }
}

/// Fluent builder for multi-part SSML documents.
///
/// Nodes are emitted under a single `voice` element in insertion order.
///
/// ```
/// use ssml_gateway::core::ssml::{EmphasisLevel, SsmlBuilder};
///
/// let ssml = SsmlBuilder::new("en-US-JennyNeural", "en-US")
///     .text("Hello")
///     .break_time("300ms")
///     .emphasis("world", EmphasisLevel::Strong)
///     .build();
///
/// assert!(ssml.contains(r#"Hello<break time="300ms"/><emphasis level="strong">world</emphasis>"#));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SsmlBuilder {
    voice: String,
    language: String,
    nodes: Vec<SsmlNode>,
}

impl Default for SsmlBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_VOICE, DEFAULT_LANGUAGE)
    }
}

impl SsmlBuilder {
    pub fn new(voice: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            voice: voice.into(),
            language: language.into(),
            nodes: Vec::new(),
        }
    }

    pub fn nodes(&self) -> &[SsmlNode] {
        &self.nodes
    }

    /// Appends an arbitrary node.
    pub fn node(mut self, node: SsmlNode) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn text(self, content: impl Into<String>) -> Self {
        self.node(SsmlNode::Text(content.into()))
    }

    /// Text with prosody; `None` leaves an attribute out.
    pub fn prosody(
        self,
        content: impl Into<String>,
        rate: Option<ProsodyValue>,
        pitch: Option<ProsodyValue>,
        volume: Option<ProsodyValue>,
    ) -> Self {
        self.node(SsmlNode::Prosody {
            content: content.into(),
            rate,
            pitch,
            volume,
        })
    }

    pub fn express_as(
        self,
        content: impl Into<String>,
        style: impl Into<String>,
        style_degree: Option<f64>,
        role: Option<&str>,
    ) -> Self {
        self.node(SsmlNode::ExpressAs {
            content: content.into(),
            style: style.into(),
            style_degree,
            role: role.filter(|r| !r.is_empty()).map(str::to_string),
        })
    }

    /// Pause of `time`, e.g. `"500ms"` or `"2s"`.
    pub fn break_time(self, time: impl Into<String>) -> Self {
        self.node(SsmlNode::Break { time: time.into() })
    }

    pub fn emphasis(self, content: impl Into<String>, level: EmphasisLevel) -> Self {
        self.node(SsmlNode::Emphasis {
            content: content.into(),
            level,
        })
    }

    pub fn phoneme(
        self,
        content: impl Into<String>,
        ph: impl Into<String>,
        alphabet: PhoneticAlphabet,
    ) -> Self {
        self.node(SsmlNode::Phoneme {
            content: content.into(),
            ph: ph.into(),
            alphabet,
        })
    }

    pub fn say_as(
        self,
        content: impl Into<String>,
        interpret_as: InterpretAs,
        format: Option<&str>,
    ) -> Self {
        self.node(SsmlNode::SayAs {
            content: content.into(),
            interpret_as,
            format: format.filter(|f| !f.is_empty()).map(str::to_string),
        })
    }

    /// Serializes the document. An empty builder yields an empty `voice`.
    pub fn build(&self) -> String {
        let mut content = String::new();
        for node in &self.nodes {
            node.write_to(&mut content);
        }
        wrap_document(&self.language, &self.voice, &content)
    }
}

impl fmt::Display for SsmlBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}
