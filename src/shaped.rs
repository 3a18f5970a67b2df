use serde::{Deserialize, Serialize};

/// Named fields extracted from a single part of a resource file.
///
/// A part is written as labeled sections:
///
/// ```text
/// type: dialogue
/// text: The door creaks open.
/// It is dark inside.
/// effect: fade-in
/// photo: hall.png
/// ```
///
/// A label starts a field, following unlabeled lines continue it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapedResource {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub text: Option<String>,
    pub effect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Kind,
    Text,
    Effect,
    Photo,
    Audio,
}

impl Field {
    const LABELS: [(&'static str, Field); 5] = [
        ("type", Field::Kind),
        ("text", Field::Text),
        ("effect", Field::Effect),
        ("photo", Field::Photo),
        ("audio", Field::Audio),
    ];

    /// Split `line` into a field and its inline value when it starts with a label
    fn match_label(line: &str) -> Option<(Field, &str)> {
        let trimmed = line.trim_start();
        let (label, value) = trimmed.split_once(':')?;
        Self::LABELS
            .iter()
            .find(|(name, _)| label.trim_end().eq_ignore_ascii_case(name))
            .map(|(_, field)| (*field, value.trim()))
    }
}

impl ShapedResource {
    /// Parse labeled sections out of one part's text.
    /// Text before the first label is ignored; a repeated label replaces the earlier value.
    pub fn parse(segment: &str) -> Self {
        let mut shaped = ShapedResource::default();
        let mut current: Option<(Field, Vec<&str>)> = None;

        for line in segment.lines() {
            if let Some((field, value)) = Field::match_label(line) {
                if let Some((done, lines)) = current.take() {
                    shaped.store(done, &lines);
                }
                current = Some((field, vec![value]));
            } else if let Some((_, lines)) = current.as_mut() {
                lines.push(line.trim_end());
            }
        }

        if let Some((done, lines)) = current {
            shaped.store(done, &lines);
        }

        shaped
    }

    /// True when no labeled section was found
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.text.is_none()
            && self.effect.is_none()
            && self.photo.is_none()
            && self.audio.is_none()
    }

    fn store(&mut self, field: Field, lines: &[&str]) {
        let joined = lines.join("\n");
        let value = joined.trim_end_matches(['\n', ' ', '\t']);
        let value = (!value.is_empty()).then(|| value.to_string());

        let slot = match field {
            Field::Kind => &mut self.kind,
            Field::Text => &mut self.text,
            Field::Effect => &mut self.effect,
            Field::Photo => &mut self.photo,
            Field::Audio => &mut self.audio,
        };
        *slot = value;
    }
}
