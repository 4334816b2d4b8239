//! Tokenized log messages

use crate::battle::Pokemon;
use crate::tag::Tag;

/// One tokenized line of a battle log: the tag followed by its fields
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    fields: Vec<String>,
}

impl Message {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if fields.is_empty() {
            fields.push(String::new());
        }
        Self { fields }
    }

    /// Tokenize a single line, with or without its leading `|`
    pub fn from_line(line: &str) -> Self {
        let line = line.trim();
        let line = line.strip_prefix('|').unwrap_or(line);
        Self::new(line.split('|').map(str::trim))
    }

    /// Raw tag string (empty for blank lines)
    pub fn tag_str(&self) -> &str {
        &self.fields[0]
    }

    /// Parsed tag, `None` for unknown or empty tags
    pub fn tag(&self) -> Option<Tag> {
        Tag::from_protocol(self.tag_str())
    }

    /// Whether the tag marks a minor action (`-` prefix)
    pub fn is_minor(&self) -> bool {
        self.tag_str().starts_with('-')
    }

    /// Field by index; index 0 is the tag itself
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Non-empty field by index
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.field(index).filter(|s| !s.is_empty())
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tag_str().is_empty() && self.fields.len() == 1
    }

    /// Parse the field at `index` as a pokemon ident
    pub fn pokemon(&self, index: usize) -> Option<Pokemon> {
        self.field(index).and_then(Pokemon::parse)
    }

    /// Bracketed trailing annotations (`[from] ...`, `[of] ...`, `[upkeep]`)
    pub fn annotations(&self) -> Annotations {
        Annotations::parse(self.fields.iter().skip(1).map(String::as_str))
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "|{}", self.fields.join("|"))
    }
}

/// Parsed bracketed annotations of a message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Annotations {
    /// `[from] EFFECT`: the effect that caused this message
    pub from: Option<String>,
    /// `[of] POKEMON`: the pokemon the effect came from
    pub of: Option<String>,
    /// Bare flags such as `upkeep`, `still`, `silent`
    pub flags: Vec<String>,
}

impl Annotations {
    pub fn parse<'a>(fields: impl IntoIterator<Item = &'a str>) -> Self {
        let mut annotations = Annotations::default();

        for field in fields {
            let Some(rest) = field.strip_prefix('[') else {
                continue;
            };
            let Some((name, value)) = rest.split_once(']') else {
                continue;
            };
            let value = value.trim();

            match name {
                "from" if !value.is_empty() => annotations.from = Some(value.to_string()),
                "of" if !value.is_empty() => annotations.of = Some(value.to_string()),
                _ => annotations.flags.push(name.to_string()),
            }
        }

        annotations
    }

    /// The pokemon named by `[of]`, if it parses
    pub fn of_pokemon(&self) -> Option<Pokemon> {
        self.of.as_deref().and_then(Pokemon::parse)
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }
}

/// Split a raw log transcript into messages, one per line, in order.
///
/// Nothing is filtered or validated; blank lines become messages with an
/// empty tag.
pub fn tokenize(transcript: &str) -> Vec<Message> {
    transcript.lines().map(Message::from_line).collect()
}
