use anyhow::{Result, bail};

/// Instruction sent for every article. `{label}` and `{para}` are filled in
/// per article; literal braces are written doubled.
pub const DEFAULT_TEMPLATE: &str = r#"
Given the label '{label}' and the text below, please extract words from the text that are closely related to the label.
Return the indices of these words in the text as an array and their relevance scores as another array.
Consider the following example:
text: [Tudor Revival architecture, also known as mock Tudor in the UK, first manifested in domestic architecture in the United Kingdom in the latter half of the 19th century.]
label: [architecture]
For the above example, the first word “tudor” and the third word “architecture” are both related to label “architecture”, then I need the output index=[0,2] and scores=[0.5,1], where the output for both index and score is a python list.
The confidence score ranges from 0 to 1


Format the results as follows(the output for both index and score is a python list).And you only need to respond as follows, no extra content:
index: [index1, index2, ...]
scores: [score1, score2, ...]


text:
{para}
"#;

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    /// Template text, braces still doubled.
    Raw(String),
    Label,
    Para,
}

#[derive(Debug, Clone)]
pub struct PromptTemplate {
    segments: Vec<Segment>,
}

impl PromptTemplate {
    /// Parse a template. Only `{label}` and `{para}` placeholders are
    /// recognized, `{para}` is mandatory, and every other brace must be
    /// doubled.
    pub fn new(template: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut raw = String::new();
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    raw.push_str("{{");
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    raw.push_str("}}");
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(ch) => name.push(ch),
                            None => bail!("Unclosed placeholder '{{{}' in prompt template", name),
                        }
                    }

                    let segment = match name.as_str() {
                        "label" => Segment::Label,
                        "para" => Segment::Para,
                        other => bail!("Unknown placeholder '{{{}}}' in prompt template", other),
                    };

                    if !raw.is_empty() {
                        segments.push(Segment::Raw(std::mem::take(&mut raw)));
                    }
                    segments.push(segment);
                }
                '}' => bail!("Single '}}' in prompt template; write '}}}}' for a literal brace"),
                other => raw.push(other),
            }
        }

        if !raw.is_empty() {
            segments.push(Segment::Raw(raw));
        }

        if !segments.contains(&Segment::Para) {
            bail!("Prompt template has no {{para}} placeholder");
        }

        Ok(Self { segments })
    }

    /// Fill in the placeholders. Values are escaped before substitution and
    /// the filled template is resolved in one pass, so braces in either value
    /// come out exactly as they went in.
    pub fn render(&self, label: &str, text: &str) -> String {
        let mut filled = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Raw(raw) => filled.push_str(raw),
                Segment::Label => filled.push_str(&escape_braces(label)),
                Segment::Para => filled.push_str(&escape_braces(text)),
            }
        }

        resolve_braces(&filled)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE).expect("built-in prompt template is valid")
    }
}

pub fn escape_braces(text: &str) -> String {
    text.replace('{', "{{").replace('}', "}}")
}

fn resolve_braces(filled: &str) -> String {
    let mut resolved = String::with_capacity(filled.len());
    let mut chars = filled.chars().peekable();

    while let Some(c) = chars.next() {
        if (c == '{' || c == '}') && chars.peek() == Some(&c) {
            chars.next();
        }
        resolved.push(c);
    }

    resolved
}

pub fn build_annotation_prompt(label: &str, text: &str) -> String {
    PromptTemplate::default().render(label, text)
}
