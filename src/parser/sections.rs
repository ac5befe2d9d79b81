/// Title given to text found before the first header.
pub const ROOT: &str = "root";

const ATX_PREFIX: &str = "## ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub content: String,
}

/// Sections in encounter order. Titles may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections(Vec<Section>);

impl Sections {
    /// Content of the first section with this title.
    pub fn get(&self, title: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|s| s.title == title)
            .map(|s| s.content.as_str())
    }

    pub fn content(&self, title: &str) -> &str {
        self.get(title).unwrap_or_default()
    }

    pub fn has_non_empty(&self, title: &str) -> bool {
        self.get(title).is_some_and(|content| !content.is_empty())
    }

    pub fn titles(&self) -> Vec<String> {
        self.0.iter().map(|s| s.title.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Slice a document body on `## Title` and Setext (`Title` + `---`) headers.
pub fn extract_sections(body: &str) -> Sections {
    let rows: Vec<&str> = body.split('\n').collect();
    let mut sections = Vec::new();
    let mut current = ROOT.to_string();
    let mut start = 0;

    for (i, row) in rows.iter().enumerate() {
        if let Some(title) = row.strip_prefix(ATX_PREFIX) {
            let title = std::mem::replace(&mut current, normalize_title(title));
            sections.push(Section {
                title,
                content: join_trimmed(&rows[start..i]),
            });
            start = i + 1;
            continue;
        }

        if i > start && is_underline(row) {
            let previous = rows[i - 1];
            // After a blank line this is a horizontal rule
            if previous.trim().is_empty() {
                continue;
            }

            let title = std::mem::replace(&mut current, normalize_title(previous));
            sections.push(Section {
                title,
                content: join_trimmed(&rows[start..i - 1]),
            });
            start = i + 1;
        }
    }

    sections.push(Section {
        title: current,
        content: join_trimmed(&rows[start..]),
    });

    if sections.first().is_some_and(|s| s.content.is_empty()) {
        sections.remove(0);
    }

    Sections(sections)
}

fn is_underline(row: &str) -> bool {
    let row = row.trim_end();
    row.len() >= 3 && row.chars().all(|c| c == '-')
}

fn normalize_title(raw: &str) -> String {
    raw.trim_matches([' ', '\t']).to_lowercase()
}

fn join_trimmed(rows: &[&str]) -> String {
    rows.join("\n").trim_matches([' ', '\t', '\n']).to_string()
}
