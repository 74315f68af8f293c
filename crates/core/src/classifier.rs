use crate::subjects::SubjectTable;
use tracing::debug;

/// Sentinel subject for text that matched no keywords (or could not be
/// extracted at all).
pub const UNCLASSIFIED: &str = "Unclassified";

/// Lowercases, maps every non-alphanumeric, non-whitespace character to a
/// space, and collapses whitespace runs. Idempotent.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    // Lowercase first: it can expand one char into several (including
    // combining marks that are not alphanumeric), and the filter has to see
    // what a second pass would see.
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        } else {
            pending_space = true;
        }
    }
    out
}

#[derive(Debug, Clone)]
pub struct Classifier {
    table: SubjectTable,
}

impl Classifier {
    pub fn new(table: SubjectTable) -> Self {
        Self { table }
    }

    /// Scores the text against every subject and returns the winner, or
    /// [`UNCLASSIFIED`] when nothing matched. Each keyword contributes at
    /// most 1 regardless of how often it occurs. Ties go to the
    /// lexicographically smallest subject name.
    pub fn classify(&self, text: &str) -> String {
        let text = normalize(text);

        let mut best: Option<(&str, usize)> = None;
        for (subject, keywords) in self.table.iter() {
            let score = keywords.iter().filter(|kw| text.contains(kw.as_str())).count();
            debug!(subject, score, "subject score");
            // Table iteration is ordered by name, so a strictly greater
            // score is required to displace an earlier subject.
            match best {
                Some((_, top)) if score <= top => {}
                _ if score == 0 => {}
                _ => best = Some((subject, score)),
            }
        }

        match best {
            Some((subject, _)) => subject.to_string(),
            None => UNCLASSIFIED.to_string(),
        }
    }
}
