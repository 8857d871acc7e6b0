//! Line diff between the locked and local env files.
//!
//! Values are redacted before anything is rendered so secrets never reach
//! the terminal.

/// How a line differs between the lock file and the local file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Present in both.
    Unchanged,
    /// Only in the local file.
    Added,
    /// Only in the lock file.
    Removed,
}

/// A single line in a diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    kind: ChangeKind,
    line: String,
}

impl Change {
    /// Create a new change.
    pub fn new(kind: ChangeKind, line: impl Into<String>) -> Self {
        Self {
            kind,
            line: line.into(),
        }
    }

    pub fn kind(&self) -> ChangeKind {
        self.kind
    }

    /// The raw line, without its newline.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// The line with its value redacted.
    pub fn redacted(&self) -> String {
        redact_line(&self.line)
    }
}

/// Line diff from the locked content to the local content.
#[derive(Debug)]
pub struct Diff {
    changes: Vec<Change>,
}

impl Diff {
    /// Compute a longest-common-subsequence diff.
    ///
    /// Lines shared at the start and end are matched directly. The LCS
    /// table only covers the differing middle and is capped at
    /// [`MAX_LCS_CELLS`]; beyond that the middle is reported as removed
    /// then added in full.
    ///
    /// # Arguments
    ///
    /// * `locked` - Decrypted content of the lock file
    /// * `local` - Content of the local env file
    pub fn compute(locked: &str, local: &str) -> Self {
        let old: Vec<&str> = locked.lines().collect();
        let new: Vec<&str> = local.lines().collect();

        let prefix = old.iter().zip(&new).take_while(|(a, b)| a == b).count();
        let suffix = old[prefix..]
            .iter()
            .rev()
            .zip(new[prefix..].iter().rev())
            .take_while(|(a, b)| a == b)
            .count();

        let mut changes = Vec::with_capacity(old.len().max(new.len()));
        changes.extend(old[..prefix].iter().map(|l| Change::new(ChangeKind::Unchanged, *l)));
        lcs_changes(
            &old[prefix..old.len() - suffix],
            &new[prefix..new.len() - suffix],
            &mut changes,
        );
        changes.extend(
            old[old.len() - suffix..]
                .iter()
                .map(|l| Change::new(ChangeKind::Unchanged, *l)),
        );

        Self { changes }
    }

    /// All changes in order.
    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    /// Number of added lines.
    pub fn added(&self) -> usize {
        self.count(ChangeKind::Added)
    }

    /// Number of removed lines.
    pub fn removed(&self) -> usize {
        self.count(ChangeKind::Removed)
    }

    /// Whether both sides have the same lines.
    pub fn is_unchanged(&self) -> bool {
        self.changes.iter().all(|c| c.kind == ChangeKind::Unchanged)
    }

    fn count(&self, kind: ChangeKind) -> usize {
        self.changes.iter().filter(|c| c.kind == kind).count()
    }

    /// Render as a redacted unified patch.
    ///
    /// # Arguments
    ///
    /// * `old_name` - Label for the locked side (`---`)
    /// * `new_name` - Label for the local side (`+++`)
    /// * `context` - Unchanged lines shown around each change
    pub fn unified(&self, old_name: &str, new_name: &str, context: usize) -> String {
        let mut out = format!("--- {}\n+++ {}\n", old_name, new_name);

        // line numbers consumed on each side before change i
        let mut old_before = Vec::with_capacity(self.changes.len() + 1);
        let mut new_before = Vec::with_capacity(self.changes.len() + 1);
        let (mut o, mut n) = (0usize, 0usize);
        for change in &self.changes {
            old_before.push(o);
            new_before.push(n);
            match change.kind {
                ChangeKind::Unchanged => {
                    o += 1;
                    n += 1;
                }
                ChangeKind::Removed => o += 1,
                ChangeKind::Added => n += 1,
            }
        }
        old_before.push(o);
        new_before.push(n);

        for (start, end) in self.hunks(context) {
            let old_count = old_before[end] - old_before[start];
            let new_count = new_before[end] - new_before[start];
            let old_start = if old_count == 0 {
                old_before[start]
            } else {
                old_before[start] + 1
            };
            let new_start = if new_count == 0 {
                new_before[start]
            } else {
                new_before[start] + 1
            };

            out.push_str(&format!(
                "@@ -{},{} +{},{} @@\n",
                old_start, old_count, new_start, new_count
            ));
            for change in &self.changes[start..end] {
                let prefix = match change.kind {
                    ChangeKind::Unchanged => ' ',
                    ChangeKind::Added => '+',
                    ChangeKind::Removed => '-',
                };
                out.push(prefix);
                out.push_str(&change.redacted());
                out.push('\n');
            }
        }

        out
    }

    /// Ranges of `changes` forming hunks, merged when their context overlaps.
    fn hunks(&self, context: usize) -> Vec<(usize, usize)> {
        let mut hunks: Vec<(usize, usize)> = Vec::new();

        for (idx, change) in self.changes.iter().enumerate() {
            if change.kind == ChangeKind::Unchanged {
                continue;
            }
            let start = idx.saturating_sub(context);
            let end = (idx + context + 1).min(self.changes.len());

            match hunks.last_mut() {
                Some(last) if start <= last.1 => last.1 = end,
                _ => hunks.push((start, end)),
            }
        }

        hunks
    }
}

/// Largest LCS table [`Diff::compute`] builds, in cells.
pub const MAX_LCS_CELLS: usize = 4 * 1024 * 1024;

fn lcs_changes(old: &[&str], new: &[&str], changes: &mut Vec<Change>) {
    let width = new.len() + 1;
    let cells = (old.len() + 1).saturating_mul(width);
    if old.is_empty() || new.is_empty() || cells > MAX_LCS_CELLS {
        changes.extend(old.iter().map(|l| Change::new(ChangeKind::Removed, *l)));
        changes.extend(new.iter().map(|l| Change::new(ChangeKind::Added, *l)));
        return;
    }

    // lcs[i * width + j] = length of the LCS of old[i..] and new[j..]
    let mut lcs = vec![0u32; cells];
    for i in (0..old.len()).rev() {
        for j in (0..new.len()).rev() {
            lcs[i * width + j] = if old[i] == new[j] {
                lcs[(i + 1) * width + j + 1] + 1
            } else {
                lcs[(i + 1) * width + j].max(lcs[i * width + j + 1])
            };
        }
    }

    let (mut i, mut j) = (0, 0);
    while i < old.len() && j < new.len() {
        if old[i] == new[j] {
            changes.push(Change::new(ChangeKind::Unchanged, old[i]));
            i += 1;
            j += 1;
        } else if lcs[(i + 1) * width + j] >= lcs[i * width + j + 1] {
            changes.push(Change::new(ChangeKind::Removed, old[i]));
            i += 1;
        } else {
            changes.push(Change::new(ChangeKind::Added, new[j]));
            j += 1;
        }
    }
    changes.extend(old[i..].iter().map(|l| Change::new(ChangeKind::Removed, *l)));
    changes.extend(new[j..].iter().map(|l| Change::new(ChangeKind::Added, *l)));
}

/// Redact the value of a `KEY=value` line.
///
/// Values longer than four characters keep their first two characters;
/// shorter ones are hidden entirely. Comments, blank lines and lines without
/// a value are returned unchanged.
pub fn redact_line(line: &str) -> String {
    let Some(first) = line.chars().next() else {
        return String::new();
    };
    if first == '#' || first == '=' || first.is_whitespace() {
        return line.to_string();
    }

    match line.split_once('=') {
        Some((key, value)) if !value.is_empty() => {
            let visible = if value.chars().count() > 4 {
                format!("{}***", value.chars().take(2).collect::<String>())
            } else {
                "***".to_string()
            };
            format!("{}={}", key, visible)
        }
        _ => line.to_string(),
    }
}
