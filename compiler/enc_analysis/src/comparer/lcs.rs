//! Longest common subsequence over token and node sequences.

/// Length of the longest common subsequence of `a` and `b` under `eq`.
pub(crate) fn lcs_len<A, B>(a: &[A], b: &[B], eq: impl Fn(&A, &B) -> bool) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut row = vec![0usize; b.len() + 1];
    for x in a {
        for (j, y) in b.iter().enumerate() {
            row[j + 1] = if eq(x, y) {
                prev[j] + 1
            } else {
                row[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut row);
    }
    prev[b.len()]
}

/// `1 - 2·lcs / (|a| + |b|)`; two empty sequences are at distance 0.
pub(crate) fn lcs_distance<T: PartialEq>(a: &[T], b: &[T]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 0.0;
    }
    let common = lcs_len(a, b, |x, y| x == y);
    #[expect(clippy::cast_precision_loss, reason = "token counts are far below 2^52")]
    let distance = 1.0 - (2 * common) as f64 / total as f64;
    distance
}

/// One step of an edit script between two sequences.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SequenceEdit {
    /// Items paired by the common subsequence.
    Update { old: usize, new: usize },
    Insert { new: usize },
    Delete { old: usize },
}

/// Edit script turning `a` into `b`, in sequence order.
pub fn sequence_edits<A, B>(a: &[A], b: &[B], eq: impl Fn(&A, &B) -> bool) -> Vec<SequenceEdit> {
    // suffix table: table[i][j] = lcs of a[i..] and b[j..]
    let width = b.len() + 1;
    let mut table = vec![0usize; (a.len() + 1) * width];
    for i in (0..a.len()).rev() {
        for j in (0..b.len()).rev() {
            table[i * width + j] = if eq(&a[i], &b[j]) {
                table[(i + 1) * width + j + 1] + 1
            } else {
                table[(i + 1) * width + j].max(table[i * width + j + 1])
            };
        }
    }

    let mut edits = Vec::with_capacity(a.len().max(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if eq(&a[i], &b[j]) {
            edits.push(SequenceEdit::Update { old: i, new: j });
            i += 1;
            j += 1;
        } else if table[(i + 1) * width + j] >= table[i * width + j + 1] {
            edits.push(SequenceEdit::Delete { old: i });
            i += 1;
        } else {
            edits.push(SequenceEdit::Insert { new: j });
            j += 1;
        }
    }
    edits.extend((i..a.len()).map(|old| SequenceEdit::Delete { old }));
    edits.extend((j..b.len()).map(|new| SequenceEdit::Insert { new }));
    edits
}
