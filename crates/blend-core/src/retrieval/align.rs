/// Raw local alignment score of `source` against `candidate`.
///
/// Border cells start at `-index`, so a source only gains by overlapping the
/// candidate, not by skipping into it for free. Interior cells take the best
/// of a diagonal step (+1 match, -1 mismatch) or a gap (-1). The result is
/// the maximum over the whole matrix, which makes it a substring score.
/// Since `A[0][0] = 0` the result is never negative.
pub fn local_alignment(source: &[char], candidate: &[char]) -> i32 {
    let width = candidate.len() + 1;
    let mut prev: Vec<i32> = (0..width as i32).map(|j| -j).collect();
    let mut curr = vec![0i32; width];
    let mut best = 0i32;

    for (i, &s) in source.iter().enumerate() {
        curr[0] = -(i as i32 + 1);
        for (j, &c) in candidate.iter().enumerate() {
            let diagonal = prev[j] + if s == c { 1 } else { -1 };
            let cell = diagonal.max(curr[j] - 1).max(prev[j + 1] - 1);
            curr[j + 1] = cell;
            best = best.max(cell);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    best
}

/// Local alignment normalized by the candidate length.
///
/// `1.0` means the source covers the whole candidate. The ratio of two
/// integers equals `1.0` exactly in that case, so callers may compare with
/// `==`.
pub fn alignment_score(source: &str, candidate: &str) -> f64 {
    let candidate: Vec<char> = candidate.chars().collect();
    if candidate.is_empty() {
        return 0.0;
    }
    let source: Vec<char> = source.chars().collect();
    local_alignment(&source, &candidate) as f64 / candidate.len() as f64
}
