//! String similarity for typo-tolerant topic matching.
//!
//! Contract: a score in `[0.0, 1.0]`, exactly `1.0` for identical strings
//! (including two empty strings), always finite. Small edits near the start of
//! a string cost more than edits near its end, which suits hand-typed topic
//! names.

/// A similarity metric over two strings.
pub trait Similarity {
    fn score(&self, a: &str, b: &str) -> f64;
}

/// Jaro–Winkler with the usual prefix scale of 0.1 over at most 4 characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinkler;

impl Similarity for JaroWinkler {
    #[inline]
    fn score(&self, a: &str, b: &str) -> f64 {
        jaro_winkler(a, b)
    }
}

/// Jaro–Winkler score, clamped into `[0, 1]`.
#[inline]
pub fn jaro_winkler(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let s = strsim::jaro_winkler(a, b);
    if s.is_finite() {
        s.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

impl<F> Similarity for F
where
    F: Fn(&str, &str) -> f64,
{
    #[inline]
    fn score(&self, a: &str, b: &str) -> f64 {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_is_one() {
        for s in ["", "a", "Alpha", "Intro to Rust", "Ünïcödé"] {
            assert_eq!(jaro_winkler(s, s), 1.0);
        }
    }

    #[test]
    fn empty_vs_nonempty_is_finite() {
        let s = jaro_winkler("", "topic");
        assert!(s.is_finite());
        assert!((0.0..=1.0).contains(&s));
    }

    #[test]
    fn typos_score_high() {
        assert!(jaro_winkler("Machine Learning", "Machine Leanring") > 0.95);
        assert!(jaro_winkler("Databases", "Databses") > 0.9);
        assert!(jaro_winkler("Databases", "Compilers") < 0.7);
    }

    #[test]
    fn is_symmetric_in_practice() {
        let a = jaro_winkler("Graph Theory", "Grpah Theory");
        let b = jaro_winkler("Grpah Theory", "Graph Theory");
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn closures_are_metrics() {
        let m = |a: &str, b: &str| if a == b { 1.0 } else { 0.0 };
        assert_eq!(m.score("x", "x"), 1.0);
        assert_eq!(JaroWinkler.score("x", "x"), 1.0);
    }
}
