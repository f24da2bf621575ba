use ahash::HashSet;

/// Case-insensitive bag of tokens, split on any run of whitespace or commas.
pub(crate) fn tokenize(text: &str) -> HashSet<String> {
  text
    .to_lowercase()
    .split(|c: char| c.is_whitespace() || c == ',')
    .filter(|token| !token.is_empty())
    .map(str::to_string)
    .collect()
}

/// Jaccard index between the token sets of two free-text interests.
///
/// Symmetric, total and always within `[0, 1]`. Two inputs without any token
/// (empty or whitespace-only) score `0.0` rather than dividing by zero.
pub fn similarity(a: &str, b: &str) -> f64 {
  let lhs = tokenize(a);
  let rhs = tokenize(b);

  let union = lhs.union(&rhs).count();

  if union == 0 {
    return 0.0;
  }

  lhs.intersection(&rhs).count() as f64 / union as f64
}

#[cfg(test)]
mod tests {
  use float_cmp::assert_approx_eq;

  #[test]
  fn tokenize() {
    let tokens = super::tokenize("Urban  tree,planting, URBAN");

    assert_eq!(tokens.len(), 3);
    assert!(tokens.contains("urban"));
    assert!(tokens.contains("tree"));
    assert!(tokens.contains("planting"));
  }

  #[test]
  fn identical_interests() {
    assert_approx_eq!(f64, super::similarity("climate action now", "climate action now"), 1.0);
  }

  #[test]
  fn disjoint_interests() {
    // {urban, tree, planting} vs {beach, cleanup, initiatives}: empty intersection
    assert_approx_eq!(f64, super::similarity("Urban tree planting", "Beach cleanup initiatives"), 0.0);
  }

  #[test]
  fn overlapping_interests() {
    // intersection {climate, action} over union of 4
    assert_approx_eq!(f64, super::similarity("climate action now", "climate action today"), 0.5);
  }

  #[test]
  fn symmetric() {
    let pairs = [("STEM education for girls", "Digital literacy in villages"), ("Mental health awareness", "mental health, awareness")];

    for (lhs, rhs) in pairs {
      assert_approx_eq!(f64, super::similarity(lhs, rhs), super::similarity(rhs, lhs));
    }
  }

  #[test]
  fn case_and_delimiters_do_not_matter() {
    assert_approx_eq!(f64, super::similarity("Mental Health awareness", "mental health, awareness"), 1.0);
  }

  #[test]
  fn empty_inputs_are_safe() {
    assert_approx_eq!(f64, super::similarity("", ""), 0.0);
    assert_approx_eq!(f64, super::similarity("   ,  ", " , "), 0.0);
    assert_approx_eq!(f64, super::similarity("", "anything"), 0.0);
  }

  #[test]
  fn bounded() {
    let samples = ["a", "a b", "a b c", "x y z", ""];

    for lhs in samples {
      for rhs in samples {
        let score = super::similarity(lhs, rhs);

        assert!((0.0..=1.0).contains(&score));
      }
    }
  }
}
