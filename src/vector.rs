use std::fmt;
use rand::Rng;

/// Draw `dim` independent components from the half-open interval [0, 1).
pub fn random_vector<R: Rng>(rng: &mut R, dim: usize) -> Vec<f64> {
    // The Standard f64 distribution never yields 1.0
    (0..dim).map(|_| rng.gen::<f64>()).collect()
}

/// Renders a vector as the text literal both the TEXT column and `vector()`
/// accept: `[0.25,0.5,...]`.
///
/// Components use the shortest representation that round-trips, without
/// exponent notation.
#[derive(Debug, Clone, Copy)]
pub struct VectorLiteral<'a>(pub &'a [f64]);

impl fmt::Display for VectorLiteral<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", v)?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_vector_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for dim in [0, 1, 3, 64, 1536] {
            let v = random_vector(&mut rng, dim);
            assert_eq!(v.len(), dim);
            assert!(v.iter().all(|x| (0.0..1.0).contains(x)));
        }
    }

    #[test]
    fn test_literal_format() {
        assert_eq!(VectorLiteral(&[0.25, 0.5, 0.0]).to_string(), "[0.25,0.5,0]");
        assert_eq!(VectorLiteral(&[]).to_string(), "[]");
        assert_eq!(VectorLiteral(&[1e-7]).to_string(), "[0.0000001]");
    }

    #[test]
    fn test_literal_round_trips() {
        let mut rng = StdRng::seed_from_u64(11);
        let v = random_vector(&mut rng, 16);
        let text = VectorLiteral(&v).to_string();
        let parsed: Vec<f64> = text
            .trim_start_matches('[')
            .trim_end_matches(']')
            .split(',')
            .map(|s| s.parse().unwrap())
            .collect();
        assert_eq!(parsed, v);
    }
}
