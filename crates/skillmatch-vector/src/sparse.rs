/// Sparse vector of `(term index, weight)` pairs sorted by term index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f32)>,
}

impl SparseVector {
    /// Sorts by index and merges duplicate indices by summing their weights.
    pub fn from_entries(mut entries: Vec<(usize, f32)>) -> Self {
        entries.sort_by_key(|&(i, _)| i);
        let mut merged: Vec<(usize, f32)> = Vec::with_capacity(entries.len());
        for (i, w) in entries {
            match merged.last_mut() {
                Some(last) if last.0 == i => last.1 += w,
                _ => merged.push((i, w)),
            }
        }
        merged.retain(|&(_, w)| w != 0.0);
        Self { entries: merged }
    }

    pub fn entries(&self) -> &[(usize, f32)] { &self.entries }

    pub fn nnz(&self) -> usize { self.entries.len() }

    pub fn is_zero(&self) -> bool { self.entries.is_empty() }

    pub fn norm(&self) -> f32 { self.entries.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt() }

    pub fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 { for (_, w) in &mut self.entries { *w /= norm; } }
    }

    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut a, mut b) = (self.entries.iter().peekable(), other.entries.iter().peekable());
        let mut sum = 0.0;
        while let (Some(&&(ia, wa)), Some(&&(ib, wb))) = (a.peek(), b.peek()) {
            match ia.cmp(&ib) {
                std::cmp::Ordering::Less => { a.next(); }
                std::cmp::Ordering::Greater => { b.next(); }
                std::cmp::Ordering::Equal => { sum += wa * wb; a.next(); b.next(); }
            }
        }
        sum
    }

    /// Cosine similarity; 0 when either side is the zero vector.
    pub fn cosine(&self, other: &SparseVector) -> f32 {
        let denom = self.norm() * other.norm();
        if denom == 0.0 { return 0.0; }
        (self.dot(other) / denom).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_duplicates_and_sorts() {
        let v = SparseVector::from_entries(vec![(3, 1.0), (1, 2.0), (3, 0.5)]);
        assert_eq!(v.entries(), &[(1, 2.0), (3, 1.5)]);
    }

    #[test]
    fn cosine_of_identical_and_disjoint() {
        let a = SparseVector::from_entries(vec![(0, 1.0), (2, 3.0)]);
        let b = SparseVector::from_entries(vec![(1, 4.0)]);
        assert!((a.cosine(&a) - 1.0).abs() < 1e-6);
        assert_eq!(a.cosine(&b), 0.0);
        assert_eq!(a.cosine(&SparseVector::default()), 0.0);
    }

    #[test]
    fn normalize_to_unit_length() {
        let mut v = SparseVector::from_entries(vec![(0, 3.0), (1, 4.0)]);
        v.l2_normalize();
        assert!((v.norm() - 1.0).abs() < 1e-6);
        assert!((v.entries()[0].1 - 0.6).abs() < 1e-6);
    }
}
