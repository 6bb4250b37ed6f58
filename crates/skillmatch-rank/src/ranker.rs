use skillmatch_core::catalog::Catalog;
use skillmatch_core::types::{Filter, ScoredRecord};

/// Order, filter, normalize and truncate adjusted scores.
///
/// - positions are stably sorted by adjusted score, so ties keep catalog order
/// - scores are divided by the maximum adjusted score over the whole catalog
///   and clamped to `[0, 1]`; a non-positive maximum yields all zeros
/// - when nothing passes the filter, the first catalog record is returned
///   with score 0
///
/// `top_k` is treated as at least 1.
pub fn rank(adjusted: &[f32], catalog: &Catalog, top_k: usize, filter: &Filter) -> Vec<ScoredRecord> {
    let top_k = top_k.max(1);
    let n = adjusted.len().min(catalog.len());
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| adjusted[b].total_cmp(&adjusted[a]));

    let max = adjusted[..n].iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let normalize = |s: f32| if n > 0 && max > 0.0 { (s / max).clamp(0.0, 1.0) } else { 0.0 };

    let mut results = Vec::with_capacity(top_k.min(n));
    for position in order {
        if results.len() >= top_k { break; }
        let Some(record) = catalog.get(position) else { continue };
        if !filter.matches(record) { continue; }
        results.push(ScoredRecord { record: record.clone(), score: normalize(adjusted[position]) });
    }

    if results.is_empty() {
        if let Some(first) = catalog.first() {
            results.push(ScoredRecord { record: first.clone(), score: 0.0 });
        }
    }
    results
}
