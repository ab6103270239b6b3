//! Reconciliation of overlapping match branches.

use crate::lookup::matcher::Part;

/// Merge candidate decompositions of `number` into one aligned result.
///
/// Column `i` takes the shortest width among the candidates that reach
/// it and the props of all of them, in visitation order. Digits are cut
/// from `number` at the running offset, so the parts always concatenate
/// back to `number`; an uncovered tail becomes a final unmatched part.
pub(crate) fn merge<'q, 'db>(
    number: &'q str,
    candidates: Vec<Vec<Part<'q, 'db>>>,
) -> Vec<Part<'q, 'db>> {
    let columns = candidates.iter().map(Vec::len).max().unwrap_or(0);
    let mut merged = Vec::with_capacity(columns + 1);
    let mut offset = 0usize;

    for column in 0..columns {
        let mut width = usize::MAX;
        let mut layers = Vec::new();
        for part in candidates.iter().filter_map(|candidate| candidate.get(column)) {
            width = width.min(part.digits.len());
            layers.extend_from_slice(&part.layers);
        }

        let mut end = offset.saturating_add(width).min(number.len());
        while !number.is_char_boundary(end) {
            end += 1;
        }
        merged.push(Part {
            digits: &number[offset..end],
            layers,
        });
        offset = end;
    }

    if offset < number.len() {
        merged.push(Part::unmatched(&number[offset..]));
    }
    merged
}
