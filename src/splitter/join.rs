//! Reconciliation of the unit stream with protected spans.

/// Redraw unit boundaries so that every protected span appears as
/// exactly one contiguous unit.
///
/// Both inputs refer to the same source text: `units` concatenate to it,
/// and `protected` holds non-overlapping `(start, content)` pairs in
/// position order. The walk emits, for each unit, any prefix that
/// precedes a pending span, then the span as a single piece, then keeps
/// consuming the remainder against subsequent spans; units wholly
/// outside every span pass through unchanged. Concatenating the output
/// reproduces the source text byte for byte (the caller asserts this).
pub(crate) fn isolate_protected<'a>(
    units: Vec<&'a str>,
    protected: &[(usize, &'a str)],
) -> Vec<&'a str> {
    let mut result = Vec::with_capacity(units.len() + protected.len());
    let mut j = 0;
    // `point` is the next unemitted byte, `start` the current unit's
    // position; both are absolute offsets into the source text.
    let mut point = 0usize;
    let mut start = 0usize;

    for unit in units {
        let end = start + unit.len();
        // A span emitted from an earlier unit may have swallowed part of
        // this one; skip what was already covered.
        let consumed = point.saturating_sub(start);
        let mut cur = unit.get(consumed..).unwrap_or("");

        while j < protected.len() {
            let (p_start, p_content) = protected[j];
            let p_end = p_start + p_content.len();

            if end <= p_start {
                break;
            }

            // Emit the stretch before the span as its own piece
            if point < p_start {
                let local_end = p_start - point;
                result.push(&cur[..local_end]);
                cur = &cur[local_end..];
                point = p_start;
            }

            // The span itself is one indivisible piece
            result.push(p_content);
            j += 1;

            if point < p_end {
                let local_start = p_end - point;
                cur = cur.get(local_start..).unwrap_or("");
                point = p_end;
            }

            if cur.is_empty() {
                break;
            }
        }

        if !cur.is_empty() {
            result.push(cur);
            point = end;
        }
        start = end;
    }

    result
}
