use std::collections::HashSet;

use crate::{Headline, HeadlineResult};

/// Merges a freshly generated batch into the accumulated results.
///
/// Existing categories keep their order and headlines; new headlines are
/// appended after them unless a headline with the exact same title is already
/// present in that category. Categories only present in `incoming` are
/// appended at the end.
pub fn merge_results(
    existing: &[HeadlineResult],
    incoming: Vec<HeadlineResult>,
) -> Vec<HeadlineResult> {
    let mut merged = existing.to_vec();
    for group in incoming {
        match merged.iter_mut().find(|result| result.kind == group.kind) {
            Some(target) => append_unique(&mut target.headlines, group.headlines),
            None => {
                let mut headlines = Vec::with_capacity(group.headlines.len());
                append_unique(&mut headlines, group.headlines);
                merged.push(HeadlineResult {
                    kind: group.kind,
                    headlines,
                });
            }
        }
    }
    merged
}

fn append_unique(target: &mut Vec<Headline>, candidates: Vec<Headline>) {
    let mut seen: HashSet<String> = target.iter().map(|h| h.title.clone()).collect();
    for headline in candidates {
        if seen.insert(headline.title.clone()) {
            target.push(headline);
        }
    }
}
