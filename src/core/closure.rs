use tracing::debug;

use super::walker::{TreeWalker, WalkState};

/// Extends the walk into every dependency directory that has not been
/// visited yet, including those discovered while extending. Returns the
/// number of directories walked.
///
/// Destinations are taken in discovery order. Everything before the cursor
/// already points at a visited path, and the visited set never shrinks, so
/// a single forward pass finds the same destinations in the same order as
/// rescanning the list from the start after every walk.
pub fn expand_dependencies(walker: &mut TreeWalker<'_>, state: &mut WalkState) -> usize {
    let mut walked = 0;
    let mut cursor = 0;

    while cursor < state.dependencies.len() {
        let dst = state.dependencies[cursor].dst.clone();
        if !state.visited.contains(&dst) {
            debug!(path = %dst.display(), "following dependency");
            walker.walk(&dst, false, state);
            walked += 1;
        }
        cursor += 1;
    }

    walked
}
