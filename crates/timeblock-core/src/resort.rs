//! Reordering task lines by completion marker.
//!
//! Independent of the scheduling core: groups a selection's lines by
//! completion state without touching their content.

#[derive(Clone, Copy, PartialEq)]
enum Placed {
    Complete,
    Incomplete,
    Cancelled,
    InProgress,
    None,
}

/// Group selected lines by completion state: completed first, then
/// incomplete, cancelled, in-progress, and finally lines with no
/// recognizable marker. Space- or tab-indented continuation lines travel
/// with the most recent marked line's group.
pub fn resort_by_completion(text: &str) -> String {
    let mut complete = Vec::new();
    let mut incomplete = Vec::new();
    let mut cancelled = Vec::new();
    let mut in_progress = Vec::new();
    let mut unknown = Vec::new();
    let mut last_placed = Placed::None;

    for line in text.lines() {
        if line.starts_with("- [ ]") {
            incomplete.push(line);
            last_placed = Placed::Incomplete;
        } else if line.starts_with("- [x]") {
            complete.push(line);
            last_placed = Placed::Complete;
        } else if line.starts_with("- [-]") {
            cancelled.push(line);
            last_placed = Placed::Cancelled;
        } else if line.starts_with("- [/]") {
            in_progress.push(line);
            last_placed = Placed::InProgress;
        } else if line.starts_with("  ") || line.starts_with('\t') {
            match last_placed {
                Placed::Complete => complete.push(line),
                Placed::Incomplete => incomplete.push(line),
                Placed::Cancelled => cancelled.push(line),
                Placed::InProgress => in_progress.push(line),
                Placed::None => unknown.push(line),
            }
        } else {
            unknown.push(line);
        }
    }

    [complete, incomplete, cancelled, in_progress, unknown]
        .iter()
        .map(|group| group.join("\n"))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_lines_move_to_the_top() {
        let text = "- [ ] buy milk\n- [x] call mom\n- [ ] write report";
        assert_eq!(
            resort_by_completion(text),
            "- [x] call mom\n- [ ] buy milk\n- [ ] write report"
        );
    }

    #[test]
    fn test_group_order() {
        let text = "- [/] drafting\n- [-] cancelled trip\n- [ ] todo\n- [x] done";
        assert_eq!(
            resort_by_completion(text),
            "- [x] done\n- [ ] todo\n- [-] cancelled trip\n- [/] drafting"
        );
    }

    #[test]
    fn test_continuation_lines_follow_their_task() {
        let text = "- [x] call mom\n  left a voicemail\n- [ ] buy milk\n\tskim or whole?";
        assert_eq!(
            resort_by_completion(text),
            "- [x] call mom\n  left a voicemail\n- [ ] buy milk\n\tskim or whole?"
        );
    }

    #[test]
    fn test_unrecognized_lines_sink_to_the_bottom() {
        // Empty middle groups leave blank separator lines behind.
        let text = "# Monday\n- [ ] buy milk\n- [x] call mom";
        assert_eq!(
            resort_by_completion(text),
            "- [x] call mom\n- [ ] buy milk\n\n\n# Monday"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(resort_by_completion(""), "");
    }
}
