/// Degree abbreviations that mark an answer as a list of courses.
pub const COURSE_TOKENS: &[&str] =
    &["msc", "m.sc", "bsc", "b.sc", "phd", "b.tech", "m.tech", "mba", "llb", "llm", "mca", "beng", "bcom", "bba"];

/// At least one course token anywhere in the text and at least three commas.
pub fn looks_like_course_list(answer: &str) -> bool {
    let lower = answer.to_lowercase();
    COURSE_TOKENS.iter().any(|t| lower.contains(t)) && lower.matches(',').count() >= 3
}

/// Render a comma/semicolon/newline separated answer as a `- ` bullet list.
/// Text before the first `:` is kept as a heading. Answers that do not split
/// into more than one item come back unchanged.
pub fn format_as_bullets(answer: &str) -> String {
    match answer.split_once(':') {
        Some((lead, rest)) => {
            let items = split_items(rest);
            if items.is_empty() {
                return answer.to_string();
            }
            format!("{}:\n{}", lead.trim(), bullets(&items))
        }
        None => {
            let items = split_items(answer);
            if items.len() <= 1 {
                return answer.to_string();
            }
            bullets(&items)
        }
    }
}

fn split_items(text: &str) -> Vec<&str> {
    text.split([',', ';', '\n'])
        .map(|s| s.trim().trim_end_matches('.').trim_end())
        .filter(|s| !s.is_empty())
        .collect()
}

fn bullets(items: &[&str]) -> String {
    items.iter().map(|it| format!("- {it}")).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_course_lists() {
        assert!(looks_like_course_list("We offer MBA, MSc Physics, BSc Chemistry, PhD Biology."));
        assert!(!looks_like_course_list("We offer MBA and MSc."));
        assert!(!looks_like_course_list("Apples, pears, plums, figs"));
    }

    #[test]
    fn lead_is_kept_as_heading() {
        let out = format_as_bullets("Programs offered: MBA, MSc Physics; BSc Chemistry, PhD Biology.");
        assert_eq!(out, "Programs offered:\n- MBA\n- MSc Physics\n- BSc Chemistry\n- PhD Biology");
    }

    #[test]
    fn plain_list_without_lead() {
        assert_eq!(format_as_bullets("MBA, MCA.\nLLB"), "- MBA\n- MCA\n- LLB");
    }

    #[test]
    fn dot_only_pieces_do_not_become_bullets() {
        assert_eq!(format_as_bullets("MBA, ., MCA"), "- MBA\n- MCA");
        assert_eq!(format_as_bullets("Courses: ..., MBA"), "Courses:\n- MBA");
    }

    #[test]
    fn single_item_is_left_alone() {
        assert_eq!(format_as_bullets("Only MBA."), "Only MBA.");
        assert_eq!(format_as_bullets("Courses: , ;"), "Courses: , ;");
    }
}
