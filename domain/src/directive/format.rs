//! Text block formatters used to assemble directives
//!
//! All functions are total and produce presentation text only; nothing in
//! the lab parses these blocks back.

/// `"{intro}\n\n{agenda}\n\n"`
pub fn format_agenda(agenda: &str, intro: &str) -> String {
    format!("{}\n\n{}\n\n", intro, agenda)
}

/// 1-based numbered list, entries separated by a blank line
pub fn format_numbered_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Agenda questions block, empty when there are no questions
pub fn format_questions<S: AsRef<str>>(questions: &[S], intro: &str) -> String {
    format_list_section(questions, intro)
}

/// Agenda rules block, empty when there are no rules
pub fn format_rules<S: AsRef<str>>(rules: &[S], intro: &str) -> String {
    format_list_section(rules, intro)
}

fn format_list_section<S: AsRef<str>>(items: &[S], intro: &str) -> String {
    if items.is_empty() {
        return String::new();
    }
    format!("{}\n\n{}\n\n", intro, format_numbered_list(items))
}

/// Wrap prior material in numbered `[begin kind i]`/`[end kind i]` markers
pub fn format_references<S: AsRef<str>>(refs: &[S], kind: &str, intro: &str) -> String {
    if refs.is_empty() {
        return String::new();
    }
    let blocks = refs
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            format!(
                "[begin {kind} {n}]\n\n{}\n\n[end {kind} {n}]",
                entry.as_ref(),
                n = i + 1
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("{}\n\n{}\n\n", intro, blocks)
}

/// Section layout the facilitator must follow in the final summary.
///
/// `### Answers` is only requested when the agenda has questions.
pub fn format_summary_structure(has_questions: bool) -> String {
    let mut sections = vec![
        "### Agenda",
        "Restate the agenda in your own words.",
        "### Team Member Input",
        "Summarize all of the important points raised by each team member. \
         This is to ensure that key details are preserved for future meetings.",
        "### Recommendation",
        "Provide your expert recommendation regarding the agenda. You should consider the input \
         from each team member, but you must also use your expertise to make a final decision and \
         choose one option among several that may have been discussed. This decision can conflict \
         with the input of some team members as long as it is well justified. It is essential that \
         you provide a clear, specific, and actionable recommendation. Please justify your \
         recommendation as well.",
    ];

    if has_questions {
        sections.extend([
            "### Answers",
            "For each agenda question, please provide the following:",
            "Answer: A specific answer to the question based on your recommendation above.",
            "Justification: A brief explanation of why you provided that answer.",
        ]);
    }

    sections.extend([
        "### Next Steps",
        "Outline the next steps that the team should take based on the discussion.",
    ]);

    sections.join("\n\n")
}
