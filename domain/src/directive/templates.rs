//! Directive templates for each step of a meeting

use super::format::{
    format_agenda, format_questions, format_references, format_rules, format_summary_structure,
};
use crate::meeting::config::{Agenda, PriorMaterial};
use crate::persona::Persona;

const SYNTHESIS_ACTION: &str = "synthesize the points raised by each team member, make decisions \
     regarding the astronomical research agenda based on team member input, and ask follow-up \
     questions to gather more information and feedback";

const SUMMARY_ACTION: &str = "summarize the meeting in detail for future discussions, provide \
     specific recommendations regarding the astronomical research agenda, and answer the agenda \
     questions based on the discussion while strictly adhering to the agenda rules";

const AGENDA_INTRO: &str = "Here is the agenda for the meeting:";
const QUESTIONS_INTRO: &str = "Here are the agenda questions that must be answered:";
const RULES_INTRO: &str = "Here are the agenda rules that must be followed:";
const CONTEXT_INTRO: &str = "Here is context for this meeting:";
const SUMMARIES_INTRO: &str = "Here are summaries of the previous meetings:";

/// Templates for the directives the orchestrator injects into a transcript
pub struct DirectiveTemplate;

impl DirectiveTemplate {
    /// Opening directive of a team meeting: roster, material, agenda and flow
    pub fn team_start(
        facilitator: &Persona,
        participants: &[Persona],
        agenda: &Agenda,
        prior: &PriorMaterial,
        rounds: u32,
    ) -> String {
        let roster = participants
            .iter()
            .map(|p| p.title())
            .collect::<Vec<_>>()
            .join(", ");
        let lead = facilitator.title();

        format!(
            "This is the beginning of a team meeting to discuss your astronomical research project. \
             This is a meeting with the team lead, {lead}, and the following team members: {roster}.\n\n\
             {material}\
             {lead} will convene the meeting. Then, each team member will provide their thoughts on \
             the discussion one-by-one in the order above. After all team members have given their \
             input, {lead} will {SYNTHESIS_ACTION}. This will continue for {rounds} rounds. Once the \
             discussion is complete, {lead} will {SUMMARY_ACTION}.",
            material = Self::material(agenda, prior),
        )
    }

    /// Directive handing the floor to one participant for a round
    pub fn participant_turn(participant: &Persona, round: u32, rounds: u32) -> String {
        format!(
            "{}, please provide your thoughts on the discussion (round {} of {}). \
             If you do not have anything new or relevant to add, you may say \"pass\". \
             Remember that you can and should (politely) disagree with other team members \
             if you have a different perspective.",
            participant.title(),
            round,
            rounds
        )
    }

    /// Directive closing every round except the last
    pub fn facilitator_synthesis(facilitator: &Persona, round: u32, rounds: u32) -> String {
        format!(
            "This concludes round {} of {} of discussion. {}, please {}.",
            round,
            rounds,
            facilitator.title(),
            SYNTHESIS_ACTION
        )
    }

    /// Directive requesting the structured final summary
    pub fn facilitator_final(facilitator: &Persona, agenda: &Agenda) -> String {
        format!(
            "{}, please {}.\n\n{}{}{}Your summary should take the following form.\n\n{}",
            facilitator.title(),
            SUMMARY_ACTION,
            format_agenda(
                agenda.text(),
                "As a reminder, here is the agenda for the meeting:"
            ),
            format_questions(
                agenda.questions(),
                "As a reminder, here are the agenda questions that must be answered:"
            ),
            format_rules(
                agenda.rules(),
                "As a reminder, here are the agenda rules that must be followed:"
            ),
            format_summary_structure(agenda.has_questions()),
        )
    }

    /// Opening directive of an individual meeting, addressed to its participant
    pub fn individual_start(participant: &Persona, agenda: &Agenda, prior: &PriorMaterial) -> String {
        format!(
            "This is the beginning of an individual meeting with {title} to discuss your \
             astronomical research project.\n\n\
             {material}\
             {title}, please provide your response to the agenda.",
            title = participant.title(),
            material = Self::material(agenda, prior),
        )
    }

    fn material(agenda: &Agenda, prior: &PriorMaterial) -> String {
        let mut text = format_references(&prior.contexts, "context", CONTEXT_INTRO);
        text.push_str(&format_references(
            &prior.summaries,
            "summary",
            SUMMARIES_INTRO,
        ));
        text.push_str(&format_agenda(agenda.text(), AGENDA_INTRO));
        text.push_str(&format_questions(agenda.questions(), QUESTIONS_INTRO));
        text.push_str(&format_rules(agenda.rules(), RULES_INTRO));
        text
    }
}
